use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::instrument;

use crate::domain::{
    capture::entities::CapturedImage,
    common::entities::app_errors::CoreError,
    detection::{ports::IngredientDetector, schema::DetectionResponse},
};

/// Detector hosted behind `POST {url}` with `{ "image": "<data uri>" }`.
#[derive(Debug, Clone)]
pub struct HttpIngredientDetector {
    url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct DetectionRequest {
    image: String,
}

impl HttpIngredientDetector {
    pub fn new(url: String, timeout: Duration) -> Result<Self, CoreError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            tracing::error!("Failed to build detection client: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(Self { url, client })
    }
}

impl IngredientDetector for HttpIngredientDetector {
    #[instrument(skip(self, image), fields(url = %self.url))]
    async fn detect(&self, image: CapturedImage) -> Result<Vec<String>, CoreError> {
        let response = self
            .client
            .post(&self.url)
            .json(&DetectionRequest {
                image: image.to_data_uri(),
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Detection request failed: {}", e);
                CoreError::ExternalServiceError(format!("Detection error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Detection service error: {}", status);
            return Err(CoreError::ExternalServiceError(format!(
                "Detection service returned error: {}",
                status
            )));
        }

        let body: DetectionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse detection response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse detection response: {}", e))
        })?;

        Ok(body.ingredients)
    }
}

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::{
    capture::entities::CapturedImage,
    common::entities::app_errors::CoreError,
    detection::{
        ports::IngredientDetector,
        schema::{DetectionResponse, get_ingredient_detection_schema},
    },
};

const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

const DETECTION_PROMPT: &str = "List the food ingredients visible in this photo of a \
refrigerator. Use short, lowercase, singular names such as \"egg\" or \"bell pepper\". \
Leave out containers, brands and anything that is not food.";

/// Vision LLM detector backed by the Gemini `generateContent` API.
#[derive(Debug, Clone)]
pub struct GeminiIngredientDetector {
    api_key: String,
    model_name: String,
    endpoint: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: String,
}

impl GeminiIngredientDetector {
    pub fn new(api_key: String, model_name: String, timeout: Duration) -> Result<Self, CoreError> {
        Self::with_endpoint(api_key, model_name, DEFAULT_GEMINI_ENDPOINT.to_string(), timeout)
    }

    pub fn with_endpoint(
        api_key: String,
        model_name: String,
        endpoint: String,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            tracing::error!("Failed to build Gemini client: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(Self {
            api_key,
            model_name,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.endpoint, self.model_name
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {}",
                status
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))
    }
}

impl IngredientDetector for GeminiIngredientDetector {
    #[instrument(skip(self, image), fields(model = %self.model_name))]
    async fn detect(&self, image: CapturedImage) -> Result<Vec<String>, CoreError> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: DETECTION_PROMPT.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type.clone(),
                            data: general_purpose::STANDARD.encode(&image.bytes),
                        },
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: get_ingredient_detection_schema(),
            }),
        };

        let raw_response = self.call_gemini_api(request).await?;

        let parsed: DetectionResponse = serde_json::from_str(&raw_response).map_err(|e| {
            tracing::error!("Invalid ingredients format: {}", e);
            CoreError::ExternalServiceError(format!("Invalid ingredients format: {}", e))
        })?;

        Ok(parsed.ingredients)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, method, path, query_param},
    };

    use super::*;

    fn detector(server: &MockServer) -> GeminiIngredientDetector {
        GeminiIngredientDetector::with_endpoint(
            "test-key".to_string(),
            "gemini-2.0-flash".to_string(),
            server.uri(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_detect_parses_structured_output() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "generation_config": { "response_mime_type": "application/json" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {
                        "parts": [{ "text": "{\"ingredients\": [\"egg\", \"milk\"]}" }]
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ingredients = detector(&server)
            .detect(CapturedImage::new("image/jpeg", vec![1u8, 2, 3]))
            .await
            .unwrap();

        assert_eq!(ingredients, vec!["egg", "milk"]);
    }

    #[tokio::test]
    async fn test_detect_without_candidates_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let result = detector(&server)
            .detect(CapturedImage::new("image/jpeg", vec![1u8]))
            .await;

        assert!(matches!(result, Err(CoreError::ExternalServiceError(_))));
    }
}

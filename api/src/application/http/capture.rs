use axum::{
    Json,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use bytes::Bytes;
use fridgechef_core::domain::{
    capture::entities::{CaptureSource, CapturedImage, VideoFrame},
    common::entities::app_errors::CoreError,
};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

use crate::application::http::server::api_entities::api_error::ApiError;

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Body limit for routes accepting captures. Covers base64 growth of a JSON
/// data URI plus form overhead.
pub const CAPTURE_BODY_LIMIT: usize = MAX_IMAGE_SIZE / 3 * 4 + 64 * 1024;

/// JSON capture body, the format the HTTP detector sends.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CaptureRequest {
    /// Base64 data URI, e.g. `data:image/jpeg;base64,...`
    pub image: String,
}

/// Reads a capture from either a JSON [`CaptureRequest`] or a multipart form,
/// depending on the request content type.
pub async fn read_capture_request<S>(request: Request, state: &S) -> Result<CaptureSource, ApiError>
where
    S: Send + Sync,
{
    let is_json = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));

    if is_json {
        let Json(body) = Json::<CaptureRequest>::from_request(request, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        let image = CapturedImage::from_data_uri(&body.image)?;
        ensure_size(image.len())?;
        return Ok(CaptureSource::Upload {
            mime_type: image.mime_type,
            bytes: image.bytes,
        });
    }

    let multipart = Multipart::from_request(request, state)
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?;
    read_capture_source(multipart).await
}

/// Reads a capture from a multipart form.
///
/// Accepted fields: `image` (uploaded file), `data_uri` (base64 data URI), or
/// `frame` (raw RGBA bytes) with optional `width`/`height`. A frame wins over
/// an upload when both are present.
pub async fn read_capture_source(mut multipart: Multipart) -> Result<CaptureSource, ApiError> {
    let mut upload: Option<(String, Bytes)> = None;
    let mut frame: Option<Bytes> = None;
    let mut width: u32 = 0;
    let mut height: u32 = 0;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let mime_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;
                ensure_size(data.len())?;
                upload = Some((mime_type, data));
            }
            "data_uri" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read data_uri: {}", e)))?;
                let image = CapturedImage::from_data_uri(&text)?;
                ensure_size(image.len())?;
                upload = Some((image.mime_type, image.bytes));
            }
            "frame" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read frame: {}", e)))?;
                ensure_size(data.len())?;
                frame = Some(data);
            }
            "width" => width = read_dimension(field).await?,
            "height" => height = read_dimension(field).await?,
            _ => {}
        }
    }

    if let Some(rgba) = frame {
        return Ok(CaptureSource::CameraFrame(VideoFrame {
            width,
            height,
            rgba: rgba.to_vec(),
        }));
    }

    upload
        .map(|(mime_type, bytes)| CaptureSource::Upload { mime_type, bytes })
        .ok_or_else(|| ApiError::from(CoreError::NoImage))
}

fn ensure_size(len: usize) -> Result<(), ApiError> {
    if len > MAX_IMAGE_SIZE {
        return Err(ApiError::PayloadTooLarge(format!(
            "Image too large. Max size is {} bytes",
            MAX_IMAGE_SIZE
        )));
    }
    Ok(())
}

async fn read_dimension(field: axum::extract::multipart::Field<'_>) -> Result<u32, ApiError> {
    let value = field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read frame size: {}", e)))?;
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid frame size: {}", value)))
}

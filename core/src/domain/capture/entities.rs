use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;

use crate::domain::common::entities::app_errors::CoreError;

/// An encoded image ready to be sent to the detection collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub mime_type: String,
    pub bytes: Bytes,
}

impl CapturedImage {
    pub fn new(mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    /// Parses `data:<mime>;base64,<payload>`.
    pub fn from_data_uri(uri: &str) -> Result<Self, CoreError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| CoreError::InvalidImage("missing data: prefix".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| CoreError::InvalidImage("missing payload separator".to_string()))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| CoreError::InvalidImage("only base64 data URIs are supported".to_string()))?;

        let bytes = general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| CoreError::InvalidImage(format!("invalid base64 payload: {}", e)))?;

        if bytes.is_empty() {
            return Err(CoreError::NoImage);
        }

        let mime_type = if mime_type.is_empty() {
            "application/octet-stream"
        } else {
            mime_type
        };

        Ok(Self::new(mime_type, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A raw RGBA frame grabbed from a live camera stream.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// Native width, 0 when the stream did not report one.
    pub width: u32,
    /// Native height, 0 when the stream did not report one.
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Where an image comes from.
#[derive(Debug, Clone)]
pub enum CaptureSource {
    CameraFrame(VideoFrame),
    Upload { mime_type: String, bytes: Bytes },
}

/// Holds at most one captured image; a new capture replaces the previous one.
#[derive(Debug, Clone, Default)]
pub struct CaptureSlot {
    current: Option<CapturedImage>,
}

impl CaptureSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, image: CapturedImage) -> Option<CapturedImage> {
        self.current.replace(image)
    }

    pub fn current(&self) -> Option<&CapturedImage> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_roundtrip_keeps_mime() {
        let image = CapturedImage::new("image/png", vec![1u8, 2, 3, 4]);
        let uri = image.to_data_uri();

        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(CapturedImage::from_data_uri(&uri).unwrap(), image);
    }

    #[test]
    fn test_from_data_uri_rejects_malformed() {
        assert!(matches!(
            CapturedImage::from_data_uri("image/png;base64,AAAA"),
            Err(CoreError::InvalidImage(_))
        ));
        assert!(matches!(
            CapturedImage::from_data_uri("data:image/png,AAAA"),
            Err(CoreError::InvalidImage(_))
        ));
        assert!(matches!(
            CapturedImage::from_data_uri("data:image/png;base64,@@@"),
            Err(CoreError::InvalidImage(_))
        ));
        assert_eq!(
            CapturedImage::from_data_uri("data:image/png;base64,"),
            Err(CoreError::NoImage)
        );
    }

    #[test]
    fn test_slot_holds_one_image() {
        let mut slot = CaptureSlot::new();
        assert!(slot.is_empty());

        assert!(slot.replace(CapturedImage::new("image/jpeg", vec![1u8])).is_none());
        let previous = slot.replace(CapturedImage::new("image/png", vec![2u8]));

        assert_eq!(previous.unwrap().mime_type, "image/jpeg");
        assert_eq!(slot.current().unwrap().mime_type, "image/png");
    }
}

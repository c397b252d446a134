use std::io::Cursor;

use image::{DynamicImage, RgbaImage, codecs::jpeg::JpegEncoder};
use tracing::debug;

use crate::domain::{
    capture::entities::{CaptureSource, CapturedImage, VideoFrame},
    common::entities::app_errors::CoreError,
};

pub const FALLBACK_FRAME_WIDTH: u32 = 720;
pub const FALLBACK_FRAME_HEIGHT: u32 = 480;
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Encodes camera frames as JPEG at a fixed quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameEncoder {
    quality: u8,
}

impl Default for FrameEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl FrameEncoder {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Draws the frame at its native resolution, or 720x480 when the stream
    /// did not report one, and encodes it.
    pub fn encode(&self, frame: &VideoFrame) -> Result<CapturedImage, CoreError> {
        let (width, height) = if frame.width == 0 || frame.height == 0 {
            (FALLBACK_FRAME_WIDTH, FALLBACK_FRAME_HEIGHT)
        } else {
            (frame.width, frame.height)
        };

        let surface = RgbaImage::from_raw(width, height, frame.rgba.clone()).ok_or_else(|| {
            CoreError::InvalidImage(format!(
                "frame buffer of {} bytes does not match {}x{}",
                frame.rgba.len(),
                width,
                height
            ))
        })?;

        let rgb = DynamicImage::ImageRgba8(surface).to_rgb8();
        let mut buffer = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut buffer, self.quality)
            .encode_image(&rgb)
            .map_err(|e| CoreError::InvalidImage(format!("failed to encode frame: {}", e)))?;

        let bytes = buffer.into_inner();
        debug!(width, height, size = bytes.len(), "Encoded camera frame");

        Ok(CapturedImage::new("image/jpeg", bytes))
    }

    /// Turns either capture source into a single encoded image.
    pub fn capture(&self, source: CaptureSource) -> Result<CapturedImage, CoreError> {
        match source {
            CaptureSource::CameraFrame(frame) => self.encode(&frame),
            CaptureSource::Upload { mime_type, bytes } => {
                if bytes.is_empty() {
                    return Err(CoreError::NoImage);
                }
                Ok(CapturedImage::new(mime_type, bytes))
            }
        }
    }
}

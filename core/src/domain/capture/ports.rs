use crate::domain::{
    capture::entities::{CaptureSource, CapturedImage},
    common::entities::app_errors::CoreError,
};

pub trait CaptureService: Send + Sync {
    fn capture_image(&self, source: CaptureSource) -> Result<CapturedImage, CoreError>;
}

//! Turning the drawn form region into a shareable image artifact.

pub mod data_url;
pub mod raster;

use crate::error::CaptureError;
use crate::ui::frame::Frame;

pub use raster::{FrameRasterizer, RasterOptions};

/// Data-URL encoded raster image of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact(String);

impl Artifact {
    pub fn new(data_url: impl Into<String>) -> Self {
        Self(data_url.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

pub type CaptureResult = Result<Artifact, CaptureError>;

/// Renders a drawn region into an image artifact.
#[allow(async_fn_in_trait)]
pub trait Rasterizer {
    async fn rasterize(&self, region: &Frame) -> CaptureResult;
}

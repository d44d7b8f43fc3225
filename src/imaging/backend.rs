//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the batch pipeline
//! needs: decode raw bytes into a [`SourceImage`], and render a source image
//! at new dimensions into an encoded PNG payload.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the `MockBackend` defined below.

use super::params::RenderParams;
use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Intrinsic pixel size of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// A decoded image, ready to be rendered.
///
/// Owned by the pipeline step that decoded it and dropped once the encoded
/// output exists.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: DynamicImage,
}

impl SourceImage {
    /// Wrap decoded pixels. Returns `None` for an image with a zero edge.
    pub fn new(pixels: DynamicImage) -> Option<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return None;
        }
        Some(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width(),
            height: self.height(),
        }
    }

    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }
}

/// An encoded output image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Trait for image processing backends.
///
/// `Send + Sync` because the orchestrator hands the backend to the blocking
/// thread pool for each decode and render.
pub trait ImageBackend: Send + Sync {
    /// Decode raw file bytes. The format is detected from content.
    fn decode(&self, bytes: &[u8]) -> Result<SourceImage, BackendError>;

    /// Scale `source` to exactly `params.width` x `params.height` and encode it.
    fn render(
        &self,
        source: &SourceImage,
        params: &RenderParams,
    ) -> Result<EncodedImage, BackendError>;
}

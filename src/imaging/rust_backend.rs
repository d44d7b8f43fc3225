//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, GIF, BMP, WebP) | `image::ImageReader` with content sniffing |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → PNG | `image::codecs::png::PngEncoder` into an in-memory buffer |

use super::backend::{BackendError, EncodedImage, ImageBackend, SourceImage};
use super::params::RenderParams;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use std::sync::LazyLock;

/// Formats whose decoders are compiled in.
const INPUT_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("png", ImageFormat::Png),
    ("jpeg", ImageFormat::Jpeg),
    ("gif", ImageFormat::Gif),
    ("bmp", ImageFormat::Bmp),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_FORMATS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    INPUT_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(name, _)| *name)
        .collect()
});

/// Names of the input formats that can be decoded.
pub fn supported_input_formats() -> &'static [&'static str] {
    &SUPPORTED_FORMATS
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode as PNG into a fresh buffer.
fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, BackendError> {
    let mut buf = Vec::new();
    img.write_with_encoder(PngEncoder::new(&mut buf))
        .map_err(|e| BackendError::Encode(format!("PNG encode failed: {}", e)))?;
    if buf.is_empty() {
        return Err(BackendError::Encode("PNG encoder produced no data".into()));
    }
    Ok(buf)
}

impl ImageBackend for RustBackend {
    fn decode(&self, bytes: &[u8]) -> Result<SourceImage, BackendError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| BackendError::Decode(format!("Failed to sniff format: {}", e)))?;
        if reader.format().is_none() {
            return Err(BackendError::Decode("Unrecognized image format".into()));
        }
        let pixels = reader
            .decode()
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        SourceImage::new(pixels)
            .ok_or_else(|| BackendError::Decode("Image has a zero dimension".into()))
    }

    fn render(
        &self,
        source: &SourceImage,
        params: &RenderParams,
    ) -> Result<EncodedImage, BackendError> {
        if params.width == 0 || params.height == 0 {
            return Err(BackendError::Encode(format!(
                "Invalid surface size {}x{}",
                params.width, params.height
            )));
        }

        // Stretch to fill the whole surface, then flatten to RGBA like a 2D canvas.
        let resized = source
            .pixels()
            .resize_exact(params.width, params.height, FilterType::Lanczos3);
        let rgba = DynamicImage::ImageRgba8(resized.to_rgba8());

        // PNG is lossless: params.quality has nothing to drive here.
        let bytes = encode_png(&rgba)?;
        Ok(EncodedImage {
            bytes,
            width: rgba.width(),
            height: rgba.height(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Quality;
    use crate::test_helpers::{bmp_bytes, gif_bytes, jpeg_bytes, png_bytes, webp_bytes};

    fn params(width: u32, height: u32) -> RenderParams {
        RenderParams {
            width,
            height,
            quality: Quality::default(),
        }
    }

    #[test]
    fn supported_formats_cover_common_raster_types() {
        let formats = supported_input_formats();
        for expected in &["png", "jpeg", "gif", "bmp", "webp"] {
            assert!(
                formats.contains(expected),
                "expected {expected} in supported formats"
            );
        }
    }

    #[test]
    fn decode_synthetic_png() {
        let backend = RustBackend::new();
        let source = backend.decode(&png_bytes(200, 150)).unwrap();
        assert_eq!(source.width(), 200);
        assert_eq!(source.height(), 150);
    }

    #[test]
    fn decode_synthetic_jpeg() {
        let backend = RustBackend::new();
        let source = backend.decode(&jpeg_bytes(64, 48)).unwrap();
        assert_eq!((source.width(), source.height()), (64, 48));
    }

    #[test]
    fn decode_synthetic_gif_and_bmp() {
        let backend = RustBackend::new();
        let gif = backend.decode(&gif_bytes(20, 10)).unwrap();
        assert_eq!((gif.width(), gif.height()), (20, 10));
        let bmp = backend.decode(&bmp_bytes(7, 9)).unwrap();
        assert_eq!((bmp.width(), bmp.height()), (7, 9));
    }

    #[test]
    fn decode_synthetic_webp() {
        let backend = RustBackend::new();
        let source = backend.decode(&webp_bytes(9, 5)).unwrap();
        assert_eq!((source.width(), source.height()), (9, 5));

        let encoded = backend.render(&source, &params(18, 10)).unwrap();
        assert_eq!((encoded.width, encoded.height), (18, 10));
    }

    #[test]
    fn decode_garbage_errors() {
        let backend = RustBackend::new();
        let err = backend.decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, BackendError::Decode(_)));
    }

    #[test]
    fn decode_truncated_png_errors() {
        let backend = RustBackend::new();
        let bytes = png_bytes(50, 50);
        let err = backend.decode(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, BackendError::Decode(_)));
    }

    #[test]
    fn decode_empty_input_errors() {
        let backend = RustBackend::new();
        assert!(backend.decode(&[]).is_err());
    }

    #[test]
    fn render_produces_png_of_exact_size() {
        let backend = RustBackend::new();
        let source = backend.decode(&jpeg_bytes(400, 300)).unwrap();

        let out = backend.render(&source, &params(123, 45)).unwrap();
        assert_eq!((out.width, out.height), (123, 45));
        assert!(out.size() > 0);
        assert_eq!(&out.bytes[..8], b"\x89PNG\r\n\x1a\n");

        // Re-decoding the output confirms the stretch: no crop, no letterbox.
        let reread = backend.decode(&out.bytes).unwrap();
        assert_eq!((reread.width(), reread.height()), (123, 45));
    }

    #[test]
    fn render_upscales() {
        let backend = RustBackend::new();
        let source = backend.decode(&png_bytes(4, 4)).unwrap();
        let out = backend.render(&source, &params(32, 16)).unwrap();
        assert_eq!((out.width, out.height), (32, 16));
    }

    #[test]
    fn render_zero_surface_errors() {
        let backend = RustBackend::new();
        let source = backend.decode(&png_bytes(4, 4)).unwrap();
        let err = backend.render(&source, &params(0, 10)).unwrap_err();
        assert!(matches!(err, BackendError::Encode(_)));
    }
}

//! Shared test utilities: synthetic images encoded in memory.
//!
//! Every helper draws the same gradient so decoded output is predictable,
//! then encodes it with the `image` crate's own encoders.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let bytes = png_bytes(200, 150);
//! let source = RustBackend::new().decode(&bytes).unwrap();
//! assert_eq!(source.width(), 200);
//! ```

use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use std::io::Cursor;

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Png)
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Jpeg)
}

pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Bmp)
}

pub fn gif_bytes(width: u32, height: u32) -> Vec<u8> {
    let rgba = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    encode(DynamicImage::ImageRgba8(rgba), ImageFormat::Gif)
}

/// Lossless WebP; the `image` encoder only accepts 8-bit RGB(A).
pub fn webp_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::WebP)
}

//! Image processing — pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (format sniffed from content) |
//! | **Resolve size** | [`resolve_dimensions`] — pure aspect-ratio math |
//! | **Render → PNG** | `resize_exact` (Lanczos3) + PNG encoder |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, EncodedImage, ImageBackend, SourceImage};
pub use calculations::{ResolvedDimensions, resolve_dimensions};
pub use operations::{plan_render, resize_source};
pub use params::{Quality, RenderParams, TargetSize};
pub use rust_backend::RustBackend;

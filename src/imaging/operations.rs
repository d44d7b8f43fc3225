//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, EncodedImage, ImageBackend, SourceImage};
use super::calculations::{ResolvedDimensions, resolve_dimensions};
use super::params::{Quality, RenderParams, TargetSize};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Compute the render parameters for `source` under `target`.
pub fn plan_render(source: &SourceImage, target: TargetSize, quality: Quality) -> RenderParams {
    let ResolvedDimensions { width, height } =
        resolve_dimensions((source.width(), source.height()), target);
    RenderParams {
        width,
        height,
        quality,
    }
}

/// Resolve the output size for `source` and render it.
pub fn resize_source<B: ImageBackend + ?Sized>(
    backend: &B,
    source: &SourceImage,
    target: TargetSize,
    quality: Quality,
) -> Result<EncodedImage> {
    let params = plan_render(source, target, quality);
    log::debug!(
        "Resolved {}x{} → {}x{}",
        source.width(),
        source.height(),
        params.width,
        params.height
    );
    backend.render(source, &params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};

    fn target(width: Option<u32>, height: Option<u32>, keep_aspect: bool) -> TargetSize {
        TargetSize {
            width,
            height,
            keep_aspect,
        }
    }

    #[test]
    fn plan_render_carries_quality() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 640,
            height: 480,
        }]);
        let source = backend.decode(b"img").unwrap();
        let params = plan_render(&source, TargetSize::default(), Quality::new(0.5));
        assert_eq!((params.width, params.height), (640, 480));
        assert_eq!(params.quality.value(), 0.5);
    }

    #[test]
    fn resize_source_renders_resolved_size() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 800,
            height: 600,
        }]);
        let source = backend.decode(b"img").unwrap();

        let out = resize_source(
            &backend,
            &source,
            target(Some(200), None, true),
            Quality::default(),
        )
        .unwrap();
        assert_eq!((out.width, out.height), (200, 150));

        let ops = backend.get_operations();
        assert_eq!(
            ops[1],
            RecordedOp::Render {
                source: (800, 600),
                width: 200,
                height: 150,
                quality: 0.92,
            }
        );
    }

    #[test]
    fn resize_source_without_targets_keeps_size() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 31,
            height: 17,
        }]);
        let source = backend.decode(b"img").unwrap();
        let out = resize_source(&backend, &source, TargetSize::default(), Quality::default())
            .unwrap();
        assert_eq!((out.width, out.height), (31, 17));
    }

    #[test]
    fn resize_source_propagates_encode_error() {
        let backend = MockBackend::failing_render();
        let source = backend.decode(b"img").unwrap();
        let err = resize_source(&backend, &source, TargetSize::default(), Quality::default())
            .unwrap_err();
        assert!(matches!(err, BackendError::Encode(_)));
    }
}

//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::TargetSize;

/// Output size of a render, both edges at least 1px.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDimensions {
    pub width: u32,
    pub height: u32,
}

/// Resolve the output size for one image.
///
/// Rules, in order:
/// - neither target given: intrinsic size unchanged
/// - one target given, `keep_aspect`: the other edge is scaled by
///   `target / intrinsic` on the given axis and rounded
/// - one target given, no `keep_aspect`: the missing edge keeps its intrinsic size
/// - both given: used verbatim
///
/// Every result is coerced to at least 1. The function never panics.
///
/// # Examples
/// ```
/// # use batch_resize::imaging::{TargetSize, resolve_dimensions};
/// let target = TargetSize { width: Some(400), height: None, keep_aspect: true };
/// let dims = resolve_dimensions((800, 600), target);
/// assert_eq!((dims.width, dims.height), (400, 300));
/// ```
pub fn resolve_dimensions(intrinsic: (u32, u32), target: TargetSize) -> ResolvedDimensions {
    let (src_w, src_h) = intrinsic;

    let (width, height) = match (target.width, target.height) {
        (None, None) => (src_w, src_h),
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) if target.keep_aspect => (w, scale_edge(src_h, w, src_w)),
        (None, Some(h)) if target.keep_aspect => (scale_edge(src_w, h, src_h), h),
        (Some(w), None) => (w, src_h),
        (None, Some(h)) => (src_w, h),
    };

    ResolvedDimensions {
        width: width.max(1),
        height: height.max(1),
    }
}

/// Scale `edge` by `target / reference`, rounding to the nearest pixel.
fn scale_edge(edge: u32, target: u32, reference: u32) -> u32 {
    if reference == 0 {
        return edge;
    }
    let scaled = (edge as f64 * (target as f64 / reference as f64)).round();
    // Saturates on overflow; the caller clamps the low end.
    scaled.min(u32::MAX as f64) as u32
}

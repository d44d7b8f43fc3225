//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides what output to render) and the [`backend`](super::backend)
//! (which does the actual pixel work). Keeping them apart lets the batch
//! orchestrator run against a mock backend in tests.
//!
//! ## Types
//!
//! - [`Quality`] — Encoder quality on a 0–1 scale (default 0.92). Clamped on construction.
//! - [`TargetSize`] — The user's requested width/height, either of which may be unset.
//! - [`RenderParams`] — Full description of one render: output dimensions and quality.

/// Encoder quality on a 0–1 scale.
///
/// PNG output is lossless and does not consult this value; it is carried so
/// every render records the quality it was asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quality(pub f32);

impl Quality {
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(0.92)
    }
}

/// Requested output size. `None` means "not given", which is distinct from
/// any numeric value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TargetSize {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub keep_aspect: bool,
}

/// Parameters for a single render + encode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
}

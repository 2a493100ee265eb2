//! Error types for spline construction and queries.

use thiserror::Error;

/// Errors that can occur while building or querying a spline.
///
/// Construction fails fast: a spline either comes into existence fully
/// built or not at all. Evaluation outside of `[0, max_t]` is not an error,
/// the parameter is clamped (see [`Spline::clamp_t`](crate::Spline::clamp_t)).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    /// Fewer control points than the basis needs for a single segment.
    #[error("{variant} needs at least {required} control points, got {actual}")]
    TooFewPoints {
        variant: &'static str,
        required: usize,
        actual: usize,
    },

    /// A construction parameter (degree, alpha, tension, point coordinates, ...) is malformed.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },

    /// Lookup into the per-point T table with an index past its end.
    #[error("index {index} out of range for {len} control points")]
    IndexOutOfRange { index: usize, len: usize },

    /// Singular linear system or zero knot spacing, usually caused by coincident points.
    #[error("numerical failure: {reason}")]
    Numerical { reason: &'static str },
}

impl SplineError {
    /// True for errors caused by malformed input (too few points or bad parameters).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            SplineError::TooFewPoints { .. } | SplineError::InvalidParameter { .. }
        )
    }
}

pub type Result<T> = core::result::Result<T, SplineError>;

//! Construction and query options.
//!
//! All options have defaults matching the plain textbook variant of each spline:
//! uniform spacing, no tension, open (non-looping) curves.

use num_traits::Float;

use crate::lit;

/// Options shared by the cubic and quintic Hermite splines.
///
/// ```rust
/// use strand::HermiteOptions;
///
/// let centripetal = HermiteOptions::default().with_alpha(0.5).with_tension(0.25);
/// assert_eq!(centripetal.alpha, 0.5);
/// assert!(!centripetal.looping);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HermiteOptions<S> {
    /// Knot spacing exponent: 0 uniform, 0.5 centripetal, 1 chordal
    pub alpha: S,
    /// Scales the estimated tangents by `1 - tension`; 0 is Catmull-Rom, 1 gives zero tangents
    pub tension: S,
    /// Close the curve by connecting the last point back to the first
    pub looping: bool,
}

impl<S: Float> Default for HermiteOptions<S> {
    fn default() -> Self {
        HermiteOptions {
            alpha: S::zero(),
            tension: S::zero(),
            looping: false,
        }
    }
}

impl<S: Float> HermiteOptions<S> {
    pub fn with_alpha(self, alpha: S) -> Self {
        HermiteOptions { alpha, ..self }
    }

    pub fn with_tension(self, tension: S) -> Self {
        HermiteOptions { tension, ..self }
    }

    pub fn looping(self, looping: bool) -> Self {
        HermiteOptions { looping, ..self }
    }
}

/// Options of the natural spline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NaturalOptions<S> {
    /// Knot spacing exponent: 0 uniform, 0.5 centripetal, 1 chordal
    pub alpha: S,
    /// Solve the periodic system instead of imposing zero curvature at both ends
    pub looping: bool,
}

impl<S: Float> Default for NaturalOptions<S> {
    fn default() -> Self {
        NaturalOptions {
            alpha: S::zero(),
            looping: false,
        }
    }
}

impl<S: Float> NaturalOptions<S> {
    pub fn with_alpha(self, alpha: S) -> Self {
        NaturalOptions { alpha, ..self }
    }

    pub fn looping(self, looping: bool) -> Self {
        NaturalOptions { looping, ..self }
    }
}

/// Options of the arc length inverter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverterOptions<S> {
    /// Number of (t, length) samples taken inside every segment for bracketing
    pub samples_per_segment: usize,
    /// Accepted length error, relative to the total length of the spline
    pub tolerance: S,
    /// Iteration cap of the Newton/bisection refinement
    pub max_iterations: usize,
}

impl<S: Float> Default for InverterOptions<S> {
    fn default() -> Self {
        InverterOptions {
            samples_per_segment: 10,
            tolerance: lit(1e-6),
            max_iterations: 32,
        }
    }
}

impl<S: Float> InverterOptions<S> {
    pub fn with_samples_per_segment(self, samples_per_segment: usize) -> Self {
        InverterOptions {
            samples_per_segment,
            ..self
        }
    }

    pub fn with_tolerance(self, tolerance: S) -> Self {
        InverterOptions { tolerance, ..self }
    }

    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        InverterOptions {
            max_iterations,
            ..self
        }
    }
}

//! Interpolating and approximating splines in N-dimensional euclidean space.
//!
//! Every spline is built once from a list of control points and is immutable afterwards.
//! All variants implement the [`Spline`] trait, which answers
//! - position, tangent, curvature and wiggle (third derivative) at a parameter `t`,
//! - segment lookup and the t value of each control point,
//! - arc length between two parameters (5-point Gauss-Legendre per segment).
//!
//! [`SplineInverter`] solves the inverse problem, the parameter at which a given arc length is reached.
//!
//! | Type | Continuity | Interpolates |
//! |---|---|---|
//! | [`UniformCubicBSpline`] | C2 | no |
//! | [`GenericBSpline`] | C(degree - 1) | no |
//! | [`NaturalSpline`] | C2 | yes |
//! | [`CubicHermiteSpline`] | C1 | yes |
//! | [`QuinticHermiteSpline`] | C2 | yes |
//! | [`UniformCRSpline`] | C1 | yes |
//!
//! Points are anything implementing the small [`Point`] trait: [`PointN`], plain `f32`/`f64`
//! for one-dimensional curves, or `nalgebra::SVector` with the `nalgebra` feature.
//!
//! ```rust
//! use strand::{NaturalSpline, PointN, Spline, SplineInverter};
//!
//! let spline = NaturalSpline::new(vec![
//!     PointN::new([0.0, 0.0]),
//!     PointN::new([1.0, 1.0]),
//!     PointN::new([2.0, 2.0]),
//!     PointN::new([3.0, 3.0]),
//! ])
//! .unwrap();
//!
//! let total = spline.total_length();
//! assert!((total - 18f64.sqrt()).abs() < 1e-6);
//!
//! let inverter = SplineInverter::new(&spline).unwrap();
//! let t = inverter.t_at_length(total / 2.0);
//! assert!((spline.arc_length(0.0, t) - total / 2.0).abs() < 1e-4);
//! ```

use num_traits::{Float, NumCast};

pub mod adapters;
pub mod cubic_hermite;
pub mod error;
pub mod generic_bspline;
pub mod inverter;
pub mod natural_spline;
pub mod options;
mod parameterization;
pub mod point;
pub mod point_generic;
pub mod quadrature;
pub mod quintic_hermite;
mod roots;
mod segment;
pub mod spline;
mod tridiagonal;
pub mod uniform_cr_spline;
pub mod uniform_cubic_bspline;

pub use cubic_hermite::CubicHermiteSpline;
pub use error::{Result, SplineError};
pub use generic_bspline::GenericBSpline;
pub use inverter::SplineInverter;
pub use natural_spline::NaturalSpline;
pub use options::{HermiteOptions, InverterOptions, NaturalOptions};
pub use point::Point;
pub use point_generic::PointN;
pub use quintic_hermite::QuinticHermiteSpline;
pub use spline::{Curvature, Spline, Tangent, Wiggle};
pub use uniform_cr_spline::UniformCRSpline;
pub use uniform_cubic_bspline::UniformCubicBSpline;

/// Float type used for the constant tables of the crate
pub type NativeFloat = f64;

/// Tolerance for exact-arithmetic comparisons in tests
pub const EPSILON: NativeFloat = 1e-10;

/// Convert a native constant into the generic float type `S`.
pub(crate) fn lit<S: Float>(value: NativeFloat) -> S {
    <S as NumCast>::from(value).unwrap_or_else(S::nan)
}

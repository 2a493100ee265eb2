//! Fixed-order Gauss-Legendre quadrature.
//!
//! A 5-point rule integrates polynomials up to degree 9 exactly, which covers
//! every derivative of the cubic and quintic segments in this crate. Curve speed
//! is not a polynomial, so arc lengths are approximate; integrating segment by
//! segment keeps the integrand smooth on each interval.

use core::fmt::Debug;

use num_traits::Float;

use crate::{lit, NativeFloat, Point, PointN};

/// (weight, abscissa) pairs of the 5-point Gauss-Legendre rule on [-1, 1].
pub const GAUSS_LEGENDRE_COEFFS_5: [(NativeFloat, NativeFloat); 5] = [
    (0.5688888888888889, 0.0000000000000000),
    (0.4786286704993665, -0.5384693101056831),
    (0.4786286704993665, 0.5384693101056831),
    (0.2369268850561891, -0.9061798459386640),
    (0.2369268850561891, 0.9061798459386640),
];

/// Integrate `f` over `[a, b]`.
///
/// Works for scalar integrands (`f32`/`f64` are points of dimension one) as well as
/// vector-valued ones. Swapping the bounds flips the sign of the result.
///
/// ```rust
/// use strand::quadrature::integrate;
///
/// // x^4 on [0, 2] = 32/5
/// let area: f64 = integrate(|x: f64| x * x * x * x, 0.0, 2.0);
/// assert!((area - 6.4).abs() < 1e-12);
/// ```
pub fn integrate<P, F>(f: F, a: P::Scalar, b: P::Scalar) -> P
where
    P: Point,
    F: Fn(P::Scalar) -> P,
{
    let half_width = (b - a) * lit(0.5);
    let center = (a + b) * lit(0.5);

    let sample = |(weight, abscissa): (NativeFloat, NativeFloat)| {
        f(center + half_width * lit(abscissa)).scale(lit(weight))
    };

    let (first, rest) = GAUSS_LEGENDRE_COEFFS_5.split_at(1);
    let sum = rest
        .iter()
        .fold(sample(first[0]), |acc, &coeff| acc + sample(coeff));
    sum.scale(half_width)
}

/// Integrate a scalar function of a generic float type.
pub(crate) fn integrate_scalar<S, F>(f: F, a: S, b: S) -> S
where
    S: Float + Default + Debug,
    F: Fn(S) -> S,
{
    integrate(|x| PointN::new([f(x)]), a, b)[0]
}

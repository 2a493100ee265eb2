//! Knot spacing and input validation shared by the spline variants.
//!
//! Spacing between two consecutive points is `|p1 - p0|^alpha`:
//! - `alpha = 0.0`: uniform, every segment spans one unit of t
//! - `alpha = 0.5`: centripetal
//! - `alpha = 1.0`: chordal
use num_traits::{Float, One, Zero};

use crate::error::{Result, SplineError};
use crate::Point;

/// Fails with `TooFewPoints` if `points` is shorter than `required`,
/// and with `InvalidParameter` if a coordinate is NaN or infinite.
pub(crate) fn validate_points<P: Point>(
    variant: &'static str,
    points: &[P],
    required: usize,
) -> Result<()> {
    if points.len() < required {
        return Err(SplineError::TooFewPoints {
            variant,
            required,
            actual: points.len(),
        });
    }
    if !points.iter().all(Point::is_finite_point) {
        return Err(SplineError::InvalidParameter {
            name: "points",
            reason: "control points must have finite coordinates",
        });
    }
    Ok(())
}

pub(crate) fn validate_alpha<S: Float>(alpha: S) -> Result<()> {
    if !(alpha >= S::zero() && alpha <= S::one()) {
        return Err(SplineError::InvalidParameter {
            name: "alpha",
            reason: "must lie in [0, 1]",
        });
    }
    Ok(())
}

pub(crate) fn validate_tension<S: Float>(tension: S) -> Result<()> {
    if !tension.is_finite() {
        return Err(SplineError::InvalidParameter {
            name: "tension",
            reason: "must be finite",
        });
    }
    Ok(())
}

/// Parameter distance between two consecutive points.
pub(crate) fn knot_spacing<P: Point>(p0: &P, p1: &P, alpha: P::Scalar) -> Result<P::Scalar> {
    if alpha == P::Scalar::zero() {
        return Ok(P::Scalar::one());
    }
    let spacing = p0.distance(p1).powf(alpha);
    if spacing <= P::Scalar::epsilon() {
        return Err(SplineError::Numerical {
            reason: "coincident consecutive points give zero knot spacing",
        });
    }
    Ok(spacing)
}

/// Spacing of every consecutive pair. Looping adds the closing pair (last, first),
/// so the result has `points.len()` entries instead of `points.len() - 1`.
pub(crate) fn knot_spacings<P: Point>(
    points: &[P],
    alpha: P::Scalar,
    looping: bool,
) -> Result<Vec<P::Scalar>> {
    let mut spacings = points
        .windows(2)
        .map(|pair| knot_spacing(&pair[0], &pair[1], alpha))
        .collect::<Result<Vec<_>>>()?;
    if looping {
        if let (Some(last), Some(first)) = (points.last(), points.first()) {
            spacings.push(knot_spacing(last, first, alpha)?);
        }
    }
    Ok(spacings)
}

/// Running sum of `spacings`, shifted so that the entry at `origin` is zero.
/// The result has one more entry than `spacings`.
pub(crate) fn cumulative_t<S: Float>(spacings: &[S], origin: usize) -> Vec<S> {
    let mut t = Vec::with_capacity(spacings.len() + 1);
    t.push(S::zero());
    for &spacing in spacings {
        let last = t[t.len() - 1];
        t.push(last + spacing);
    }
    let offset = t[origin.min(t.len() - 1)];
    t.iter().map(|&value| value - offset).collect()
}

/// Derivative at `current` of the quadratic through the three neighbours
/// placed `dt_prev` and `dt_next` apart in t (non-uniform Catmull-Rom rule).
/// For unit spacing this is `(next - prev) / 2`.
pub(crate) fn finite_difference<P: Point>(
    prev: P,
    current: P,
    next: P,
    dt_prev: P::Scalar,
    dt_next: P::Scalar,
) -> P {
    let incoming = (current - prev).scale(dt_prev.recip());
    let across = (next - prev).scale((dt_prev + dt_next).recip());
    let outgoing = (next - current).scale(dt_next.recip());
    incoming - across + outgoing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PointN;
    use approx::assert_relative_eq;

    #[test]
    fn uniform_spacing_ignores_distance() {
        let a = PointN::new([0.0f64, 0.0]);
        let b = PointN::new([3.0f64, 4.0]);
        assert_eq!(knot_spacing(&a, &b, 0.0).unwrap(), 1.0);
        assert_relative_eq!(knot_spacing(&a, &b, 0.5).unwrap(), 5.0f64.sqrt());
        assert_relative_eq!(knot_spacing(&a, &b, 1.0).unwrap(), 5.0);
    }

    #[test]
    fn coincident_points_fail_with_alpha() {
        let a = PointN::new([1.0f64, 1.0]);
        assert!(knot_spacing(&a, &a, 0.0).is_ok());
        assert!(matches!(
            knot_spacing(&a, &a, 0.5),
            Err(SplineError::Numerical { .. })
        ));
    }

    #[test]
    fn looping_adds_closing_spacing() {
        let points = [0.0f64, 1.0, 3.0];
        assert_eq!(knot_spacings(&points, 1.0, false).unwrap(), vec![1.0, 2.0]);
        assert_eq!(knot_spacings(&points, 1.0, true).unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn cumulative_is_shifted_to_origin() {
        assert_eq!(cumulative_t(&[1.0f64, 2.0, 3.0], 0), vec![0.0, 1.0, 3.0, 6.0]);
        assert_eq!(cumulative_t(&[1.0f64, 2.0, 3.0], 1), vec![-1.0, 0.0, 2.0, 5.0]);
    }

    #[test]
    fn parameter_validation() {
        assert!(validate_alpha(0.5f64).is_ok());
        assert!(validate_alpha(-0.1f64).is_err());
        assert!(validate_alpha(f64::NAN).is_err());
        assert!(validate_tension(f64::INFINITY).is_err());
        assert!(matches!(
            validate_points("test", &[1.0f64, 2.0], 3),
            Err(SplineError::TooFewPoints { required: 3, actual: 2, .. })
        ));
        assert!(validate_points("test", &[1.0f64, f64::NAN, 2.0], 3).is_err());
    }

    #[test]
    fn finite_difference_is_exact_for_quadratics() {
        // q(t) = t^2 sampled at t = -1, 0, 2 has derivative 0 at t = 0
        let d = finite_difference(1.0f64, 0.0, 4.0, 1.0, 2.0);
        assert_relative_eq!(d, 0.0, epsilon = 1e-12);
        // unit spacing reduces to central differences
        let d = finite_difference(1.0f64, 5.0, 3.0, 1.0, 1.0);
        assert_relative_eq!(d, 1.0, epsilon = 1e-12);
    }
}

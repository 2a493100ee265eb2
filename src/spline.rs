//! spline.rs
//! Trait for common abstractions over all spline types and the value bundles they return.
use num_traits::{Float, Zero};

use crate::error::{Result, SplineError};
use crate::quadrature::integrate_scalar;
use crate::Point;

/// Position and first derivative at some t.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tangent<P> {
    pub position: P,
    pub tangent: P,
}

/// Position, first and second derivative at some t.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curvature<P> {
    pub position: P,
    pub tangent: P,
    pub curvature: P,
}

/// Position and the first three derivatives at some t.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wiggle<P> {
    pub position: P,
    pub tangent: P,
    pub curvature: P,
    pub wiggle: P,
}

/// Evaluation contract implemented by every spline variant.
///
/// A spline is a sequence of polynomial segments joined at strictly increasing
/// breakpoints, the first of which is always `0` and the last `max_t()`.
/// Every query clamps its parameter to `[0, max_t()]`, so evaluating outside of the
/// domain returns the value at the nearest end instead of failing.
///
/// Splines are immutable once built; all queries are pure and may run concurrently.
///
/// ```rust
/// use strand::{CubicHermiteSpline, PointN, Spline};
///
/// let spline = CubicHermiteSpline::new(vec![
///     PointN::new([0.0, 0.0]),
///     PointN::new([1.0, 0.0]),
///     PointN::new([2.0, 1.0]),
///     PointN::new([3.0, 1.0]),
///     PointN::new([4.0, 0.0]),
/// ])
/// .unwrap();
///
/// // the first and last point only shape the tangents
/// assert_eq!(spline.segment_count(), 2);
/// assert_eq!(spline.position(0.0), PointN::new([1.0, 0.0]));
/// assert_eq!(spline.position(spline.max_t()), PointN::new([3.0, 1.0]));
/// assert_eq!(spline.position(-5.0), spline.position(0.0));
/// assert!(spline.total_length() > 2.0);
/// ```
pub trait Spline<P: Point> {
    /// The control points the spline was built from.
    fn points(&self) -> &[P];

    /// The t value associated with control point `index`. Points that only pad the
    /// basis (they shape the curve without being interpolated) lie outside `[0, max_t]`.
    fn t(&self, index: usize) -> Result<P::Scalar>;

    /// Segment boundaries, `segment_count() + 1` strictly increasing values from 0 to `max_t()`.
    fn breakpoints(&self) -> &[P::Scalar];

    /// True if the curve closes back onto its first point.
    fn is_looping(&self) -> bool;

    fn position(&self, t: P::Scalar) -> P;

    fn tangent(&self, t: P::Scalar) -> Tangent<P>;

    fn curvature(&self, t: P::Scalar) -> Curvature<P>;

    fn wiggle(&self, t: P::Scalar) -> Wiggle<P>;

    /// Arc length of the whole curve, computed once at construction.
    fn total_length(&self) -> P::Scalar;

    fn max_t(&self) -> P::Scalar {
        self.breakpoints()
            .last()
            .copied()
            .unwrap_or_else(P::Scalar::zero)
    }

    fn segment_count(&self) -> usize {
        self.breakpoints().len().saturating_sub(1)
    }

    /// The t value where segment `index` begins; `segment_t(segment_count())` is `max_t()`.
    fn segment_t(&self, index: usize) -> Result<P::Scalar> {
        let breakpoints = self.breakpoints();
        breakpoints
            .get(index)
            .copied()
            .ok_or(SplineError::IndexOutOfRange {
                index,
                len: breakpoints.len(),
            })
    }

    /// Clamp `t` into the domain `[0, max_t()]`.
    fn clamp_t(&self, t: P::Scalar) -> P::Scalar {
        t.max(P::Scalar::zero()).min(self.max_t())
    }

    /// Index of the segment containing `t`, found by binary search over the breakpoints.
    /// Saturates at the first and last segment.
    fn segment_for_t(&self, t: P::Scalar) -> usize {
        let t = self.clamp_t(t);
        let span = self.breakpoints().partition_point(|&knot| knot <= t);
        span.saturating_sub(1)
            .min(self.segment_count().saturating_sub(1))
    }

    /// Curve speed `|tangent(t)|`.
    fn speed(&self, t: P::Scalar) -> P::Scalar {
        self.tangent(t).tangent.length()
    }

    /// Arc length between `a` and `b`, integrated with Gauss-Legendre quadrature segment by segment.
    /// Both ends are clamped to the domain; `arc_length(a, b) == -arc_length(b, a)`.
    fn arc_length(&self, a: P::Scalar, b: P::Scalar) -> P::Scalar {
        if b < a {
            return -self.arc_length(b, a);
        }
        let a = self.clamp_t(a);
        let b = self.clamp_t(b);

        let first = self.segment_for_t(a);
        let last = self.segment_for_t(b);
        let speed = |t| self.speed(t);
        if first == last {
            return integrate_scalar(speed, a, b);
        }

        // split at every breakpoint in between so each integral sees a smooth integrand
        let breakpoints = self.breakpoints();
        let mut length = integrate_scalar(speed, a, breakpoints[first + 1]);
        for segment in first + 1..last {
            length = length + integrate_scalar(speed, breakpoints[segment], breakpoints[segment + 1]);
        }
        length + integrate_scalar(speed, breakpoints[last], b)
    }
}

/// Look up `index` in a per-point t table.
pub(crate) fn point_t<S: Copy>(table: &[S], index: usize) -> Result<S> {
    table.get(index).copied().ok_or(SplineError::IndexOutOfRange {
        index,
        len: table.len(),
    })
}

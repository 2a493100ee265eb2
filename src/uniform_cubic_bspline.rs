use num_traits::Zero;

use crate::error::Result;
use crate::parameterization::validate_points;
use crate::segment::PolynomialSegment;
use crate::spline::{point_t, Curvature, Spline, Tangent, Wiggle};
use crate::{lit, NativeFloat, Point};

const VARIANT: &str = "uniform cubic B-spline";

/// Uniform cubic B-spline. Each segment blends four consecutive control points with the
/// cubic B-spline basis matrix
/// ```text
///          1 | -1  3 -3  1 |
/// P(u) =  ---|  3 -6  3  0 | [p0 p1 p2 p3]
///          6 | -3  0  3  0 |
///            |  1  4  1  0 |
/// ```
/// so the curve is C2 everywhere but does not pass through the control points.
/// With N points there are N - 3 segments, each spanning one unit of t; the first point
/// has t = -1 and segment i starts near point i + 1.
/// The looping variant wraps the window around the point list and has N segments.
#[derive(Debug, Clone)]
pub struct UniformCubicBSpline<P: Point> {
    points: Vec<P>,
    point_t: Vec<P::Scalar>,
    breakpoints: Vec<P::Scalar>,
    segments: Vec<PolynomialSegment<P, 4>>,
    total_length: P::Scalar,
    looping: bool,
}

impl<P: Point> UniformCubicBSpline<P> {
    /// Build an open uniform cubic B-spline, which needs at least 4 control points.
    pub fn new(points: Vec<P>) -> Result<Self> {
        Self::build(points, false)
    }

    /// Build a closed uniform cubic B-spline, which needs at least 3 control points.
    pub fn looping(points: Vec<P>) -> Result<Self> {
        Self::build(points, true)
    }

    fn build(points: Vec<P>, looping: bool) -> Result<Self> {
        validate_points(VARIANT, &points, if looping { 3 } else { 4 })?;

        let n = points.len();
        let (segment_count, first_t) = if looping { (n, 0.0) } else { (n - 3, -1.0) };
        let window = |segment: usize, offset: usize| {
            if looping {
                points[(segment + n - 1 + offset) % n]
            } else {
                points[segment + offset]
            }
        };

        let segments = (0..segment_count)
            .map(|i| {
                PolynomialSegment::new(
                    basis_coefficients(window(i, 0), window(i, 1), window(i, 2), window(i, 3)),
                    lit(i as NativeFloat),
                    lit((i + 1) as NativeFloat),
                )
            })
            .collect();

        let mut spline = UniformCubicBSpline {
            point_t: (0..n).map(|i| lit(first_t + i as NativeFloat)).collect(),
            breakpoints: (0..=segment_count).map(|i| lit(i as NativeFloat)).collect(),
            points,
            segments,
            total_length: P::Scalar::zero(),
            looping,
        };
        spline.total_length = spline.arc_length(P::Scalar::zero(), spline.max_t());

        log::debug!(
            "built {} with {} segments (looping: {})",
            VARIANT,
            segment_count,
            looping
        );
        Ok(spline)
    }

    fn segment(&self, t: P::Scalar) -> &PolynomialSegment<P, 4> {
        &self.segments[self.segment_for_t(t)]
    }
}

/// Power basis coefficients of the uniform cubic B-spline piece over `p0..p3`.
fn basis_coefficients<P: Point>(p0: P, p1: P, p2: P, p3: P) -> [P; 4] {
    let sixth: P::Scalar = lit(1.0 / 6.0);
    let half: P::Scalar = lit(0.5);
    [
        (p0 + p1.scale(lit(4.0)) + p2).scale(sixth),
        (p2 - p0).scale(half),
        (p0 - p1.scale(lit(2.0)) + p2).scale(half),
        (p3 - p0 + (p1 - p2).scale(lit(3.0))).scale(sixth),
    ]
}

impl<P: Point> Spline<P> for UniformCubicBSpline<P> {
    fn points(&self) -> &[P] {
        &self.points
    }

    fn t(&self, index: usize) -> Result<P::Scalar> {
        point_t(&self.point_t, index)
    }

    fn breakpoints(&self) -> &[P::Scalar] {
        &self.breakpoints
    }

    fn is_looping(&self) -> bool {
        self.looping
    }

    fn position(&self, t: P::Scalar) -> P {
        self.segment(t).position(self.clamp_t(t))
    }

    fn tangent(&self, t: P::Scalar) -> Tangent<P> {
        self.segment(t).tangent(self.clamp_t(t))
    }

    fn curvature(&self, t: P::Scalar) -> Curvature<P> {
        self.segment(t).curvature(self.clamp_t(t))
    }

    fn wiggle(&self, t: P::Scalar) -> Wiggle<P> {
        self.segment(t).wiggle(self.clamp_t(t))
    }

    fn total_length(&self) -> P::Scalar {
        self.total_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PointN, SplineError, EPSILON};

    fn points() -> Vec<PointN<f64, 2>> {
        vec![
            PointN::new([-4.0, -1.0]),
            PointN::new([0.0, 1.0]),
            PointN::new([1.0, 3.0]),
            PointN::new([6.0, -4.0]),
            PointN::new([5.0, 0.0]),
        ]
    }

    #[test]
    fn segment_layout() {
        let spline = UniformCubicBSpline::new(points()).unwrap();
        assert_eq!(spline.segment_count(), 2);
        assert_eq!(spline.max_t(), 2.0);
        assert_eq!(spline.t(0).unwrap(), -1.0);
        assert_eq!(spline.t(1).unwrap(), 0.0);
        assert_eq!(spline.t(4).unwrap(), 3.0);
        assert_eq!(
            spline.t(5),
            Err(SplineError::IndexOutOfRange { index: 5, len: 5 })
        );
        assert!(!spline.is_looping());
    }

    #[test]
    fn starts_at_basis_blend() {
        let p = points();
        let spline = UniformCubicBSpline::new(p.clone()).unwrap();
        let expected = (p[0] + p[1].scale(4.0) + p[2]).scale(1.0 / 6.0);
        assert!((spline.position(0.0) - expected).squared_length() < EPSILON);
    }

    #[test]
    fn curvature_is_continuous_across_breakpoints() {
        let spline = UniformCubicBSpline::new(points()).unwrap();
        let left = spline.segments[0].curvature(1.0);
        let right = spline.segments[1].curvature(1.0);
        assert!((left.position - right.position).squared_length() < EPSILON);
        assert!((left.tangent - right.tangent).squared_length() < EPSILON);
        assert!((left.curvature - right.curvature).squared_length() < EPSILON);
    }

    #[test]
    fn looping_closes_smoothly() {
        let spline = UniformCubicBSpline::looping(points()).unwrap();
        assert_eq!(spline.segment_count(), 5);
        assert!(spline.is_looping());
        let start = spline.segments[0].curvature(0.0);
        let end = spline.segments[4].curvature(5.0);
        assert!((start.position - end.position).squared_length() < EPSILON);
        assert!((start.tangent - end.tangent).squared_length() < EPSILON);
        assert!((start.curvature - end.curvature).squared_length() < EPSILON);
    }

    #[test]
    fn too_few_points() {
        let err = UniformCubicBSpline::new(points()[..3].to_vec()).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(UniformCubicBSpline::looping(points()[..3].to_vec()).is_ok());
        assert!(UniformCubicBSpline::looping(points()[..2].to_vec()).is_err());
    }
}

use num_traits::Zero;

use crate::error::Result;
use crate::parameterization::validate_points;
use crate::segment::PolynomialSegment;
use crate::spline::{point_t, Curvature, Spline, Tangent, Wiggle};
use crate::{lit, NativeFloat, Point};

const VARIANT: &str = "uniform Catmull-Rom spline";

/// Uniform Catmull-Rom spline, the classic
/// ```text
///          1 | -1  3 -3  1 |
/// P(u) =  ---|  2 -5  4 -1 | [p0 p1 p2 p3]
///          2 | -1  0  1  0 |
///            |  0  2  0  0 |
/// ```
/// basis over four consecutive points. It interpolates every point but the first and
/// the last (N - 3 segments, point 1 at t = 0) and is C1.
/// Same curve as a [`CubicHermiteSpline`](crate::CubicHermiteSpline) with default
/// options, without the knot bookkeeping.
#[derive(Debug, Clone)]
pub struct UniformCRSpline<P: Point> {
    points: Vec<P>,
    point_t: Vec<P::Scalar>,
    breakpoints: Vec<P::Scalar>,
    segments: Vec<PolynomialSegment<P, 4>>,
    total_length: P::Scalar,
    looping: bool,
}

impl<P: Point> UniformCRSpline<P> {
    /// Open curve, needs at least 4 points.
    pub fn new(points: Vec<P>) -> Result<Self> {
        Self::build(points, false)
    }

    /// Closed curve through all points, needs at least 3.
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

        let mut spline = UniformCRSpline {
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

fn basis_coefficients<P: Point>(p0: P, p1: P, p2: P, p3: P) -> [P; 4] {
    let half: P::Scalar = lit(0.5);
    [
        p1,
        (p2 - p0).scale(half),
        p0 - p1.scale(lit(2.5)) + p2.scale(lit(2.0)) - p3.scale(half),
        (p3 - p0).scale(half) + (p1 - p2).scale(lit(1.5)),
    ]
}

impl<P: Point> Spline<P> for UniformCRSpline<P> {
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
    use crate::{PointN, EPSILON};
    use approx::assert_relative_eq;

    fn points() -> Vec<PointN<f64, 2>> {
        vec![
            PointN::new([0.0, 0.0]),
            PointN::new([1.0, 2.0]),
            PointN::new([3.0, 3.0]),
            PointN::new([4.0, 1.0]),
            PointN::new([6.0, 0.0]),
        ]
    }

    #[test]
    fn passes_through_inner_points() {
        let spline = UniformCRSpline::new(points()).unwrap();
        assert_eq!(spline.segment_count(), 2);
        for i in 1..=3 {
            let t = spline.t(i).unwrap();
            assert_eq!(t, (i - 1) as f64);
            assert!((spline.position(t) - points()[i]).squared_length() < EPSILON);
        }
    }

    #[test]
    fn tangent_is_central_difference() {
        let p = points();
        let spline = UniformCRSpline::new(p.clone()).unwrap();
        let expected = (p[3] - p[1]).scale(0.5);
        assert!((spline.tangent(1.0).tangent - expected).squared_length() < EPSILON);
    }

    #[test]
    fn scalar_curve() {
        let spline = UniformCRSpline::new(vec![0.0f64, 1.0, 4.0, 9.0, 16.0]).unwrap();
        // a quadratic is reproduced exactly by Catmull-Rom with unit spacing
        assert_relative_eq!(spline.position(0.5), 2.25, epsilon = 1e-12);
        assert_relative_eq!(spline.tangent(0.5).tangent, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn looping_closes() {
        let spline = UniformCRSpline::looping(points()).unwrap();
        assert_eq!(spline.segment_count(), 5);
        assert_eq!(spline.t(0).unwrap(), 0.0);
        assert!((spline.position(5.0) - points()[0]).squared_length() < EPSILON);
        let start = spline.segments[0].tangent(0.0);
        let end = spline.segments[4].tangent(5.0);
        assert!((start.tangent - end.tangent).squared_length() < EPSILON);
    }
}

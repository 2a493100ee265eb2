use num_traits::Zero;

use crate::cubic_hermite::hermite_tangents;
use crate::error::Result;
use crate::options::HermiteOptions;
use crate::parameterization::{
    cumulative_t, finite_difference, knot_spacings, validate_alpha, validate_points,
    validate_tension,
};
use crate::segment::PolynomialSegment;
use crate::spline::{point_t, Curvature, Spline, Tangent, Wiggle};
use crate::{lit, Point};

const VARIANT: &str = "quintic Hermite spline";

/// Quintic Hermite spline. Like [`CubicHermiteSpline`](crate::CubicHermiteSpline) the
/// tangents are finite differences of the points, and the second derivatives are finite
/// differences of the tangents, so every joint matches position, tangent and curvature.
///
/// Two points at each end of an open curve only pad the differences: N points give
/// N - 5 segments and point 2 sits at t = 0. Looping curves have N segments.
#[derive(Debug, Clone)]
pub struct QuinticHermiteSpline<P: Point> {
    points: Vec<P>,
    point_t: Vec<P::Scalar>,
    breakpoints: Vec<P::Scalar>,
    segments: Vec<PolynomialSegment<P, 6>>,
    total_length: P::Scalar,
    looping: bool,
}

impl<P: Point> QuinticHermiteSpline<P> {
    /// Uniform spacing, needs at least 6 points.
    pub fn new(points: Vec<P>) -> Result<Self> {
        Self::with_options(points, HermiteOptions::default())
    }

    pub fn with_alpha(points: Vec<P>, alpha: P::Scalar) -> Result<Self> {
        Self::with_options(points, HermiteOptions::default().with_alpha(alpha))
    }

    pub fn with_options(points: Vec<P>, options: HermiteOptions<P::Scalar>) -> Result<Self> {
        validate_alpha(options.alpha)?;
        validate_tension(options.tension)?;
        validate_points(VARIANT, &points, if options.looping { 3 } else { 6 })?;

        let n = points.len();
        let looping = options.looping;
        let spacings = knot_spacings(&points, options.alpha, looping)?;
        let tangents = hermite_tangents(&points, &spacings, options.tension, looping);
        let accelerations = accelerations(&tangents, &spacings, looping);

        let (point_t, breakpoints, first) = if looping {
            let knots = cumulative_t(&spacings, 0);
            (knots[..n].to_vec(), knots, 0)
        } else {
            let knots = cumulative_t(&spacings, 2);
            let breakpoints = knots[2..n - 2].to_vec();
            (knots, breakpoints, 2)
        };

        let segments = (0..breakpoints.len() - 1)
            .map(|j| {
                let i0 = j + first;
                let i1 = (i0 + 1) % n;
                let h = spacings[i0];
                let h2 = h * h;
                PolynomialSegment::new(
                    quintic_coefficients(
                        points[i0],
                        points[i1],
                        tangents[i0].scale(h),
                        tangents[i1].scale(h),
                        accelerations[i0].scale(h2),
                        accelerations[i1].scale(h2),
                    ),
                    breakpoints[j],
                    breakpoints[j + 1],
                )
            })
            .collect();

        let mut spline = QuinticHermiteSpline {
            points,
            point_t,
            breakpoints,
            segments,
            total_length: P::Scalar::zero(),
            looping,
        };
        spline.total_length = spline.arc_length(P::Scalar::zero(), spline.max_t());

        log::debug!(
            "built {} with {} segments (looping: {})",
            VARIANT,
            spline.segment_count(),
            looping
        );
        Ok(spline)
    }

    fn segment(&self, t: P::Scalar) -> &PolynomialSegment<P, 6> {
        &self.segments[self.segment_for_t(t)]
    }
}

/// Second derivatives from the tangents, with the same finite difference rule that produced them.
/// Open curves leave the two outermost points on each side at zero.
fn accelerations<P: Point>(tangents: &[P], spacings: &[P::Scalar], looping: bool) -> Vec<P> {
    let n = tangents.len();
    (0..n)
        .map(|i| {
            if !looping && (i < 2 || i + 2 >= n) {
                return tangents[i].scale(P::Scalar::zero());
            }
            let prev = (i + n - 1) % n;
            let next = (i + 1) % n;
            finite_difference(
                tangents[prev],
                tangents[i],
                tangents[next],
                spacings[prev],
                spacings[i],
            )
        })
        .collect()
}

/// Power basis coefficients of the quintic matching position `p`, derivative `v` and
/// second derivative `a` at both ends, all with respect to the local parameter.
fn quintic_coefficients<P: Point>(p0: P, p1: P, v0: P, v1: P, a0: P, a1: P) -> [P; 6] {
    let half: P::Scalar = lit(0.5);
    let x = p1 - p0 - v0 - a0.scale(half);
    let y = v1 - v0 - a0;
    let z = a1 - a0;
    [
        p0,
        v0,
        a0.scale(half),
        x.scale(lit(10.0)) - y.scale(lit(4.0)) + z.scale(half),
        y.scale(lit(7.0)) - x.scale(lit(15.0)) - z,
        x.scale(lit(6.0)) - y.scale(lit(3.0)) + z.scale(half),
    ]
}

impl<P: Point> Spline<P> for QuinticHermiteSpline<P> {
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
            PointN::new([2.0, 2.0]),
            PointN::new([-1.0, 4.0]),
        ]
    }

    #[test]
    fn segment_layout() {
        let spline = QuinticHermiteSpline::with_alpha(points(), 0.5).unwrap();
        assert_eq!(spline.segment_count(), 2);
        assert_eq!(spline.t(2).unwrap(), 0.0);
        assert!(spline.t(1).unwrap() < 0.0);
        assert!(spline.t(5).unwrap() > spline.max_t());
        assert_eq!(spline.t(4).unwrap(), spline.max_t());
    }

    #[test]
    fn interpolates_inner_points() {
        for alpha in [0.0, 0.5, 1.0] {
            let spline = QuinticHermiteSpline::with_alpha(points(), alpha).unwrap();
            for i in 2..=4 {
                let t = spline.t(i).unwrap();
                assert!((spline.position(t) - points()[i]).squared_length() < EPSILON);
            }
        }
    }

    #[test]
    fn curvature_is_continuous() {
        let spline = QuinticHermiteSpline::with_alpha(points(), 1.0).unwrap();
        let t = spline.breakpoints()[1];
        let left = spline.segments[0].curvature(t);
        let right = spline.segments[1].curvature(t);
        assert!((left.position - right.position).squared_length() < EPSILON);
        assert!((left.tangent - right.tangent).squared_length() < 1e-8);
        assert!((left.curvature - right.curvature).squared_length() < 1e-8);
    }

    #[test]
    fn looping_is_c2_at_the_seam() {
        let options = HermiteOptions::default().looping(true);
        let spline = QuinticHermiteSpline::with_options(points(), options).unwrap();
        assert_eq!(spline.segment_count(), 7);
        let start = spline.segments[0].curvature(0.0);
        let end = spline.segments[6].curvature(spline.max_t());
        assert!((start.position - end.position).squared_length() < EPSILON);
        assert!((start.tangent - end.tangent).squared_length() < 1e-8);
        assert!((start.curvature - end.curvature).squared_length() < 1e-8);
    }

    #[test]
    fn too_few_points() {
        assert!(matches!(
            QuinticHermiteSpline::new(points()[..5].to_vec()),
            Err(SplineError::TooFewPoints { required: 6, actual: 5, .. })
        ));
        assert!(QuinticHermiteSpline::new(points()[..6].to_vec()).is_ok());
    }
}

use num_traits::{One, Zero};

use crate::error::Result;
use crate::options::HermiteOptions;
use crate::parameterization::{
    cumulative_t, finite_difference, knot_spacings, validate_alpha, validate_points,
    validate_tension,
};
use crate::segment::PolynomialSegment;
use crate::spline::{point_t, Curvature, Spline, Tangent, Wiggle};
use crate::{lit, Point};

const VARIANT: &str = "cubic Hermite spline";

/// Cubic Hermite spline with tangents estimated from the neighbouring points
/// (Catmull-Rom style, generalized to non-uniform knot spacing and tension).
///
/// The open curve interpolates every point except the first and the last, which only
/// shape the end tangents: N points give N - 3 segments and the first interpolated point
/// sits at t = 0. The looping curve interpolates all N points with N segments.
///
/// Curves are C1: position and tangent agree at every joint, curvature generally jumps.
#[derive(Debug, Clone)]
pub struct CubicHermiteSpline<P: Point> {
    points: Vec<P>,
    point_t: Vec<P::Scalar>,
    breakpoints: Vec<P::Scalar>,
    segments: Vec<PolynomialSegment<P, 4>>,
    total_length: P::Scalar,
    looping: bool,
}

impl<P: Point> CubicHermiteSpline<P> {
    /// Uniform Catmull-Rom tangents, needs at least 4 points.
    pub fn new(points: Vec<P>) -> Result<Self> {
        Self::with_options(points, HermiteOptions::default())
    }

    /// Knot spacing `|p[i+1] - p[i]|^alpha`; 0.5 gives the centripetal Catmull-Rom curve.
    pub fn with_alpha(points: Vec<P>, alpha: P::Scalar) -> Result<Self> {
        Self::with_options(points, HermiteOptions::default().with_alpha(alpha))
    }

    pub fn with_options(points: Vec<P>, options: HermiteOptions<P::Scalar>) -> Result<Self> {
        validate_alpha(options.alpha)?;
        validate_tension(options.tension)?;
        validate_points(VARIANT, &points, if options.looping { 3 } else { 4 })?;

        let n = points.len();
        let looping = options.looping;
        let spacings = knot_spacings(&points, options.alpha, looping)?;
        let tangents = hermite_tangents(&points, &spacings, options.tension, looping);

        let (point_t, breakpoints, first) = if looping {
            let knots = cumulative_t(&spacings, 0);
            (knots[..n].to_vec(), knots, 0)
        } else {
            let knots = cumulative_t(&spacings, 1);
            let breakpoints = knots[1..n - 1].to_vec();
            (knots, breakpoints, 1)
        };

        let segments = (0..breakpoints.len() - 1)
            .map(|j| {
                let i0 = j + first;
                let i1 = (i0 + 1) % n;
                let h = spacings[i0];
                PolynomialSegment::new(
                    hermite_coefficients(
                        points[i0],
                        points[i1],
                        tangents[i0].scale(h),
                        tangents[i1].scale(h),
                    ),
                    breakpoints[j],
                    breakpoints[j + 1],
                )
            })
            .collect();

        let mut spline = CubicHermiteSpline {
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

    fn segment(&self, t: P::Scalar) -> &PolynomialSegment<P, 4> {
        &self.segments[self.segment_for_t(t)]
    }
}

/// Tangent (derivative with respect to t) at every point that has two neighbours.
/// Open curves get zero placeholders at both ends, they are never read.
pub(crate) fn hermite_tangents<P: Point>(
    points: &[P],
    spacings: &[P::Scalar],
    tension: P::Scalar,
    looping: bool,
) -> Vec<P> {
    let n = points.len();
    let factor = P::Scalar::one() - tension;
    (0..n)
        .map(|i| {
            if !looping && (i == 0 || i == n - 1) {
                return points[i].scale(P::Scalar::zero());
            }
            let prev = (i + n - 1) % n;
            let next = (i + 1) % n;
            finite_difference(points[prev], points[i], points[next], spacings[prev], spacings[i])
                .scale(factor)
        })
        .collect()
}

/// Power basis coefficients of the cubic with end points `p0`, `p1` and end
/// derivatives `v0`, `v1` with respect to the local parameter.
fn hermite_coefficients<P: Point>(p0: P, p1: P, v0: P, v1: P) -> [P; 4] {
    [
        p0,
        v0,
        (p1 - p0).scale(lit(3.0)) - v0.scale(lit(2.0)) - v1,
        (p0 - p1).scale(lit(2.0)) + v0 + v1,
    ]
}

impl<P: Point> Spline<P> for CubicHermiteSpline<P> {
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

//! Natural cubic splines.
//!
//! A natural spline interpolates every control point with cubic pieces whose second
//! derivatives agree at the joints. The second derivatives `M[i]` at the points come from
//! one global linear system; for segment spacings `h[i]`:
//! ```text
//! h[i-1] M[i-1] + 2 (h[i-1] + h[i]) M[i] + h[i] M[i+1] = 6 ((p[i+1] - p[i]) / h[i] - (p[i] - p[i-1]) / h[i-1])
//! ```
//! Open curves set `M` to zero at both ends (the "natural" end condition) and solve a
//! tridiagonal system, looping curves wrap the indices and solve a cyclic one.

use num_traits::{Float, Zero};

use crate::error::Result;
use crate::options::NaturalOptions;
use crate::parameterization::{cumulative_t, knot_spacings, validate_alpha, validate_points};
use crate::segment::PolynomialSegment;
use crate::spline::{point_t, Curvature, Spline, Tangent, Wiggle};
use crate::tridiagonal::{solve_cyclic_tridiagonal, solve_tridiagonal};
use crate::{lit, Point};

const VARIANT: &str = "natural spline";

/// C2 interpolating cubic spline with natural or periodic end conditions.
///
/// ```rust
/// use strand::{NaturalOptions, NaturalSpline, Point, PointN, Spline};
///
/// let points = vec![
///     PointN::new([0.0f64, 0.0]),
///     PointN::new([2.0, 1.0]),
///     PointN::new([3.0, 3.0]),
///     PointN::new([1.0, 4.0]),
/// ];
/// let open = NaturalSpline::new(points.clone()).unwrap();
/// assert_eq!(open.segment_count(), 3);
///
/// let closed = NaturalSpline::with_options(points, NaturalOptions::default().looping(true)).unwrap();
/// assert_eq!(closed.segment_count(), 4);
/// assert!((closed.position(closed.max_t()) - closed.position(0.0)).length() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct NaturalSpline<P: Point> {
    points: Vec<P>,
    point_t: Vec<P::Scalar>,
    breakpoints: Vec<P::Scalar>,
    segments: Vec<PolynomialSegment<P, 4>>,
    total_length: P::Scalar,
    looping: bool,
}

impl<P: Point> NaturalSpline<P> {
    /// Open natural spline with uniform spacing, needs at least 3 points.
    pub fn new(points: Vec<P>) -> Result<Self> {
        Self::with_options(points, NaturalOptions::default())
    }

    /// Open natural spline with `|p[i+1] - p[i]|^alpha` spacing.
    pub fn with_alpha(points: Vec<P>, alpha: P::Scalar) -> Result<Self> {
        Self::with_options(points, NaturalOptions::default().with_alpha(alpha))
    }

    pub fn with_options(points: Vec<P>, options: NaturalOptions<P::Scalar>) -> Result<Self> {
        validate_alpha(options.alpha)?;
        validate_points(VARIANT, &points, 3)?;

        let n = points.len();
        let looping = options.looping;
        let spacings = knot_spacings(&points, options.alpha, looping)?;
        let knots = cumulative_t(&spacings, 0);

        let curvatures = if looping {
            periodic_curvatures(&points, &spacings)?
        } else {
            natural_curvatures(&points, &spacings)?
        };

        let sixth: P::Scalar = lit(1.0 / 6.0);
        let half: P::Scalar = lit(0.5);
        let segments = spacings
            .iter()
            .enumerate()
            .map(|(i, &h)| {
                let next = (i + 1) % n;
                let (p0, p1) = (points[i], points[next]);
                let (m0, m1) = (curvatures[i], curvatures[next]);
                let h2 = h * h;
                PolynomialSegment::new(
                    [
                        p0,
                        (p1 - p0) - (m0.scale(lit(2.0)) + m1).scale(h2 * sixth),
                        m0.scale(h2 * half),
                        (m1 - m0).scale(h2 * sixth),
                    ],
                    knots[i],
                    knots[i + 1],
                )
            })
            .collect();

        let mut spline = NaturalSpline {
            point_t: knots[..n].to_vec(),
            breakpoints: knots,
            points,
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

/// Second derivatives with zero curvature at both ends.
fn natural_curvatures<P: Point>(points: &[P], spacings: &[P::Scalar]) -> Result<Vec<P>> {
    let n = points.len();
    let interior = n - 2;
    let mut lower = Vec::with_capacity(interior);
    let mut diag = Vec::with_capacity(interior);
    let mut upper = Vec::with_capacity(interior);
    let mut rhs = Vec::with_capacity(interior);
    for i in 1..n - 1 {
        let (h_prev, h_next) = (spacings[i - 1], spacings[i]);
        lower.push(h_prev);
        diag.push((h_prev + h_next) * lit(2.0));
        upper.push(h_next);
        rhs.push(curvature_rhs(points[i - 1], points[i], points[i + 1], h_prev, h_next));
    }

    let zero = points[0].scale(P::Scalar::zero());
    let mut curvatures = Vec::with_capacity(n);
    curvatures.push(zero);
    curvatures.extend(solve_tridiagonal(&lower, &diag, &upper, &rhs)?);
    curvatures.push(zero);
    Ok(curvatures)
}

/// Second derivatives of the closed curve through `points`, `spacings[n-1]` closes the loop.
fn periodic_curvatures<P: Point>(points: &[P], spacings: &[P::Scalar]) -> Result<Vec<P>> {
    let n = points.len();
    let mut lower = Vec::with_capacity(n);
    let mut diag = Vec::with_capacity(n);
    let mut upper = Vec::with_capacity(n);
    let mut rhs = Vec::with_capacity(n);
    for i in 0..n {
        let prev = (i + n - 1) % n;
        let next = (i + 1) % n;
        let (h_prev, h_next) = (spacings[prev], spacings[i]);
        lower.push(h_prev);
        diag.push((h_prev + h_next) * lit(2.0));
        upper.push(h_next);
        rhs.push(curvature_rhs(points[prev], points[i], points[next], h_prev, h_next));
    }
    solve_cyclic_tridiagonal(&lower, &diag, &upper, &rhs)
}

fn curvature_rhs<P: Point>(prev: P, current: P, next: P, h_prev: P::Scalar, h_next: P::Scalar) -> P {
    ((next - current).scale(h_next.recip()) - (current - prev).scale(h_prev.recip())).scale(lit(6.0))
}

impl<P: Point> Spline<P> for NaturalSpline<P> {
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
    use approx::assert_relative_eq;

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
    fn interpolates_every_point() {
        for alpha in [0.0, 0.5, 1.0] {
            let spline = NaturalSpline::with_alpha(points(), alpha).unwrap();
            for (i, point) in points().iter().enumerate() {
                let t = spline.t(i).unwrap();
                assert!((spline.position(t) - *point).squared_length() < EPSILON);
            }
        }
    }

    #[test]
    fn chordal_spacing_follows_distances() {
        let spline = NaturalSpline::with_alpha(points(), 1.0).unwrap();
        let p = points();
        assert_eq!(spline.t(0).unwrap(), 0.0);
        assert_relative_eq!(spline.t(1).unwrap(), p[0].distance(&p[1]));
        assert_relative_eq!(spline.max_t(), p.windows(2).map(|w| w[0].distance(&w[1])).sum::<f64>());
    }

    #[test]
    fn natural_ends_have_zero_curvature() {
        let spline = NaturalSpline::new(points()).unwrap();
        assert!(spline.curvature(0.0).curvature.squared_length() < EPSILON);
        assert!(spline.curvature(spline.max_t()).curvature.squared_length() < EPSILON);
    }

    #[test]
    fn second_derivative_is_continuous() {
        let spline = NaturalSpline::with_alpha(points(), 0.5).unwrap();
        for i in 1..spline.segment_count() {
            let t = spline.breakpoints()[i];
            let left = spline.segments[i - 1].curvature(t);
            let right = spline.segments[i].curvature(t);
            assert!((left.position - right.position).squared_length() < EPSILON);
            assert!((left.tangent - right.tangent).squared_length() < 1e-8);
            assert!((left.curvature - right.curvature).squared_length() < 1e-8);
        }
    }

    #[test]
    fn looping_is_periodic() {
        let options = NaturalOptions::default().with_alpha(0.5).looping(true);
        let spline = NaturalSpline::with_options(points(), options).unwrap();
        assert!(spline.is_looping());
        assert_eq!(spline.segment_count(), points().len());
        assert_eq!(spline.points().len(), points().len());
        assert!(spline.t(points().len()).is_err());

        let last = spline.segment_count() - 1;
        let start = spline.segments[0].curvature(0.0);
        let end = spline.segments[last].curvature(spline.max_t());
        assert!((start.position - end.position).squared_length() < EPSILON);
        assert!((start.tangent - end.tangent).squared_length() < 1e-8);
        assert!((start.curvature - end.curvature).squared_length() < 1e-8);
    }

    #[test]
    fn straight_line_stays_straight() {
        let line: Vec<f64> = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let spline = NaturalSpline::new(line).unwrap();
        assert_relative_eq!(spline.position(2.5), 2.5, epsilon = 1e-12);
        assert_relative_eq!(spline.total_length(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn construction_errors() {
        assert!(matches!(
            NaturalSpline::new(points()[..2].to_vec()),
            Err(SplineError::TooFewPoints { required: 3, .. })
        ));
        assert!(matches!(
            NaturalSpline::with_alpha(points(), 1.5),
            Err(SplineError::InvalidParameter { name: "alpha", .. })
        ));
        let mut duplicated = points();
        duplicated.insert(2, duplicated[2]);
        assert!(matches!(
            NaturalSpline::with_alpha(duplicated.clone(), 0.5),
            Err(SplineError::Numerical { .. })
        ));
        // uniform spacing does not care about coincident points
        assert!(NaturalSpline::new(duplicated).is_ok());
    }
}

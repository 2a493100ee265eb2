use num_traits::{One, Zero};
use tinyvec::TinyVec;

use crate::error::{Result, SplineError};
use crate::parameterization::validate_points;
use crate::spline::{point_t, Curvature, Spline, Tangent, Wiggle};
use crate::{lit, NativeFloat, Point};

const VARIANT: &str = "generic B-spline";

/// Highest derivative order queried through the `Spline` trait (wiggle).
const MAX_DERIVATIVE: usize = 3;

/// B-spline of arbitrary degree over a uniform knot vector.
///
/// With `C` control points and degree `D` the knot vector has `K = C + D + 1` entries
/// `k[j] = j - D`, so the curve is defined over `[k[D], k[C]] = [0, C - D]` and has
/// `C - D` unit segments. Points and derivatives are evaluated with the Cox-de Boor
/// recursion for the nonzero basis functions and their derivatives, no finite differencing.
///
/// The curve is C(D-1) continuous and does not interpolate its control points. The t value
/// of control point `i` is its Greville abscissa `i - (D - 1) / 2`.
///
/// ```rust
/// use strand::{GenericBSpline, PointN, Spline};
///
/// let points = vec![
///     PointN::new([0.0, 0.0]),
///     PointN::new([1.0, 2.0]),
///     PointN::new([3.0, 2.0]),
///     PointN::new([4.0, 0.0]),
///     PointN::new([6.0, 1.0]),
///     PointN::new([7.0, 3.0]),
/// ];
/// let quintic = GenericBSpline::new(points, 5).unwrap();
/// assert_eq!(quintic.segment_count(), 1);
/// assert_eq!(quintic.t(0).unwrap(), -2.0);
/// ```
#[derive(Debug, Clone)]
pub struct GenericBSpline<P: Point> {
    points: Vec<P>,
    degree: usize,
    knots: Vec<P::Scalar>,
    point_t: Vec<P::Scalar>,
    breakpoints: Vec<P::Scalar>,
    total_length: P::Scalar,
}

impl<P: Point> GenericBSpline<P> {
    /// Create a new B-spline curve of `degree` over `points`.
    /// A B-Spline curve requires at least one more control point than the degree, and the degree must be at least 1.
    pub fn new(points: Vec<P>, degree: usize) -> Result<Self> {
        if degree == 0 {
            return Err(SplineError::InvalidParameter {
                name: "degree",
                reason: "must be at least 1",
            });
        }
        validate_points(VARIANT, &points, degree + 1)?;

        let n = points.len();
        let shift = degree as NativeFloat;
        let greville_offset = (shift - 1.0) / 2.0;

        let mut spline = GenericBSpline {
            knots: (0..n + degree + 1)
                .map(|j| lit(j as NativeFloat - shift))
                .collect(),
            point_t: (0..n)
                .map(|i| lit(i as NativeFloat - greville_offset))
                .collect(),
            breakpoints: (0..=n - degree).map(|i| lit(i as NativeFloat)).collect(),
            points,
            degree,
            total_length: P::Scalar::zero(),
        };
        spline.total_length = spline.arc_length(P::Scalar::zero(), spline.max_t());

        log::debug!(
            "built {} of degree {} with {} segments",
            VARIANT,
            degree,
            spline.segment_count()
        );
        Ok(spline)
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns an iterator over the knots.
    pub fn knots(&self) -> core::slice::Iter<'_, P::Scalar> {
        self.knots.iter()
    }

    /// Evaluate the derivatives `0..=order` of the curve at `t` into `out`.
    fn evaluate(&self, t: P::Scalar, order: usize, out: &mut [P]) {
        let t = self.clamp_t(t);
        let p = self.degree;
        // knot span index: knots[span] <= t < knots[span + 1]
        let span = self.segment_for_t(t) + p;
        let ders = self.basis_derivatives(span, t, order);

        let first = span - p;
        for (k, value) in out.iter_mut().enumerate().take(order + 1) {
            let row = &ders[k * (p + 1)..(k + 1) * (p + 1)];
            *value = row
                .iter()
                .zip(&self.points[first..=span])
                .skip(1)
                .fold(self.points[first].scale(row[0]), |acc, (&weight, &point)| {
                    acc + point.scale(weight)
                });
        }
    }

    /// Nonzero basis functions of degree `p` at `t` and their derivatives up to `order`.
    /// Row `k` of the returned `(order + 1) x (p + 1)` matrix holds the k-th derivatives of
    /// the basis functions `N[span - p] ..= N[span]`. Derivatives above the degree are zero.
    /// (Algorithm A2.3 in Piegl & Tiller, The NURBS Book)
    fn basis_derivatives(&self, span: usize, t: P::Scalar, order: usize) -> TinyVec<[P::Scalar; 32]> {
        let p = self.degree;
        let w = p + 1;
        let n = order.min(p);
        let knots = &self.knots;
        let at = |row: usize, col: usize| row * w + col;
        let zero = P::Scalar::zero();
        let one = P::Scalar::one();

        // upper triangle: basis functions, lower triangle: knot differences
        let mut ndu: TinyVec<[P::Scalar; 16]> = TinyVec::new();
        ndu.resize(w * w, zero);
        let mut left: TinyVec<[P::Scalar; 8]> = TinyVec::new();
        left.resize(w, zero);
        let mut right = left.clone();

        ndu[at(0, 0)] = one;
        for j in 1..=p {
            left[j] = t - knots[span + 1 - j];
            right[j] = knots[span + j] - t;
            let mut saved = zero;
            for r in 0..j {
                ndu[at(j, r)] = right[r + 1] + left[j - r];
                let temp = ndu[at(r, j - 1)] / ndu[at(j, r)];
                ndu[at(r, j)] = saved + right[r + 1] * temp;
                saved = left[j - r] * temp;
            }
            ndu[at(j, j)] = saved;
        }

        let mut ders: TinyVec<[P::Scalar; 32]> = TinyVec::new();
        ders.resize((order + 1) * w, zero);
        for j in 0..=p {
            ders[at(0, j)] = ndu[at(j, p)];
        }

        // two alternating rows of coefficients
        let mut a: TinyVec<[P::Scalar; 16]> = TinyVec::new();
        a.resize(2 * w, zero);
        for r in 0..=p {
            let (mut s1, mut s2) = (0, 1);
            a[at(0, 0)] = one;
            for k in 1..=n {
                let mut d = zero;
                let rk = r as isize - k as isize;
                let pk = p - k;
                if rk >= 0 {
                    a[at(s2, 0)] = a[at(s1, 0)] / ndu[at(pk + 1, rk as usize)];
                    d = a[at(s2, 0)] * ndu[at(rk as usize, pk)];
                }
                let j1 = if rk >= -1 { 1 } else { (-rk) as usize };
                let j2 = if r <= pk + 1 { k - 1 } else { p - r };
                for j in j1..=j2 {
                    let column = (rk + j as isize) as usize;
                    a[at(s2, j)] = (a[at(s1, j)] - a[at(s1, j - 1)]) / ndu[at(pk + 1, column)];
                    d = d + a[at(s2, j)] * ndu[at(column, pk)];
                }
                if r <= pk {
                    a[at(s2, k)] = -a[at(s1, k - 1)] / ndu[at(pk + 1, r)];
                    d = d + a[at(s2, k)] * ndu[at(r, pk)];
                }
                ders[at(k, r)] = d;
                core::mem::swap(&mut s1, &mut s2);
            }
        }

        // multiply through by p! / (p - k)!
        let mut factor: P::Scalar = lit(p as NativeFloat);
        for k in 1..=n {
            for j in 0..=p {
                ders[at(k, j)] = ders[at(k, j)] * factor;
            }
            factor = factor * lit((p - k) as NativeFloat);
        }
        ders
    }
}

impl<P: Point> Spline<P> for GenericBSpline<P> {
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
        false
    }

    fn position(&self, t: P::Scalar) -> P {
        let mut out = [self.points[0]; 1];
        self.evaluate(t, 0, &mut out);
        out[0]
    }

    fn tangent(&self, t: P::Scalar) -> Tangent<P> {
        let mut out = [self.points[0]; 2];
        self.evaluate(t, 1, &mut out);
        Tangent {
            position: out[0],
            tangent: out[1],
        }
    }

    fn curvature(&self, t: P::Scalar) -> Curvature<P> {
        let mut out = [self.points[0]; 3];
        self.evaluate(t, 2, &mut out);
        Curvature {
            position: out[0],
            tangent: out[1],
            curvature: out[2],
        }
    }

    fn wiggle(&self, t: P::Scalar) -> Wiggle<P> {
        let mut out = [self.points[0]; MAX_DERIVATIVE + 1];
        self.evaluate(t, MAX_DERIVATIVE, &mut out);
        Wiggle {
            position: out[0],
            tangent: out[1],
            curvature: out[2],
            wiggle: out[3],
        }
    }

    fn total_length(&self) -> P::Scalar {
        self.total_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PointN, UniformCubicBSpline, EPSILON};

    fn points() -> Vec<PointN<f64, 2>> {
        vec![
            PointN::new([0.0, 1.77]),
            PointN::new([1.1, -1.0]),
            PointN::new([4.3, 3.0]),
            PointN::new([3.2, -4.0]),
            PointN::new([7.3, 2.7]),
            PointN::new([8.9, 1.7]),
            PointN::new([10.0, 5.0]),
        ]
    }

    #[test]
    fn cubic_matches_uniform_cubic_bspline() {
        let generic = GenericBSpline::new(points(), 3).unwrap();
        let uniform = UniformCubicBSpline::new(points()).unwrap();
        assert_eq!(generic.breakpoints(), uniform.breakpoints());
        assert_eq!(generic.t(2).unwrap(), uniform.t(2).unwrap());

        let nsteps = 40;
        for i in 0..=nsteps {
            let t = generic.max_t() * (i as f64 / nsteps as f64);
            let a = generic.wiggle(t);
            let b = uniform.wiggle(t);
            assert!((a.position - b.position).squared_length() < EPSILON);
            assert!((a.tangent - b.tangent).squared_length() < EPSILON);
            assert!((a.curvature - b.curvature).squared_length() < EPSILON);
            assert!((a.wiggle - b.wiggle).squared_length() < EPSILON);
        }
    }

    #[test]
    fn linear_interpolates_points() {
        let p = points();
        let spline = GenericBSpline::new(p.clone(), 1).unwrap();
        assert_eq!(spline.segment_count(), p.len() - 1);
        for (i, point) in p.iter().enumerate() {
            assert_eq!(spline.t(i).unwrap(), i as f64);
            assert!((spline.position(i as f64) - *point).squared_length() < EPSILON);
        }
        let mid = spline.tangent(0.5);
        assert!((mid.tangent - (p[1] - p[0])).squared_length() < EPSILON);
        assert!(spline.curvature(0.5).curvature.squared_length() < EPSILON);
    }

    #[test]
    fn partition_of_unity() {
        // a B-spline of constant control points is constant, its derivatives vanish
        let flat = vec![PointN::new([2.0f64, -1.0]); 8];
        for degree in 1..=6 {
            let spline = GenericBSpline::new(flat.clone(), degree).unwrap();
            let w = spline.wiggle(spline.max_t() * 0.37);
            assert!((w.position - flat[0]).squared_length() < EPSILON);
            assert!(w.tangent.squared_length() < EPSILON);
            assert!(w.curvature.squared_length() < EPSILON);
            assert!(w.wiggle.squared_length() < EPSILON);
        }
    }

    #[test]
    fn quadratic_has_half_integer_greville_points() {
        let spline = GenericBSpline::new(points(), 2).unwrap();
        assert_eq!(spline.t(0).unwrap(), -0.5);
        assert_eq!(spline.segment_count(), 5);
        assert_eq!(spline.knots().count(), points().len() + 3);
    }

    #[test]
    fn invalid_degree_and_too_few_points() {
        assert!(matches!(
            GenericBSpline::new(points(), 0),
            Err(SplineError::InvalidParameter { name: "degree", .. })
        ));
        assert!(matches!(
            GenericBSpline::new(points(), 7),
            Err(SplineError::TooFewPoints {
                required: 8,
                actual: 7,
                ..
            })
        ));
        assert!(GenericBSpline::new(points(), 6).is_ok());
    }
}

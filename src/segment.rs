use num_traits::{Float, Zero};

use crate::spline::{Curvature, Tangent, Wiggle};
use crate::Point;

/// A polynomial piece of a spline, stored in power basis over the local parameter
/// `u = (t - t0) / (t1 - t0)`:
/// ```text
/// P(u) = c[0] + c[1] u + c[2] u^2 + ... + c[K-1] u^(K-1)
/// ```
/// Derivatives with respect to t are taken analytically, `d^r/dt^r = (1 / dt)^r d^r/du^r`.
/// K = 4 holds cubic pieces, K = 6 quintic ones.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PolynomialSegment<P: Point, const K: usize> {
    coefficients: [P; K],
    t0: P::Scalar,
    inv_dt: P::Scalar,
}

impl<P: Point, const K: usize> PolynomialSegment<P, K> {
    pub fn new(coefficients: [P; K], t0: P::Scalar, t1: P::Scalar) -> Self {
        debug_assert!(t1 > t0);
        PolynomialSegment {
            coefficients,
            t0,
            inv_dt: (t1 - t0).recip(),
        }
    }

    fn local(&self, t: P::Scalar) -> P::Scalar {
        (t - self.t0) * self.inv_dt
    }

    /// Evaluate the `order`-th derivative with respect to t at local parameter `u` (Horner scheme).
    fn derivative(&self, u: P::Scalar, order: usize) -> P {
        if order >= K {
            return self.coefficients[0].scale(P::Scalar::zero());
        }
        let mut acc = self.coefficients[K - 1].scale(falling_factorial(K - 1, order));
        for k in (order..K - 1).rev() {
            acc = acc.scale(u) + self.coefficients[k].scale(falling_factorial(k, order));
        }
        acc.scale(self.inv_dt.powi(order as i32))
    }

    pub fn position(&self, t: P::Scalar) -> P {
        self.derivative(self.local(t), 0)
    }

    pub fn tangent(&self, t: P::Scalar) -> Tangent<P> {
        let u = self.local(t);
        Tangent {
            position: self.derivative(u, 0),
            tangent: self.derivative(u, 1),
        }
    }

    pub fn curvature(&self, t: P::Scalar) -> Curvature<P> {
        let u = self.local(t);
        Curvature {
            position: self.derivative(u, 0),
            tangent: self.derivative(u, 1),
            curvature: self.derivative(u, 2),
        }
    }

    pub fn wiggle(&self, t: P::Scalar) -> Wiggle<P> {
        let u = self.local(t);
        Wiggle {
            position: self.derivative(u, 0),
            tangent: self.derivative(u, 1),
            curvature: self.derivative(u, 2),
            wiggle: self.derivative(u, 3),
        }
    }
}

/// k! / (k - r)!
fn falling_factorial<S: Float>(k: usize, r: usize) -> S {
    ((k + 1 - r)..=k).fold(S::one(), |acc, factor| {
        acc * S::from(factor).unwrap_or_else(S::nan)
    })
}

//! Nalgebra adapter implementations.
//!
//! Enable this adapter with the `nalgebra` feature to use `nalgebra::SVector<T, D>`
//! as a `Point`. Add `nalgebra` as a direct dependency to construct the vectors
//! in your own code.
//!
//! # Example
//! ```rust,no_run
//! use nalgebra::SVector;
//! use strand::{Spline, UniformCRSpline};
//!
//! let spline = UniformCRSpline::new(vec![
//!     SVector::<f32, 3>::new(0.0, 0.0, 0.0),
//!     SVector::<f32, 3>::new(1.0, 0.0, 0.5),
//!     SVector::<f32, 3>::new(1.0, 1.0, 1.0),
//!     SVector::<f32, 3>::new(0.0, 1.0, 1.5),
//! ])
//! .unwrap();
//!
//! let mid = spline.position(0.5);
//! # let _ = mid;
//! ```
//!
//! The scalar type must satisfy `nalgebra::RealField` and `num_traits::Float`
//! (e.g. `f32` or `f64`).

use nalgebra::{Matrix, RealField, SVector};
use num_traits::Float;

use crate::point::Point;

impl<T, const D: usize> Point for SVector<T, D>
where
    T: RealField + Float + Default,
{
    type Scalar = T;
    const DIM: usize = D;

    fn axis(&self, index: usize) -> Self::Scalar {
        self[index]
    }

    fn scale(self, factor: Self::Scalar) -> Self {
        self * factor
    }

    fn dot(&self, other: &Self) -> Self::Scalar {
        Matrix::dot(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NaturalSpline, Spline};
    use approx::assert_relative_eq;

    #[test]
    fn svector_behaves_like_point() {
        let a = SVector::<f64, 3>::new(1.0, 2.0, 2.0);
        let b = SVector::<f64, 3>::new(0.0, 0.0, 0.0);
        assert_relative_eq!(Point::length(&a), 3.0);
        assert_relative_eq!(Point::distance(&a, &b), 3.0);
        assert_eq!(a.axis(2), 2.0);
        assert_eq!(Point::scale(a, 2.0), SVector::<f64, 3>::new(2.0, 4.0, 4.0));
    }

    #[test]
    fn spline_over_svector() {
        let spline = NaturalSpline::new(vec![
            SVector::<f64, 2>::new(0.0, 0.0),
            SVector::<f64, 2>::new(1.0, 1.0),
            SVector::<f64, 2>::new(2.0, 2.0),
        ])
        .unwrap();
        assert_relative_eq!(spline.total_length(), 8f64.sqrt(), epsilon = 1e-9);
    }
}

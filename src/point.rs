use core::fmt::Debug;
use core::ops::{Add, Sub};

use num_traits::Float;

/// Trait defined over generic points P which themselves are generic over their Scalar.
/// Many libraries already provide Point-types and the mathematical operations
/// that we need for working with curves, so that implementing methods requires mostly wrapping.
/// Keeping the trait as minimal as possible to make integration with other libraries easy
pub trait Point: Add<Output = Self> + Sub<Output = Self> + Copy + PartialEq + Debug {
    type Scalar: Float + Default + Debug;

    /// Number of coordinate axes
    const DIM: usize;

    /// Returns the component of the Point on its axis corresponding to index e.g. [0, 1, 2] -> [x, y, z]
    fn axis(&self, index: usize) -> Self::Scalar;

    /// Multiplies every component with `factor`
    fn scale(self, factor: Self::Scalar) -> Self;

    /// Returns the dot product of the Point with other, both interpreted as vectors
    fn dot(&self, other: &Self) -> Self::Scalar;

    fn squared_length(&self) -> Self::Scalar {
        self.dot(self)
    }

    /// Returns the L2 Norm of the Point interpreted as a Vector
    fn length(&self) -> Self::Scalar {
        self.squared_length().sqrt()
    }

    /// Returns the distance between the two Points self and other
    fn distance(&self, other: &Self) -> Self::Scalar {
        (*self - *other).length()
    }

    /// True if no component is NaN or infinite
    fn is_finite_point(&self) -> bool {
        (0..Self::DIM).all(|i| self.axis(i).is_finite())
    }
}

// Plain floats are 1-dimensional points, which makes scalar (signal) curves possible
// without wrapping every sample.
macro_rules! impl_point_for_float {
    ($($t:ty),*) => {
        $(
            impl Point for $t {
                type Scalar = $t;
                const DIM: usize = 1;

                fn axis(&self, _index: usize) -> Self::Scalar {
                    *self
                }

                fn scale(self, factor: Self::Scalar) -> Self {
                    self * factor
                }

                fn dot(&self, other: &Self) -> Self::Scalar {
                    *self * *other
                }

                fn length(&self) -> Self::Scalar {
                    self.abs()
                }
            }
        )*
    };
}

impl_point_for_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_points() {
        let a = -3.0f64;
        assert_eq!(Point::length(&a), 3.0);
        assert_eq!(a.distance(&1.0), 4.0);
        assert_eq!(a.scale(2.0), -6.0);
        assert_eq!(<f32 as Point>::DIM, 1);
        assert!(!f64::NAN.is_finite_point());
    }
}

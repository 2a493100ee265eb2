//! Tridiagonal solvers with vector-valued right hand sides.
//!
//! Each row `i` reads `lower[i] * x[i-1] + diag[i] * x[i] + upper[i] * x[i+1] = rhs[i]`.
//! For the plain system `lower[0]` and `upper[n-1]` are ignored, for the cyclic one
//! they are the corner coefficients coupling the first and last unknown.

use num_traits::{Float, One, Zero};

use crate::error::{Result, SplineError};
use crate::{Point, PointN};

/// Thomas algorithm. Fails if a pivot vanishes, which for the diagonally dominant
/// systems built by the natural spline only happens with zero knot spacing.
pub(crate) fn solve_tridiagonal<P: Point>(
    lower: &[P::Scalar],
    diag: &[P::Scalar],
    upper: &[P::Scalar],
    rhs: &[P],
) -> Result<Vec<P>> {
    let n = diag.len();
    debug_assert!(lower.len() == n && upper.len() == n && rhs.len() == n);
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut upper_prime = Vec::with_capacity(n);
    let mut rhs_prime: Vec<P> = Vec::with_capacity(n);

    let pivot = checked_pivot(diag[0])?;
    upper_prime.push(upper[0] / pivot);
    rhs_prime.push(rhs[0].scale(pivot.recip()));

    for i in 1..n {
        let pivot = checked_pivot(diag[i] - lower[i] * upper_prime[i - 1])?;
        upper_prime.push(upper[i] / pivot);
        rhs_prime.push((rhs[i] - rhs_prime[i - 1].scale(lower[i])).scale(pivot.recip()));
    }

    // back substitution, in place
    for i in (0..n - 1).rev() {
        rhs_prime[i] = rhs_prime[i] - rhs_prime[i + 1].scale(upper_prime[i]);
    }
    Ok(rhs_prime)
}

/// Cyclic tridiagonal system via the Sherman-Morrison correction of a plain tridiagonal solve.
/// Needs at least three unknowns.
pub(crate) fn solve_cyclic_tridiagonal<P: Point>(
    lower: &[P::Scalar],
    diag: &[P::Scalar],
    upper: &[P::Scalar],
    rhs: &[P],
) -> Result<Vec<P>> {
    let n = diag.len();
    debug_assert!(n >= 3);

    // corners: row 0 couples to x[n-1], row n-1 couples to x[0]
    let top_corner = lower[0];
    let bottom_corner = upper[n - 1];
    let gamma = -diag[0];
    if gamma == P::Scalar::zero() {
        return Err(SplineError::Numerical {
            reason: "zero diagonal in cyclic tridiagonal system",
        });
    }

    let mut modified = diag.to_vec();
    modified[0] = diag[0] - gamma;
    modified[n - 1] = diag[n - 1] - bottom_corner * top_corner / gamma;

    let x = solve_tridiagonal(lower, &modified, upper, rhs)?;

    let mut u = vec![PointN::new([P::Scalar::zero()]); n];
    u[0] = PointN::new([gamma]);
    u[n - 1] = PointN::new([bottom_corner]);
    let z: Vec<P::Scalar> = solve_tridiagonal(lower, &modified, upper, &u)?
        .into_iter()
        .map(|zi| zi[0])
        .collect();

    let denominator = P::Scalar::one() + z[0] + top_corner * z[n - 1] / gamma;
    let denominator = checked_pivot(denominator)?;
    let correction = (x[0] + x[n - 1].scale(top_corner / gamma)).scale(denominator.recip());

    Ok(x
        .into_iter()
        .zip(z)
        .map(|(xi, zi)| xi - correction.scale(zi))
        .collect())
}

fn checked_pivot<S: Float>(pivot: S) -> Result<S> {
    if pivot.abs() <= S::epsilon() || !pivot.is_finite() {
        return Err(SplineError::Numerical {
            reason: "singular tridiagonal system",
        });
    }
    Ok(pivot)
}

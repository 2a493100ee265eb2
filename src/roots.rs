//! Bracketed root finding for monotone functions.
//!
//! Available functions:
//! - `root_newton_bisection()`
use num_traits::Float;

/// Result of a bracketed root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RootEstimate<F> {
    pub value: F,
    pub iterations: usize,
    pub converged: bool,
}

/// Find the root of the non-decreasing function f(x) = 0 inside the bracket [lo, hi]
/// with f(lo) <= 0 <= f(hi), given f and its derivative f'.
/// Uses the Newton-Raphson method because it is suited for splines as they are cont. differentiable,
/// but falls back to bisection whenever a Newton step would leave the bracket or the derivative vanishes.
/// If neither `|f(x)| <= eps` nor a collapsed bracket is reached within `max_iter` iterations,
/// the midpoint of the final bracket is returned with `converged == false`.
pub(crate) fn root_newton_bisection<F, Func, Deriv>(
    mut lo: F,
    mut hi: F,
    start: F,
    f: Func,
    d: Deriv,
    eps: F,
    max_iter: usize,
) -> RootEstimate<F>
where
    F: Float,
    Func: Fn(F) -> F,
    Deriv: Fn(F) -> F,
{
    let two = F::one() + F::one();
    let mut x = if start > lo && start < hi {
        start
    } else {
        (lo + hi) / two
    };

    for iteration in 1..=max_iter {
        let fx = f(x);
        if fx.abs() <= eps {
            return RootEstimate {
                value: x,
                iterations: iteration,
                converged: true,
            };
        }

        // shrink the bracket around the root
        if fx < F::zero() {
            lo = x;
        } else {
            hi = x;
        }
        if hi - lo <= F::epsilon() * hi.abs().max(F::one()) {
            return RootEstimate {
                value: (lo + hi) / two,
                iterations: iteration,
                converged: true,
            };
        }

        let dx = d(x);
        let newton = x - fx / dx;
        x = if dx > F::zero() && newton > lo && newton < hi {
            newton
        } else {
            (lo + hi) / two
        };
    }

    RootEstimate {
        value: (lo + hi) / two,
        iterations: max_iter,
        converged: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn newton_converges_on_smooth_function() {
        // x^3 + x - 3 has a single real root near 1.2134
        let root = root_newton_bisection(
            0.0f64,
            2.0,
            1.0,
            |x| x * x * x + x - 3.0,
            |x| 3.0 * x * x + 1.0,
            1e-12,
            32,
        );
        assert!(root.converged);
        assert!(root.iterations < 10);
        assert_abs_diff_eq!(root.value.powi(3) + root.value - 3.0, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn falls_back_to_bisection_on_flat_derivative() {
        // derivative reported as zero forces pure bisection
        let root = root_newton_bisection(0.0f64, 4.0, 0.0, |x| x - 1.5, |_| 0.0, 1e-9, 64);
        assert!(root.converged);
        assert_abs_diff_eq!(root.value, 1.5, epsilon = 1e-9);
    }

    #[test]
    fn returns_bracket_midpoint_at_iteration_cap() {
        let root = root_newton_bisection(0.0f64, 1.0, 0.5, |x| x - 0.3, |_| 0.0, 0.0, 3);
        assert!(!root.converged);
        assert_eq!(root.iterations, 3);
        assert!(root.value > 0.0 && root.value < 1.0);
    }
}

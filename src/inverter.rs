//! Arc length to parameter inversion.
//!
//! Arc length has no closed form for polynomial curves, so neither does its inverse.
//! [`SplineInverter`] samples `(t, length)` pairs once and then solves
//! `arc_length(0, t) = s` per query: a binary search over the samples brackets the root,
//! Newton's method (with the curve speed as derivative) refines it, and bisection takes
//! over whenever Newton misbehaves.
use core::marker::PhantomData;

use num_traits::{Float, ToPrimitive, Zero};

use crate::error::{Result, SplineError};
use crate::options::InverterOptions;
use crate::roots::root_newton_bisection;
use crate::spline::Spline;
use crate::{lit, NativeFloat, Point};

/// Upper bound on the number of parameters a single `partition` call returns.
pub const MAX_PARTITION_LEN: usize = 1_000_000;

/// Solves length-to-parameter queries against a borrowed spline.
///
/// ```rust
/// use strand::{PointN, Spline, SplineInverter, UniformCRSpline};
///
/// let spline = UniformCRSpline::new(vec![
///     PointN::new([0.0f64, 0.0]),
///     PointN::new([0.0, 1.0]),
///     PointN::new([2.0, 1.0]),
///     PointN::new([3.0, 4.0]),
///     PointN::new([5.0, 5.0]),
/// ])
/// .unwrap();
///
/// let inverter = SplineInverter::new(&spline).unwrap();
/// let ts = inverter.partition(0.5).unwrap();
/// for pair in ts.windows(2) {
///     assert!((spline.arc_length(pair[0], pair[1]) - 0.5).abs() < 1e-2);
/// }
/// ```
#[derive(Debug)]
pub struct SplineInverter<'a, P: Point, S: Spline<P> + ?Sized> {
    spline: &'a S,
    options: InverterOptions<P::Scalar>,
    sample_t: Vec<P::Scalar>,
    sample_length: Vec<P::Scalar>,
    /// Arc length from 0 to the start of every segment
    segment_length: Vec<P::Scalar>,
    _point: PhantomData<fn() -> P>,
}

impl<'a, P: Point, S: Spline<P> + ?Sized> SplineInverter<'a, P, S> {
    pub fn new(spline: &'a S) -> Result<Self> {
        Self::with_options(spline, InverterOptions::default())
    }

    pub fn with_options(spline: &'a S, options: InverterOptions<P::Scalar>) -> Result<Self> {
        if options.samples_per_segment == 0 {
            return Err(SplineError::InvalidParameter {
                name: "samples_per_segment",
                reason: "must be at least 1",
            });
        }
        if !(options.tolerance > P::Scalar::zero() && options.tolerance.is_finite()) {
            return Err(SplineError::InvalidParameter {
                name: "tolerance",
                reason: "must be positive and finite",
            });
        }

        // lengths are accumulated segment by segment exactly like `Spline::arc_length(0, t)`,
        // so the refinement below solves the same function callers measure with
        let samples = options.samples_per_segment;
        let mut segment_length = Vec::with_capacity(spline.segment_count() + 1);
        let mut sample_t = Vec::with_capacity(spline.segment_count() * samples + 1);
        let mut sample_length = Vec::with_capacity(spline.segment_count() * samples + 1);
        let mut base = P::Scalar::zero();
        for pair in spline.breakpoints().windows(2) {
            segment_length.push(base);
            let width = pair[1] - pair[0];
            for k in 0..samples {
                let fraction: P::Scalar = lit(k as NativeFloat / samples as NativeFloat);
                let t = pair[0] + width * fraction;
                sample_t.push(t);
                sample_length.push(base + spline.arc_length(pair[0], t));
            }
            base = base + spline.arc_length(pair[0], pair[1]);
        }
        segment_length.push(base);
        sample_t.push(spline.max_t());
        sample_length.push(base);

        log::trace!(
            "inverter sampled {} points over {} segments",
            sample_t.len(),
            spline.segment_count()
        );

        Ok(SplineInverter {
            spline,
            options,
            sample_t,
            sample_length,
            segment_length,
            _point: PhantomData,
        })
    }

    /// Length of the whole spline.
    pub fn total_length(&self) -> P::Scalar {
        self.spline.total_length()
    }

    /// Parameter `t` with `arc_length(0, t) ≈ length`. The length is clamped to
    /// `[0, total_length()]`, so this never fails; the result is accurate to
    /// `tolerance * total_length()` unless the iteration cap was hit.
    pub fn t_at_length(&self, length: P::Scalar) -> P::Scalar {
        let zero = P::Scalar::zero();
        let total = self.sample_length.last().copied().unwrap_or(zero);
        if !(length > zero) {
            return zero;
        }
        if length >= total {
            return self.spline.max_t();
        }

        let upper = self
            .sample_length
            .partition_point(|&sample| sample <= length)
            .clamp(1, self.sample_length.len() - 1);
        let lower = upper - 1;
        let segment = (lower / self.options.samples_per_segment)
            .min(self.segment_length.len().saturating_sub(2));
        let segment_start = self.spline.breakpoints()[segment];
        let segment_base = self.segment_length[segment];
        let (t_lo, t_hi) = (self.sample_t[lower], self.sample_t[upper]);
        let (len_lo, len_hi) = (self.sample_length[lower], self.sample_length[upper]);

        // linear guess inside the bracket
        let span = len_hi - len_lo;
        let start = if span > zero {
            t_lo + (t_hi - t_lo) * (length - len_lo) / span
        } else {
            t_lo
        };

        let estimate = root_newton_bisection(
            t_lo,
            t_hi,
            start,
            |t| segment_base + self.spline.arc_length(segment_start, t) - length,
            |t| self.spline.speed(t),
            self.options.tolerance * total,
            self.options.max_iterations,
        );
        if !estimate.converged {
            log::debug!(
                "arc length inversion for {:?} stopped after {} iterations without converging",
                length,
                estimate.iterations
            );
        } else {
            log::trace!(
                "arc length {:?} inverted in {} iterations",
                length,
                estimate.iterations
            );
        }
        estimate.value
    }

    /// Position at arc length `length` from the start of the curve.
    pub fn point_at_length(&self, length: P::Scalar) -> P {
        self.spline.position(self.t_at_length(length))
    }

    /// Parameters at arc lengths `0, step, 2 step, ...` up to the total length.
    ///
    /// Fails when `step` is not positive and finite, or so small that more than
    /// [`MAX_PARTITION_LEN`] parameters would come back.
    pub fn partition(&self, step: P::Scalar) -> Result<Vec<P::Scalar>> {
        if !(step > P::Scalar::zero() && step.is_finite()) {
            return Err(SplineError::InvalidParameter {
                name: "step",
                reason: "must be positive and finite",
            });
        }
        let total = self.total_length();
        let count = (total / step)
            .floor()
            .to_usize()
            .filter(|&count| count < MAX_PARTITION_LEN)
            .ok_or(SplineError::InvalidParameter {
                name: "step",
                reason: "too small for the length of the curve",
            })?;

        // `count` can be one short when `total / step` rounds down across an integer
        let mut ts = Vec::with_capacity(count + 2);
        let mut index = 0usize;
        loop {
            let length = step * lit(index as NativeFloat);
            if length > total || index > count + 1 {
                break;
            }
            ts.push(self.t_at_length(length));
            index += 1;
        }
        Ok(ts)
    }
}

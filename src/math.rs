//! Small numeric helpers that sit outside the transform core.

use crate::error::{CompositionError, Result};
use rand::Rng;

/// Sign of `x` as -1, 0 or 1. NaN maps to 0.
pub fn sign(x: f64) -> i32 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Sign of an integer as -1, 0 or 1.
pub fn isign(n: i64) -> i32 {
    n.signum() as i32
}

/// Round half up: `floor(x + 0.5)`, so `-2.5` rounds to `-2`.
pub fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// `x * x * x`.
#[inline]
pub fn cube(x: f64) -> f64 {
    x * x * x
}

/// Natural logarithm.
#[inline]
pub fn ln(x: f64) -> f64 {
    x.ln()
}

/// `n!`, or `None` if it does not fit in a `u64` (n > 20).
pub fn factorial(n: u32) -> Option<u64> {
    (1..=u64::from(n)).try_fold(1u64, |acc, k| acc.checked_mul(k))
}

/// Uniform integer in the inclusive range `[low, high]`.
pub fn uniform_int<R: Rng>(rng: &mut R, low: i32, high: i32) -> Result<i32> {
    if low > high {
        return Err(CompositionError::InvalidParameter(format!(
            "empty range [{}, {}]",
            low, high
        )));
    }
    Ok(rng.gen_range(low..=high))
}

/// Uniform 64-bit integer in the inclusive range `[low, high]`.
pub fn uniform_i64<R: Rng>(rng: &mut R, low: i64, high: i64) -> Result<i64> {
    if low > high {
        return Err(CompositionError::InvalidParameter(format!(
            "empty range [{}, {}]",
            low, high
        )));
    }
    Ok(rng.gen_range(low..=high))
}

//! Closure: rescale each composition so its parts sum to one.

use super::{check_divisor, run_rows, TransformConfig};
use crate::error::Result;
use crate::matrix::{check_same_dims, Matrix};

/// Close every row of `input` into `out`.
///
/// # Formula
/// clo(x)_j = x_j / sum(x)
///
/// `out` must have the same shape as `input`. A row summing to zero yields
/// non-finite values unless the config says to fail fast.
pub fn clo(input: &Matrix, out: &mut Matrix) -> Result<()> {
    clo_with(input, out, &TransformConfig::default())
}

/// [`clo`] with explicit options.
pub fn clo_with(input: &Matrix, out: &mut Matrix, config: &TransformConfig) -> Result<()> {
    check_same_dims("clo", input.dims(), out.dims())?;
    run_rows(
        "clo",
        input,
        out,
        config,
        |row| check_divisor(row.iter().sum()),
        close_row,
    )
}

pub(crate) fn close_row(row: &[f64], out: &mut [f64]) {
    let sum: f64 = row.iter().sum();
    for (o, &x) in out.iter_mut().zip(row) {
        *o = x / sum;
    }
}

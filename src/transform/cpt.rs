//! Centered Planar Transform (CPT).

use super::clo::close_row;
use super::{check_divisor, run_rows, TransformConfig};
use crate::error::Result;
use crate::matrix::{check_same_dims, Matrix};

/// Apply the centered planar transform to every row of `input`.
///
/// # Formula
/// cpt(x)_j = clo(x)_j - 1/D
///
/// Output rows sum to zero. `out` must have the same shape as `input`.
pub fn cpt(input: &Matrix, out: &mut Matrix) -> Result<()> {
    cpt_with(input, out, &TransformConfig::default())
}

/// [`cpt`] with explicit options.
pub fn cpt_with(input: &Matrix, out: &mut Matrix, config: &TransformConfig) -> Result<()> {
    check_same_dims("cpt", input.dims(), out.dims())?;
    run_rows(
        "cpt",
        input,
        out,
        config,
        |row| check_divisor(row.iter().sum()),
        cpt_row,
    )
}

fn cpt_row(row: &[f64], out: &mut [f64]) {
    close_row(row, out);
    let center = 1.0 / row.len() as f64;
    for o in out.iter_mut() {
        *o -= center;
    }
}

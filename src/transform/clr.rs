//! Centered Log-Ratio (CLR) transformation.
//!
//! CLR maps a D-part composition isometrically onto a D-dimensional
//! hyperplane of Euclidean space: the image of every row sums to zero, so
//! covariance matrices of CLR data are always singular.

use super::{check_positive_parts, run_rows, TransformConfig};
use crate::error::Result;
use crate::matrix::{check_same_dims, Matrix};

/// Apply the centered log-ratio transform to every row of `input`.
///
/// # Formula
/// clr(x)_j = ln(x_j) - mean(ln(x))
///
/// The subtracted mean is the log of the row's geometric mean. `out` must
/// have the same shape as `input`. Zero or negative parts yield `-inf` or
/// NaN unless the config says to fail fast.
pub fn clr(input: &Matrix, out: &mut Matrix) -> Result<()> {
    clr_with(input, out, &TransformConfig::default())
}

/// [`clr`] with explicit options.
pub fn clr_with(input: &Matrix, out: &mut Matrix, config: &TransformConfig) -> Result<()> {
    check_same_dims("clr", input.dims(), out.dims())?;
    run_rows("clr", input, out, config, check_positive_parts, clr_row)
}

fn clr_row(row: &[f64], out: &mut [f64]) {
    let mean_ln = row.iter().map(|x| x.ln()).sum::<f64>() / row.len() as f64;
    for (o, &x) in out.iter_mut().zip(row) {
        *o = x.ln() - mean_ln;
    }
}

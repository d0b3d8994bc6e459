//! Transforms between the Aitchison simplex and Euclidean space.
//!
//! Every transform reads an input matrix of compositions (rows =
//! observations, columns = parts) and writes into a caller-allocated output
//! matrix. The output shape is checked before any data is touched:
//!
//! | Transform | Output shape |
//! |-----------|--------------|
//! | [`clo()`] closure | R x C |
//! | [`clr()`] centered log-ratio | R x C |
//! | [`alr()`] additive log-ratio | R x (C-1) |
//! | [`cpt()`] centered planar | R x C |
//! | [`apt()`] additive planar | R x C |
//!
//! Degenerate rows (zero sums, non-positive parts) are governed by
//! [`DegeneracyPolicy`]; by default they produce NaN or infinite values.

pub mod alr;
pub mod apt;
pub mod clo;
pub mod clr;
pub mod config;
pub mod cpt;

pub use alr::{alr, alr_with};
pub use apt::{apt, apt_with};
pub use clo::{clo, clo_with};
pub use clr::{clr, clr_with};
pub use config::{DegeneracyPolicy, TransformConfig};
pub use cpt::{cpt, cpt_with};

use crate::error::{CompositionError, Result};
use crate::matrix::Matrix;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// The available transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    /// Closure to unit row sums.
    Clo,
    /// Centered log-ratio.
    Clr,
    /// Additive log-ratio against the last part.
    Alr,
    /// Centered planar transform.
    Cpt,
    /// Additive planar transform.
    Apt,
}

impl Transform {
    /// All transforms, in declaration order.
    pub const ALL: [Transform; 5] = [
        Transform::Clo,
        Transform::Clr,
        Transform::Alr,
        Transform::Cpt,
        Transform::Apt,
    ];

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Transform::Clo => "clo",
            Transform::Clr => "clr",
            Transform::Alr => "alr",
            Transform::Cpt => "cpt",
            Transform::Apt => "apt",
        }
    }

    /// Required output shape for an input of shape `(rows, cols)`.
    pub fn output_dims(self, rows: usize, cols: usize) -> (usize, usize) {
        match self {
            Transform::Alr => (rows, cols.saturating_sub(1)),
            _ => (rows, cols),
        }
    }

    /// Apply this transform, writing into `out`.
    pub fn apply(self, input: &Matrix, out: &mut Matrix, config: &TransformConfig) -> Result<()> {
        match self {
            Transform::Clo => clo_with(input, out, config),
            Transform::Clr => clr_with(input, out, config),
            Transform::Alr => alr_with(input, out, config),
            Transform::Cpt => cpt_with(input, out, config),
            Transform::Apt => apt_with(input, out, config),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transform {
    type Err = CompositionError;

    fn from_str(s: &str) -> Result<Self> {
        Transform::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CompositionError::InvalidParameter(format!("Unknown transform '{}'", s)))
    }
}

/// Allocate an output of the right shape and apply `kind` to `input`.
pub fn transform(kind: Transform, input: &Matrix, config: &TransformConfig) -> Result<Matrix> {
    let (rows, cols) = kind.output_dims(input.rows(), input.cols());
    let mut out = Matrix::new(rows, cols);
    kind.apply(input, &mut out, config)?;
    Ok(out)
}

/// Drive a row kernel over `input`, writing the matching rows of `out`.
///
/// Shapes must already be checked. Under `FailFast` every input row goes
/// through `check` before anything is written.
pub(crate) fn run_rows<C, K>(
    name: &'static str,
    input: &Matrix,
    out: &mut Matrix,
    config: &TransformConfig,
    check: C,
    kernel: K,
) -> Result<()>
where
    C: Fn(&[f64]) -> Option<String>,
    K: Fn(&[f64], &mut [f64]) + Sync + Send,
{
    let (rows, cols) = input.dims();
    debug!(
        transform = name,
        rows,
        cols,
        parallel = config.parallel,
        "Applying transform"
    );

    if config.degeneracy == DegeneracyPolicy::FailFast {
        for (row, values) in input.rows_iter().enumerate() {
            if let Some(reason) = check(values) {
                return Err(CompositionError::NumericDegeneracy {
                    transform: name,
                    row,
                    reason,
                });
            }
        }
    }

    let non_finite = apply_rows(input, out, config.parallel, kernel);

    if non_finite > 0 && config.degeneracy == DegeneracyPolicy::Propagate {
        warn!(
            transform = name,
            non_finite,
            "Transform produced non-finite values"
        );
    }

    Ok(())
}

/// Run `kernel` on every row pair and count the non-finite values written.
///
/// The count is taken per row right after the kernel, on the same thread.
fn apply_rows<K>(input: &Matrix, out: &mut Matrix, parallel: bool, kernel: K) -> usize
where
    K: Fn(&[f64], &mut [f64]) + Sync + Send,
{
    let out_cols = out.cols();
    if out_cols == 0 {
        return 0;
    }

    let run = |in_row: &[f64], out_row: &mut [f64]| -> usize {
        kernel(in_row, out_row);
        out_row.iter().filter(|v| !v.is_finite()).count()
    };

    if parallel {
        out.as_mut_slice()
            .par_chunks_mut(out_cols)
            .enumerate()
            .map(|(i, out_row)| run(input.row(i), out_row))
            .sum()
    } else {
        (0..input.rows())
            .map(|i| run(input.row(i), out.row_mut(i)))
            .sum()
    }
}

/// Reason a row cannot go through a logarithm, if any.
pub(crate) fn check_positive_parts(row: &[f64]) -> Option<String> {
    row.iter()
        .enumerate()
        .find(|(_, &x)| !(x > 0.0 && x.is_finite()))
        .map(|(j, &x)| format!("part {} at column {} is not a positive finite value", x, j))
}

/// Reason a normalizing sum cannot be divided by, if any.
pub(crate) fn check_divisor(sum: f64) -> Option<String> {
    if sum == 0.0 || !sum.is_finite() {
        Some(format!("normalizing sum is {}", sum))
    } else {
        None
    }
}

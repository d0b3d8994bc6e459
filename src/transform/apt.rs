//! Additive Planar Transform (APT).
//!
//! Like closure, but the normalizing sum leaves out the last part. The
//! output keeps all D columns, the last one included.

use super::{check_divisor, run_rows, TransformConfig};
use crate::error::Result;
use crate::matrix::{check_same_dims, Matrix};

/// Apply the additive planar transform to every row of `input`.
///
/// # Formula
/// apt(x)_j = x_j / (x_0 + ... + x_{D-2}) for every j in 0..D
///
/// `out` must have the same shape as `input`. With a single part the sum is
/// empty, so the output is infinite or NaN unless the config fails fast.
pub fn apt(input: &Matrix, out: &mut Matrix) -> Result<()> {
    apt_with(input, out, &TransformConfig::default())
}

/// [`apt`] with explicit options.
pub fn apt_with(input: &Matrix, out: &mut Matrix, config: &TransformConfig) -> Result<()> {
    check_same_dims("apt", input.dims(), out.dims())?;
    run_rows(
        "apt",
        input,
        out,
        config,
        |row| check_divisor(leading_sum(row)),
        apt_row,
    )
}

fn leading_sum(row: &[f64]) -> f64 {
    row[..row.len().saturating_sub(1)].iter().sum()
}

fn apt_row(row: &[f64], out: &mut [f64]) {
    let sum = leading_sum(row);
    for (o, &x) in out.iter_mut().zip(row) {
        *o = x / sum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompositionError;
    use approx::assert_relative_eq;

    #[test]
    fn test_apt_excludes_last_part_from_sum() {
        let data = Matrix::from_rows(vec![vec![1.0, 3.0, 4.0]]).unwrap();
        let mut out = Matrix::new(1, 3);
        apt(&data, &mut out).unwrap();

        assert_relative_eq!(out[(0, 0)], 0.25, epsilon = 1e-12);
        assert_relative_eq!(out[(0, 1)], 0.75, epsilon = 1e-12);
        assert_relative_eq!(out[(0, 2)], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_apt_leading_parts_sum_to_one() {
        let data = Matrix::from_rows(vec![
            vec![0.2, 0.3, 0.5],
            vec![7.0, 1.0, 12.0],
        ])
        .unwrap();
        let mut out = Matrix::new(2, 3);
        apt(&data, &mut out).unwrap();
        for i in 0..2 {
            let leading: f64 = out.row(i)[..2].iter().sum();
            assert_relative_eq!(leading, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_apt_keeps_all_columns() {
        let data = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0]]).unwrap();
        let mut reduced = Matrix::new(1, 2);
        assert!(matches!(
            apt(&data, &mut reduced),
            Err(CompositionError::DimensionMismatch { context: "apt", expected: (1, 3), .. })
        ));
    }

    #[test]
    fn test_apt_single_part_is_degenerate() {
        let data = Matrix::from_rows(vec![vec![4.0]]).unwrap();
        let mut out = Matrix::new(1, 1);
        apt(&data, &mut out).unwrap();
        assert_eq!(out[(0, 0)], f64::INFINITY);

        let err = apt_with(&data, &mut out, &TransformConfig::new().fail_fast()).unwrap_err();
        assert!(matches!(err, CompositionError::NumericDegeneracy { transform: "apt", .. }));
    }
}

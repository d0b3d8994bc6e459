//! Additive Log-Ratio (ALR) transformation.
//!
//! ALR takes the log-ratio of each part against a reference part, here the
//! last column. The reference is dropped from the output, so a D-part input
//! gives D-1 unconstrained coordinates.
//!
//! | Property | CLR | ALR |
//! |----------|-----|-----|
//! | Output dimensions | D | D-1 |
//! | Sum constraint | Sums to zero | None |
//! | Reference | Geometric mean | Last part |

use super::{check_positive_parts, run_rows, Transform, TransformConfig};
use crate::error::{CompositionError, Result};
use crate::matrix::{check_same_dims, Matrix};

/// Apply the additive log-ratio transform to every row of `input`.
///
/// # Formula
/// alr(x)_j = ln(x_j / x_{D-1}) for j in 0..D-1
///
/// `out` must have the same number of rows as `input` and exactly one fewer
/// column. An input with a single part gives an output with no columns.
pub fn alr(input: &Matrix, out: &mut Matrix) -> Result<()> {
    alr_with(input, out, &TransformConfig::default())
}

/// [`alr`] with explicit options.
pub fn alr_with(input: &Matrix, out: &mut Matrix, config: &TransformConfig) -> Result<()> {
    let (rows, cols) = input.dims();
    if rows > 0 && cols == 0 {
        return Err(CompositionError::InvalidParameter(
            "ALR requires at least one part to use as reference".to_string(),
        ));
    }
    check_same_dims("alr", Transform::Alr.output_dims(rows, cols), out.dims())?;
    run_rows("alr", input, out, config, check_positive_parts, alr_row)
}

fn alr_row(row: &[f64], out: &mut [f64]) {
    let reference = row[row.len() - 1];
    for (o, &x) in out.iter_mut().zip(row) {
        *o = (x / reference).ln();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_alr_known_values() {
        let data = Matrix::from_rows(vec![vec![2.0, 4.0, 8.0]]).unwrap();
        let mut out = Matrix::new(1, 2);
        alr(&data, &mut out).unwrap();

        assert_relative_eq!(out[(0, 0)], 0.25_f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(out[(0, 1)], 0.5_f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(out[(0, 0)], -1.3863, epsilon = 1e-4);
        assert_relative_eq!(out[(0, 1)], -0.6931, epsilon = 1e-4);
    }

    #[test]
    fn test_alr_uses_last_column_as_reference() {
        let data = Matrix::from_rows(vec![
            vec![3.0, 6.0, 3.0],
            vec![1.0, 10.0, 100.0],
        ])
        .unwrap();
        let mut out = Matrix::new(2, 2);
        alr(&data, &mut out).unwrap();

        assert_relative_eq!(out[(0, 0)], 0.0, epsilon = 1e-12);
        assert_relative_eq!(out[(0, 1)], 2.0_f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(out[(1, 0)], 0.01_f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(out[(1, 1)], 0.1_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_alr_requires_one_fewer_column() {
        let data = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0]]).unwrap();

        let mut same_shape = Matrix::new(1, 3);
        let err = alr(&data, &mut same_shape).unwrap_err();
        assert!(matches!(
            err,
            CompositionError::DimensionMismatch { context: "alr", expected: (1, 2), actual: (1, 3) }
        ));

        let mut wrong_rows = Matrix::new(2, 2);
        assert!(alr(&data, &mut wrong_rows).is_err());
    }

    #[test]
    fn test_alr_single_part() {
        let data = Matrix::from_rows(vec![vec![5.0], vec![2.0]]).unwrap();
        let mut out = Matrix::new(2, 0);
        alr(&data, &mut out).unwrap();
        assert_eq!(out.dims(), (2, 0));
    }

    #[test]
    fn test_alr_no_parts_rejected() {
        let data = Matrix::new(2, 0);
        let mut out = Matrix::new(2, 0);
        assert!(matches!(
            alr(&data, &mut out),
            Err(CompositionError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_alr_zero_reference() {
        let data = Matrix::from_rows(vec![vec![1.0, 2.0, 0.0]]).unwrap();
        let mut out = Matrix::new(1, 2);
        alr(&data, &mut out).unwrap();
        assert_eq!(out[(0, 0)], f64::INFINITY);

        let err = alr_with(&data, &mut out, &TransformConfig::new().fail_fast()).unwrap_err();
        assert!(matches!(err, CompositionError::NumericDegeneracy { transform: "alr", row: 0, .. }));
    }
}

//! Dense row-major matrix of `f64` values.

use crate::error::{CompositionError, Result};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A dense matrix of compositions (rows = observations, columns = parts).
///
/// Elements live in one contiguous row-major buffer; row views are slices
/// into that buffer, so writes through [`Matrix::row_mut`] are visible
/// through every other accessor.
///
/// A matrix with zero rows always reports zero columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix", into = "RawMatrix")]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

/// Serialized form of a [`Matrix`], validated on the way back in.
#[derive(Serialize, Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = CompositionError;

    fn try_from(raw: RawMatrix) -> Result<Self> {
        Matrix::from_vec(raw.rows, raw.cols, raw.data)
    }
}

impl From<Matrix> for RawMatrix {
    fn from(m: Matrix) -> Self {
        RawMatrix {
            rows: m.rows,
            cols: m.cols,
            data: m.data,
        }
    }
}

impl Matrix {
    /// Create a zero-filled matrix with the given shape.
    ///
    /// # Panics
    /// Panics if `rows * cols` overflows `usize`.
    pub fn new(rows: usize, cols: usize) -> Self {
        let cols = if rows == 0 { 0 } else { cols };
        let len = rows
            .checked_mul(cols)
            .unwrap_or_else(|| panic!("{}x{} matrix size overflows usize", rows, cols));
        Self {
            data: vec![0.0; len],
            rows,
            cols,
        }
    }

    /// Create a matrix from a row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let cols = if rows == 0 { 0 } else { cols };
        let len = rows.checked_mul(cols).ok_or_else(|| {
            CompositionError::InvalidParameter(format!(
                "{}x{} matrix size overflows usize",
                rows, cols
            ))
        })?;
        if data.len() != len {
            return Err(CompositionError::InvalidParameter(format!(
                "{}x{} matrix needs {} elements, got {}",
                rows,
                cols,
                len,
                data.len()
            )));
        }
        Ok(Self { data, rows, cols })
    }

    /// Create a matrix by copying a row-major slice.
    pub fn from_row_slice(rows: usize, cols: usize, data: &[f64]) -> Result<Self> {
        Self::from_vec(rows, cols, data.to_vec())
    }

    /// Create a matrix from a list of rows. All rows must have equal length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(CompositionError::RaggedRow {
                    row: i,
                    expected: n_cols,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }
        Self::from_vec(n_rows, n_cols, data)
    }

    /// Dimensions as `(rows, cols)`.
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of rows (observations).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (parts). Zero for a matrix without rows.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the matrix holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at `(row, col)`, or `None` when out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Set the element at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the index is out of range.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self[(row, col)] = value;
    }

    /// Row `i` as a slice.
    ///
    /// # Panics
    /// Panics if `i >= rows()`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.rows, "row {} out of range ({} rows)", i, self.rows);
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Row `i` as a mutable slice aliasing the matrix buffer.
    ///
    /// # Panics
    /// Panics if `i >= rows()`.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        assert!(i < self.rows, "row {} out of range ({} rows)", i, self.rows);
        let start = i * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Iterate over rows as slices.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        // not chunks(): a zero-column matrix can still have rows
        (0..self.rows).map(move |i| &self.data[i * self.cols..(i + 1) * self.cols])
    }

    /// Column `j` copied into a vector.
    pub fn column(&self, j: usize) -> Vec<f64> {
        assert!(j < self.cols, "column {} out of range ({} cols)", j, self.cols);
        (0..self.rows).map(|i| self.data[i * self.cols + j]).collect()
    }

    /// The whole row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// The whole row-major buffer, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Sum of each row.
    pub fn row_sums(&self) -> Vec<f64> {
        self.rows_iter().map(|row| row.iter().sum()).collect()
    }

    /// Copy this matrix into `target`.
    ///
    /// # Panics
    /// Both matrices must have the same shape; this is not checked beyond
    /// the slice copy itself. Use [`Matrix::try_copy_to`] for a checked copy.
    pub fn copy_to(&self, target: &mut Matrix) {
        target.data.copy_from_slice(&self.data);
    }

    /// Copy `source` into this matrix.
    ///
    /// # Panics
    /// Same precondition as [`Matrix::copy_to`].
    pub fn copy_from(&mut self, source: &Matrix) {
        self.data.copy_from_slice(&source.data);
    }

    /// Copy this matrix into `target`, failing if shapes differ.
    pub fn try_copy_to(&self, target: &mut Matrix) -> Result<()> {
        check_same_dims("copy_to", self.dims(), target.dims())?;
        self.copy_to(target);
        Ok(())
    }

    /// Copy `source` into this matrix, failing if shapes differ.
    pub fn try_copy_from(&mut self, source: &Matrix) -> Result<()> {
        check_same_dims("copy_from", self.dims(), source.dims())?;
        self.copy_from(source);
        Ok(())
    }

    /// Swap rows `i` and `j` in place.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        assert!(
            i < self.rows && j < self.rows,
            "row swap ({}, {}) out of range ({} rows)",
            i,
            j,
            self.rows
        );
        if i == j {
            return;
        }
        let (lo, hi) = (i.min(j), i.max(j));
        let cols = self.cols;
        let (head, tail) = self.data.split_at_mut(hi * cols);
        head[lo * cols..(lo + 1) * cols].swap_with_slice(&mut tail[..cols]);
    }

    /// Swap columns `i` and `j` in place.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn swap_cols(&mut self, i: usize, j: usize) {
        assert!(
            i < self.cols && j < self.cols,
            "column swap ({}, {}) out of range ({} cols)",
            i,
            j,
            self.cols
        );
        for k in 0..self.rows {
            self.data.swap(k * self.cols + i, k * self.cols + j);
        }
    }

    /// Transposed copy of this matrix.
    ///
    /// A matrix without rows reports zero columns, so an R x 0 matrix with
    /// R > 0 (for example the [`alr`](crate::transform::alr()) image of
    /// single-part compositions) transposes to 0x0 and does not survive a
    /// double transpose. Every matrix with at least one column does.
    pub fn transpose(&self) -> Matrix {
        let mut t = Matrix::new(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                t.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        t
    }

    /// Exact elementwise equality, including shape. No tolerance is applied.
    pub fn equals(&self, other: &Matrix) -> bool {
        self.dims() == other.dims() && self.data == other.data
    }

    /// Convert to a nalgebra matrix with the same orientation.
    pub fn to_dmatrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.rows, self.cols, &self.data)
    }

    /// Create from a nalgebra matrix with the same orientation.
    pub fn from_dmatrix(m: &DMatrix<f64>) -> Self {
        let (rows, cols) = m.shape();
        let mut out = Matrix::new(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                out.data[i * out.cols + j] = m[(i, j)];
            }
        }
        out
    }
}

/// Fail with `DimensionMismatch` unless `actual == expected`.
pub(crate) fn check_same_dims(
    context: &'static str,
    expected: (usize, usize),
    actual: (usize, usize),
) -> Result<()> {
    if expected != actual {
        return Err(CompositionError::DimensionMismatch {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.row(row)[col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.row_mut(row)[col]
    }
}

impl Index<usize> for Matrix {
    type Output = [f64];

    fn index(&self, row: usize) -> &[f64] {
        self.row(row)
    }
}

impl IndexMut<usize> for Matrix {
    fn index_mut(&mut self, row: usize) -> &mut [f64] {
        self.row_mut(row)
    }
}

impl From<&DMatrix<f64>> for Matrix {
    fn from(m: &DMatrix<f64>) -> Self {
        Matrix::from_dmatrix(m)
    }
}

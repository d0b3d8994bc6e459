//! Text renderings of a matrix. None of these mutate the matrix.

use super::Matrix;
use std::fmt::{self, Write as _};

impl Matrix {
    /// Comma-joined values per row, shortest round-trip formatting.
    pub fn to_csv_string(&self) -> String {
        self.render_rows(|v| v.to_string(), ",", "", "")
    }

    /// Comma-joined values per row, each formatted as `{:6.3}`.
    pub fn to_csv3_string(&self) -> String {
        self.render_rows(|v| format!("{:6.3}", v), ",", "", "")
    }

    /// Space-separated values per row followed by a blank line.
    pub fn plain_string(&self) -> String {
        let mut s = String::new();
        for row in self.rows_iter() {
            for v in row {
                let _ = write!(s, "{} ", v);
            }
            s.push('\n');
        }
        s.push('\n');
        s
    }

    /// Bracketed table with right-aligned columns and a trailing `(RxC)`.
    ///
    /// ```
    /// use compositions::Matrix;
    ///
    /// let m = Matrix::from_rows(vec![vec![1.0, 0.5], vec![10.0, 2.0]]).unwrap();
    /// assert_eq!(m.pretty_string(), "[[ 1 0.5]\n [10   2]](2x2)\n");
    /// ```
    ///
    /// A matrix without rows renders as the empty string.
    ///
    /// Cells use `Display` for `f64`, which never switches to exponent
    /// notation: `1e-5` renders as `0.00001` and `1e21` as
    /// `1000000000000000000000`, not `1e-05` or `1e+21`. Tools parsing this
    /// table must accept plain decimals.
    pub fn pretty_string(&self) -> String {
        let cells: Vec<Vec<String>> = self
            .rows_iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect();

        let mut widths = vec![0usize; self.cols()];
        for row in &cells {
            for (j, cell) in row.iter().enumerate() {
                widths[j] = widths[j].max(cell.len());
            }
        }

        let mut res = String::new();
        for (i, row) in cells.iter().enumerate() {
            res.push(if i == 0 { '[' } else { ' ' });
            res.push('[');
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    res.push(' ');
                }
                let _ = write!(res, "{:>width$}", cell, width = widths[j]);
            }
            res.push(']');
            if i == cells.len() - 1 {
                let _ = write!(res, "]({}x{})", self.rows(), self.cols());
            }
            res.push('\n');
        }
        res
    }

    /// Rust source that rebuilds this matrix with [`Matrix::from_rows`].
    pub fn to_rust_literal(&self) -> String {
        self.render_literal(|v| format!("{:?}", v))
    }

    /// Like [`Matrix::to_rust_literal`] with cells rounded to 3 decimals.
    pub fn to_rust_literal3(&self) -> String {
        self.render_literal(|v| format!("{:6.3}", v))
    }

    fn render_literal(&self, cell: impl Fn(f64) -> String) -> String {
        let mut s = String::from("let matrix = Matrix::from_rows(vec![\n");
        s.push_str(&self.render_rows(cell, ", ", "    vec![", "],"));
        s.push_str("])?;\n");
        s
    }

    fn render_rows(
        &self,
        cell: impl Fn(f64) -> String,
        sep: &str,
        open: &str,
        close: &str,
    ) -> String {
        let mut s = String::new();
        for row in self.rows_iter() {
            s.push_str(open);
            let joined: Vec<String> = row.iter().map(|&v| cell(v)).collect();
            s.push_str(&joined.join(sep));
            s.push_str(close);
            s.push('\n');
        }
        s
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty_string())
    }
}

//! CSV load and store for matrices.
//!
//! The accepted format is strict: one observation per line, comma-separated,
//! no header row and no whitespace around values. Every cell must parse as an
//! `f64`, and every record must have the same number of fields.

use super::Matrix;
use crate::error::{CompositionError, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

impl Matrix {
    /// Read a matrix from CSV text.
    ///
    /// Fails on the first malformed record or non-numeric cell; no partial
    /// matrix is returned. Empty input yields a 0x0 matrix.
    pub fn read_csv<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let mut data = Vec::new();
        let mut n_rows = 0;
        let mut n_cols = 0;

        for (row, record) in rdr.records().enumerate() {
            let record = record?;
            if row == 0 {
                n_cols = record.len();
            }
            for (col, field) in record.iter().enumerate() {
                let value: f64 = field.parse().map_err(|_| CompositionError::InvalidValue {
                    value: field.to_string(),
                    row,
                    col,
                })?;
                data.push(value);
            }
            n_rows += 1;
        }

        debug!(rows = n_rows, cols = n_cols, "Loaded matrix from CSV");
        Self::from_vec(n_rows, n_cols, data)
    }

    /// Load a matrix from a CSV file.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::read_csv(BufReader::new(file))
    }

    /// Write the matrix as CSV using shortest round-trip formatting, so that
    /// reading the output back yields an equal matrix.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        for row in self.rows_iter() {
            wtr.write_record(row.iter().map(|v| v.to_string()))?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write the matrix to a CSV file.
    pub fn to_csv_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_csv(BufWriter::new(file))
    }
}

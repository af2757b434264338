//! Dense feature matrix
//!
//! One row per surviving corpus document, row index equal to corpus
//! index. Built once by the vectorizer, then shared read-only across
//! scoring workers.

use crate::error::{AltairError, Result};

/// Row-major dense matrix of document feature vectors
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl FeatureMatrix {
    /// Assemble a matrix from per-document vectors, enforcing a uniform
    /// column count
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        let row_count = rows.len();
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(AltairError::DimensionMismatch {
                    row: i,
                    got: row.len(),
                    expected: cols,
                });
            }
            data.extend(row);
        }
        Ok(Self {
            data,
            rows: row_count,
            cols,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Feature vector of document `i`
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }
}

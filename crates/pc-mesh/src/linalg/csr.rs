//! Compressed sparse row matrix.

use crate::error::{MeshError, MeshResult};
use nalgebra::DVector;
use std::collections::BTreeMap;

/// Square sparse matrix in CSR layout with sorted column indices per row.
#[derive(Debug, Clone)]
pub struct CsrMatrix {
    n: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<f64>,
}

impl CsrMatrix {
    pub fn n_rows(&self) -> usize {
        self.n
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let range = self.row_ptr[row]..self.row_ptr[row + 1];
        self.col_idx[range.clone()]
            .iter()
            .copied()
            .zip(self.values[range].iter().copied())
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        let start = self.row_ptr[row];
        let end = self.row_ptr[row + 1];
        match self.col_idx[start..end].binary_search(&col) {
            Ok(i) => self.values[start + i],
            Err(_) => 0.0,
        }
    }

    pub fn diagonal(&self) -> DVector<f64> {
        DVector::from_fn(self.n, |i, _| self.get(i, i))
    }

    /// `y = A x`
    pub fn mul_vec(&self, x: &DVector<f64>, y: &mut DVector<f64>) -> MeshResult<()> {
        MeshError::check_len("matrix operand", self.n, x.len())?;
        MeshError::check_len("matrix result", self.n, y.len())?;
        for i in 0..self.n {
            y[i] = self.row(i).map(|(j, a)| a * x[j]).sum();
        }
        Ok(())
    }

    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.n).all(|i| self.row(i).all(|(j, a)| (a - self.get(j, i)).abs() <= tol))
    }
}

/// Accumulates entries row by row, summing duplicates.
#[derive(Debug, Clone)]
pub struct CsrBuilder {
    rows: Vec<BTreeMap<usize, f64>>,
}

impl CsrBuilder {
    pub fn new(n: usize) -> Self {
        Self {
            rows: vec![BTreeMap::new(); n],
        }
    }

    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        *self.rows[row].entry(col).or_insert(0.0) += value;
    }

    pub fn build(self) -> CsrMatrix {
        let n = self.rows.len();
        let mut row_ptr = Vec::with_capacity(n + 1);
        let mut col_idx = Vec::new();
        let mut values = Vec::new();
        row_ptr.push(0);
        for row in self.rows {
            for (col, value) in row {
                col_idx.push(col);
                values.push(value);
            }
            row_ptr.push(col_idx.len());
        }
        CsrMatrix {
            n,
            row_ptr,
            col_idx,
            values,
        }
    }
}

//! Parallel matrix multiplication with one task per output cell.
//!
//! Each task reads one row of A and one column of B, computes the dot
//! product, and writes its own cell of C. Cell ownership is statically
//! partitioned, so C itself needs no lock; only the shared print stream
//! is serialized.

use std::io::Write;
use std::thread;

use rand::Rng;
use thiserror::Error;

use crate::sink::LineSink;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("inner dimensions do not match: left is {left_rows}x{left_cols}, right is {right_rows}x{right_cols}")]
    DimensionMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },
}

/// Row-major matrix of integers with fixed dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    data: Vec<i64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Creates a zero-filled matrix. Dimensions must be at least 1x1.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows >= 1 && cols >= 1, "matrix dimensions must be >= 1");
        Self {
            data: vec![0; rows * cols],
            rows,
            cols,
        }
    }

    /// Creates a matrix filled with uniform random digits in 0..10.
    pub fn random(rows: usize, cols: usize) -> Self {
        let mut rng = rand::thread_rng();
        let mut m = Self::new(rows, cols);
        for cell in &mut m.data {
            *cell = rng.gen_range(0..10);
        }
        m
    }

    /// Builds a matrix from row vectors. All rows must have equal length.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        assert!(!rows.is_empty() && cols >= 1, "matrix dimensions must be >= 1");
        assert!(
            rows.iter().all(|r| r.len() == cols),
            "all rows must have the same length"
        );
        Self {
            rows: rows.len(),
            cols,
            data: rows.into_iter().flatten().collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        self.data[row * self.cols + col] = value;
    }
}

fn check_conformant(a: &Matrix, b: &Matrix) -> Result<(), MatrixError> {
    if a.cols != b.rows {
        return Err(MatrixError::DimensionMismatch {
            left_rows: a.rows,
            left_cols: a.cols,
            right_rows: b.rows,
            right_cols: b.cols,
        });
    }
    Ok(())
}

/// Naive sequential triple-loop product, the reference implementation.
pub fn multiply_seq(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    check_conformant(a, b)?;
    let mut c = Matrix::new(a.rows, b.cols);
    for i in 0..a.rows {
        for j in 0..b.cols {
            let mut sum = 0;
            for t in 0..a.cols {
                sum += a.get(i, t) * b.get(t, j);
            }
            c.set(i, j, sum);
        }
    }
    Ok(c)
}

/// Computes `a * b` with one scoped task per output cell.
///
/// Every task writes its own cell of the result and then emits a
/// `[row,col]=value` line through `sink`. Line order across cells is
/// nondeterministic. Returns only after every task has joined, so the
/// result is safe to read on return.
pub fn multiply_parallel<W: Write + Send>(
    a: &Matrix,
    b: &Matrix,
    sink: &LineSink<W>,
) -> Result<Matrix, MatrixError> {
    check_conformant(a, b)?;
    let mut c = Matrix::new(a.rows, b.cols);
    let cols = c.cols;

    // chunks_mut(1) hands each task exclusive &mut access to exactly one
    // cell, so the result matrix needs no lock.
    thread::scope(|s| {
        for (idx, cell) in c.data.chunks_mut(1).enumerate() {
            let (row, col) = (idx / cols, idx % cols);
            s.spawn(move || {
                let mut sum = 0;
                for t in 0..a.cols {
                    sum += a.get(row, t) * b.get(t, col);
                }
                cell[0] = sum;
                sink.writeln(&format!("[{row},{col}]={sum}"));
            });
        }
    });

    Ok(c)
}

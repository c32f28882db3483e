//! Dense row-major matrices with explicit dimensions.

use std::ops::{Index, IndexMut};

use crate::modular::BigInt;

/// Row-major matrix over `T` backed by a flat buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Matrix of mod-q integers.
pub type BigIntMatrix = Matrix<BigInt>;

/// Matrix of 0/1 values.
pub type BitMatrix = Matrix<u8>;

/// A GSW ciphertext: an N x N bit matrix with `Flatten(C) = C`.
pub type Ciphertext = BitMatrix;

impl<T: Default + Clone> Matrix<T> {
    /// All-default (zero) matrix of the given shape.
    pub fn zeroed(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::default(); rows * cols],
        }
    }
}

impl<T> Matrix<T> {
    /// Wrap an existing row-major buffer. The length must match the shape.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    /// Assemble a matrix out of equally sized rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        let nrows = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(nrows * cols);
        for row in rows {
            debug_assert_eq!(row.len(), cols);
            data.extend(row);
        }
        Self {
            rows: nrows,
            cols,
            data,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[i * self.cols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.data[i * self.cols + j]
    }
}

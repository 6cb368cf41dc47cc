use std::error::Error;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::math::vector::Array1;

/// Dense row-major two-dimensional array.
///
/// Row 0 occupies the first `n_cols` elements of the buffer. This is
/// the crate's feature-matrix type; models convert to `ndarray` at
/// the boundary where an external crate needs it.
#[derive(Clone, Debug, PartialEq)]
pub struct Array2<T> {
    buf: Vec<T>,
    n_rows: usize,
    n_cols: usize,
}

impl<T> Array2<T> {
    pub fn from_shape_vec(shape: (usize, usize), buf: Vec<T>) -> Result<Self, ShapeError> {
        let (n_rows, n_cols) = shape;
        if buf.len() != n_rows * n_cols {
            return Err(ShapeError {
                shape,
                len: buf.len(),
            });
        }
        Ok(Array2 {
            buf,
            n_rows,
            n_cols,
        })
    }

    /// Stack `n` copies of one row into a matrix.
    pub fn from_row(row: &[T], n: usize) -> Array2<T>
    where
        T: Clone,
    {
        Array2 {
            buf: row.iter().cycle().take(n * row.len()).cloned().collect(),
            n_rows: n,
            n_cols: row.len(),
        }
    }

    pub fn nrows(&self) -> usize {
        self.n_rows
    }

    pub fn ncols(&self) -> usize {
        self.n_cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// The full row-major buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }

    pub fn row_slice(&self, row: usize) -> &[T] {
        &self.buf[row * self.n_cols..(row + 1) * self.n_cols]
    }

    pub fn column(&self, col: usize) -> Array1<T>
    where
        T: Clone,
    {
        assert!(col < self.n_cols, "column {} out of bounds", col);
        (0..self.n_rows).map(|row| self[(row, col)].clone()).collect()
    }

    pub fn set_column(&mut self, col: usize, values: &[T])
    where
        T: Clone,
    {
        assert!(col < self.n_cols, "column {} out of bounds", col);
        assert_eq!(values.len(), self.n_rows, "column length mismatch");
        for (row, value) in values.iter().enumerate() {
            self[(row, col)] = value.clone();
        }
    }

    /// Copy the given rows, in index order, into a new matrix.
    pub fn select_rows(&self, indices: &[usize]) -> Array2<T>
    where
        T: Clone,
    {
        let mut buf = Vec::with_capacity(indices.len() * self.n_cols);
        for &row in indices {
            buf.extend_from_slice(self.row_slice(row));
        }
        Array2 {
            buf,
            n_rows: indices.len(),
            n_cols: self.n_cols,
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.buf.clone()
    }
}

impl<T> Index<(usize, usize)> for Array2<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.buf[row * self.n_cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Array2<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.buf[row * self.n_cols + col]
    }
}

/// Buffer length does not match the requested shape.
#[derive(Debug, Clone)]
pub struct ShapeError {
    shape: (usize, usize),
    len: usize,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid shape ({}, {}) for buffer of length {}",
            self.shape.0, self.shape.1, self.len
        )
    }
}

impl Error for ShapeError {}

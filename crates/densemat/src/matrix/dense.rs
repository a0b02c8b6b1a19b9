use std::fmt;
use std::ops::{Index, IndexMut};

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::error::MatrixError;

/// Dense row-major matrix of `f64`.
///
/// Element `(row, col)` is stored at `data[row * cols + col]`, and
/// `data.len() == rows * cols` holds for every value of this type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    pub(super) data: Vec<f64>,
    pub(super) rows: usize,
    pub(super) cols: usize,
}

/// Unvalidated wire form; goes through `Matrix::new` on the way in.
#[derive(Deserialize)]
struct RawMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = MatrixError;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        Matrix::new(raw.data, raw.rows, raw.cols)
    }
}

impl Matrix {
    /// Takes ownership of `data` as a `rows x cols` matrix.
    ///
    /// Fails with [`MatrixError::Dimensions`] when `data.len() != rows * cols`.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self, MatrixError> {
        match rows.checked_mul(cols) {
            Some(len) if len == data.len() => Ok(Self { data, rows, cols }),
            _ => Err(MatrixError::Dimensions),
        }
    }

    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self, MatrixError> {
        Self::new(data, shape.0, shape.1)
    }

    /// Builds a matrix from row-grouped input.
    ///
    /// The column count is taken from the first row; every other row must
    /// have the same length or the call fails with [`MatrixError::Dimensions`].
    /// An empty input yields a `0 x 0` matrix.
    pub fn from_rows<R: AsRef<[f64]>>(input: &[R]) -> Result<Self, MatrixError> {
        let rows = input.len();
        let cols = input.first().map_or(0, |r| r.as_ref().len());
        if input.iter().any(|r| r.as_ref().len() != cols) {
            return Err(MatrixError::Dimensions);
        }
        let mut data = Vec::with_capacity(rows * cols);
        for row in input {
            data.extend_from_slice(row.as_ref());
        }
        Ok(Self { data, rows, cols })
    }

    /// Element count of a `rows x cols` matrix.
    ///
    /// Panics when the product overflows `usize`, the same way `vec!` panics
    /// on capacity overflow.
    pub(super) fn filled_len(rows: usize, cols: usize) -> usize {
        rows.checked_mul(cols)
            .unwrap_or_else(|| panic!("matrix shape ({}, {}) overflows usize", rows, cols))
    }

    pub fn from_elem(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            data: vec![value; Self::filled_len(rows, cols)],
            rows,
            cols,
        }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_elem(rows, cols, 0.0)
    }

    pub fn ones(rows: usize, cols: usize) -> Self {
        Self::from_elem(rows, cols, 1.0)
    }

    /// Fills a `rows x cols` matrix with uniform draws from `[0, 1)`.
    pub fn rand<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let data = (0..Self::filled_len(rows, cols))
            .map(|_| rng.gen::<f64>())
            .collect();
        Self { data, rows, cols }
    }

    /// Fills a `rows x cols` matrix with `z * std_dev + mean`, `z ~ N(0, 1)`.
    pub fn rand_norm<R: Rng + ?Sized>(
        std_dev: f64,
        mean: f64,
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Self {
        let data = (0..Self::filled_len(rows, cols))
            .map(|_| {
                let z: f64 = rng.sample(StandardNormal);
                z * std_dev + mean
            })
            .collect();
        Self { data, rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Live view of the whole buffer in storage order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable view of the whole buffer; writes go straight to the matrix.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[inline]
    fn checked_offset(&self, row: usize, col: usize) -> Result<usize, MatrixError> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::Index);
        }
        Ok(self.offset(row, col))
    }

    /// Ensures `[start, start + len)` fits in `bound`.
    #[inline]
    fn check_span(start: usize, len: usize, bound: usize) -> Result<(), MatrixError> {
        match start.checked_add(len) {
            Some(end) if end <= bound => Ok(()),
            _ => Err(MatrixError::Index),
        }
    }

    pub(super) fn row_slice(&self, row: usize) -> &[f64] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        let offset = self.checked_offset(row, col)?;
        Ok(self.data[offset])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), MatrixError> {
        let offset = self.checked_offset(row, col)?;
        self.data[offset] = value;
        Ok(())
    }

    /// Borrowed view of a single row.
    pub fn row(&self, row: usize) -> Result<&[f64], MatrixError> {
        if row >= self.rows {
            return Err(MatrixError::Index);
        }
        Ok(self.row_slice(row))
    }

    /// Writes `value` into every element of `row`.
    pub fn set_row(&mut self, row: usize, value: f64) -> Result<(), MatrixError> {
        if row >= self.rows {
            return Err(MatrixError::Index);
        }
        let start = self.offset(row, 0);
        let cols = self.cols;
        self.data[start..start + cols].fill(value);
        Ok(())
    }

    /// Writes `value` into every element of `col`.
    pub fn set_col(&mut self, col: usize, value: f64) -> Result<(), MatrixError> {
        if col >= self.cols {
            return Err(MatrixError::Index);
        }
        for v in self.data.iter_mut().skip(col).step_by(self.cols) {
            *v = value;
        }
        Ok(())
    }

    /// Copies all of `sub` into this matrix with its top-left corner at
    /// `(row, col)`. Nothing is written unless `sub` fits entirely.
    pub fn set_slice(&mut self, row: usize, col: usize, sub: &Matrix) -> Result<(), MatrixError> {
        Self::check_span(row, sub.rows, self.rows)?;
        Self::check_span(col, sub.cols, self.cols)?;
        for i in 0..sub.rows {
            let start = self.offset(row + i, col);
            self.data[start..start + sub.cols].copy_from_slice(sub.row_slice(i));
        }
        Ok(())
    }

    /// One borrowed window per row, aliasing the matrix buffer.
    pub fn rows_view(&self) -> Vec<&[f64]> {
        (0..self.rows).map(|r| self.row_slice(r)).collect()
    }

    /// Mutable row windows; writing through them mutates the matrix.
    pub fn rows_view_mut(&mut self) -> Vec<&mut [f64]> {
        if self.cols == 0 {
            return (0..self.rows).map(|_| Default::default()).collect();
        }
        self.data.chunks_exact_mut(self.cols).collect()
    }

    /// Deep copy with its own buffer. Same as `clone`.
    pub fn copy(&self) -> Matrix {
        self.clone()
    }

    /// Copies the `rows x cols` region starting at `(row, col)` into a new matrix.
    pub fn slice(
        &self,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    ) -> Result<Matrix, MatrixError> {
        Self::check_span(row, rows, self.rows)?;
        Self::check_span(col, cols, self.cols)?;
        let mut data = Vec::with_capacity(rows * cols);
        for i in row..row + rows {
            data.extend_from_slice(&self.row_slice(i)[col..col + cols]);
        }
        Ok(Matrix { data, rows, cols })
    }

    /// Sum of all elements, accumulated in storage order.
    pub fn sum(&self) -> f64 {
        self.data.iter().fold(0.0, |acc, &v| acc + v)
    }

    fn check_same_shape(&self, other: &Matrix) -> Result<(), MatrixError> {
        if self.shape() != other.shape() {
            return Err(MatrixError::Dimensions);
        }
        Ok(())
    }

    /// In-place elementwise `self += other`.
    pub fn add(&mut self, other: &Matrix) -> Result<(), MatrixError> {
        self.check_same_shape(other)?;
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += b;
        }
        Ok(())
    }

    /// In-place elementwise `self -= other`.
    pub fn sub(&mut self, other: &Matrix) -> Result<(), MatrixError> {
        self.check_same_shape(other)?;
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a -= b;
        }
        Ok(())
    }

    pub fn multiply_scalar(&mut self, x: f64) {
        for v in self.data.iter_mut() {
            *v *= x;
        }
    }

    /// Divides every element by `x`; `x == 0.0` yields infinities or NaN.
    pub fn divide_scalar(&mut self, x: f64) {
        for v in self.data.iter_mut() {
            *v /= x;
        }
    }

    pub fn pow(&mut self, exponent: f64) {
        for v in self.data.iter_mut() {
            *v = v.powf(exponent);
        }
    }

    pub fn mapv<F>(&self, mut f: F) -> Matrix
    where
        F: FnMut(f64) -> f64,
    {
        Matrix {
            data: self.data.iter().map(|&v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Exact comparison: same shape and `==` on every element, so NaN never
    /// compares equal.
    pub fn equals(&self, other: &Matrix) -> bool {
        self == other
    }

    /// Encodes the buffer as consecutive little-endian `f64` values in
    /// storage order. No shape or length header is written.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|v| v.to_le_bytes()).collect()
    }
}

impl From<Matrix> for Vec<f64> {
    fn from(value: Matrix) -> Self {
        value.data
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "index out of bounds"
        );
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "index out of bounds"
        );
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows == 0 || self.cols == 0 {
            return write!(f, "[]");
        }
        write!(f, "[")?;
        for (r, row) in self.data.chunks_exact(self.cols).enumerate() {
            if r > 0 {
                write!(f, "\n ")?;
            }
            for (c, value) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{:.6}", value)?;
            }
        }
        write!(f, "]")
    }
}

//! Operations that build a new matrix from one or two operands.
//!
//! Nothing here mutates its inputs. Every result owns a freshly allocated
//! buffer, so later writes to an operand never show up in a result.

use log::trace;

use crate::error::MatrixError;
use crate::matrix::Matrix;

/// Elementwise `a + b` as a new matrix. Shapes must match exactly.
pub fn add(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    let mut out = a.copy();
    out.add(b)?;
    Ok(out)
}

/// Elementwise `a - b` as a new matrix. Shapes must match exactly.
pub fn sub(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    let mut out = a.copy();
    out.sub(b)?;
    Ok(out)
}

pub fn multiply_scalar(m: &Matrix, x: f64) -> Matrix {
    let mut out = m.copy();
    out.multiply_scalar(x);
    out
}

pub fn divide_scalar(m: &Matrix, x: f64) -> Matrix {
    let mut out = m.copy();
    out.divide_scalar(x);
    out
}

/// Applies `f` to every element in storage order.
pub fn map<F>(m: &Matrix, f: F) -> Matrix
where
    F: FnMut(f64) -> f64,
{
    m.mapv(f)
}

/// Returns the `cols x rows` transpose of `m`.
pub fn transpose(m: &Matrix) -> Matrix {
    let (rows, cols) = m.shape();
    let mut data = vec![0.0; m.size()];
    for i in 0..rows {
        for j in 0..cols {
            data[j * rows + i] = m.data[i * cols + j];
        }
    }
    Matrix {
        data,
        rows: cols,
        cols: rows,
    }
}

/// Matrix product `a * b`.
///
/// Requires `a.cols() == b.rows()`. Each output element is accumulated from
/// `0.0` over ascending `k`, so results are reproducible bit for bit.
pub fn dot(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    if a.cols != b.rows {
        return Err(MatrixError::Dimensions);
    }
    trace!("dot: ({}, {}) x ({}, {})", a.rows, a.cols, b.rows, b.cols);
    let mut data = vec![0.0; Matrix::filled_len(a.rows, b.cols)];
    if b.cols > 0 {
        dot_rows(a, b, &mut data);
    }
    Ok(Matrix {
        data,
        rows: a.rows,
        cols: b.cols,
    })
}

fn dot_row(a: &Matrix, b: &Matrix, i: usize, out: &mut [f64]) {
    let lhs = a.row_slice(i);
    for (j, cell) in out.iter_mut().enumerate() {
        let mut acc = 0.0;
        for (k, &x) in lhs.iter().enumerate() {
            acc += x * b.data[k * b.cols + j];
        }
        *cell = acc;
    }
}

#[cfg(not(feature = "rayon"))]
fn dot_rows(a: &Matrix, b: &Matrix, data: &mut [f64]) {
    for (i, out) in data.chunks_exact_mut(b.cols).enumerate() {
        dot_row(a, b, i, out);
    }
}

#[cfg(feature = "rayon")]
fn dot_rows(a: &Matrix, b: &Matrix, data: &mut [f64]) {
    use rayon::prelude::*;

    data.par_chunks_exact_mut(b.cols)
        .enumerate()
        .for_each(|(i, out)| dot_row(a, b, i, out));
}

/// Reinterprets the storage-order sequence of `m` as `rows x cols`.
pub fn reshape(m: &Matrix, rows: usize, cols: usize) -> Result<Matrix, MatrixError> {
    Matrix::new(m.data.clone(), rows, cols)
}

/// Strict elementwise `a > b` over the overlap of the two shapes, encoded as
/// `1.0` / `0.0`.
///
/// Both operands are read at linear offset `i * cols + j`, where `cols` is
/// the overlap column count rather than each operand's own stride. When the
/// shapes differ this reads the leading `rows * cols` elements of each buffer,
/// which is not the same as comparing the top-left sub-rectangles.
pub fn greater(a: &Matrix, b: &Matrix) -> Matrix {
    let rows = a.rows.min(b.rows);
    let cols = a.cols.min(b.cols);
    if a.shape() != b.shape() {
        trace!(
            "greater: comparing ({}, {}) with ({}, {}) over the leading {} elements",
            a.rows,
            a.cols,
            b.rows,
            b.cols,
            rows * cols
        );
    }
    let data = a.data[..rows * cols]
        .iter()
        .zip(&b.data[..rows * cols])
        .map(|(x, y)| if x > y { 1.0 } else { 0.0 })
        .collect();
    Matrix { data, rows, cols }
}

/// Places `b` to the right of `a`. Row counts must match.
pub fn augment(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    if a.rows != b.rows {
        return Err(MatrixError::Dimensions);
    }
    let cols = a.cols + b.cols;
    let mut data = Vec::with_capacity(a.rows * cols);
    for i in 0..a.rows {
        data.extend_from_slice(a.row_slice(i));
        data.extend_from_slice(b.row_slice(i));
    }
    Ok(Matrix {
        data,
        rows: a.rows,
        cols,
    })
}

/// Places `b` below `a`. Column counts must match.
pub fn stack(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    if a.cols != b.cols {
        return Err(MatrixError::Dimensions);
    }
    let mut data = Vec::with_capacity(a.size() + b.size());
    data.extend_from_slice(&a.data);
    data.extend_from_slice(&b.data);
    Ok(Matrix {
        data,
        rows: a.rows + b.rows,
        cols: a.cols,
    })
}

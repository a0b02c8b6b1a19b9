use std::error::Error;
use std::fmt;

/// Failure kinds reported by fallible matrix operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// Two shapes, or a shape and an element count, are incompatible.
    Dimensions,
    /// A row, column or sub-region lies outside the matrix bounds.
    Index,
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatrixError::Dimensions => write!(f, "Incorrect dimensions"),
            MatrixError::Index => write!(f, "Index out of range"),
        }
    }
}

impl Error for MatrixError {}

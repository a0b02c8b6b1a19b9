//! Dense row-major matrix storage and the operations built on it.
//!
//! `Matrix` owns a flat `Vec<f64>` addressed as `row * cols + col`. Methods
//! on `Matrix` either read or mutate the receiver in place; the free
//! functions in [`ops`] always return a new matrix.
pub mod dense;
pub mod ops;

pub use dense::Matrix;
pub use ops::{
    add, augment, divide_scalar, dot, greater, map, multiply_scalar, reshape, stack, sub,
    transpose,
};

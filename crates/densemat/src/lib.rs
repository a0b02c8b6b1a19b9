//! densemat: a lightweight dense matrix of `f64`.
//!
//! This crate provides a row-major `Matrix` with shape-checked construction,
//! element access, slicing and elementwise arithmetic, plus matrix product,
//! transpose, reshape and concatenation helpers. A small serde-driven
//! `FillConfig` describes filled or randomly initialised matrices.
//!
//! Fallible operations return `Result<_, MatrixError>` and check shapes and
//! bounds before touching any data.
pub mod config;
pub mod error;
pub mod matrix;

pub use config::{FillConfig, FillKind};
pub use error::MatrixError;
pub use matrix::Matrix;

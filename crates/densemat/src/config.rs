use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::matrix::Matrix;

/// Describes how a freshly built matrix is filled.
///
/// Random fills draw from a `StdRng` seeded with `seed` when one is given,
/// so the same config always builds the same matrix.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct FillConfig {
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(flatten)]
    pub fill: FillKind,
}

/// Supported fill rules and their parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FillKind {
    Zeros,
    Ones,
    /// Uniform draws from `[0, 1)`.
    Uniform,
    /// Normal draws scaled as `z * std_dev + mean`.
    Normal { std_dev: f64, mean: f64 },
}

impl Default for FillKind {
    fn default() -> Self {
        FillKind::Zeros
    }
}

impl FromStr for FillKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zeros" => Ok(FillKind::Zeros),
            "ones" => Ok(FillKind::Ones),
            "uniform" | "rand" => Ok(FillKind::Uniform),
            "normal" | "randn" => Ok(FillKind::Normal {
                std_dev: 1.0,
                mean: 0.0,
            }),
            _ => Err(format!(
                "Unknown fill kind: {}. Expected one of zeros, ones, uniform, normal",
                s
            )),
        }
    }
}

impl FillConfig {
    pub fn new(fill: FillKind, seed: Option<u64>) -> Self {
        Self { seed, fill }
    }

    /// Random source for this config: seeded if `seed` is set, else from entropy.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::from_entropy(),
        }
    }

    /// Builds a `rows x cols` matrix following this config.
    pub fn build(&self, rows: usize, cols: usize) -> Matrix {
        debug!(
            "Building ({}, {}) matrix with fill {:?}, seed {:?}",
            rows, cols, self.fill, self.seed
        );
        match self.fill {
            FillKind::Zeros => Matrix::zeros(rows, cols),
            FillKind::Ones => Matrix::ones(rows, cols),
            FillKind::Uniform => Matrix::rand(rows, cols, &mut self.rng()),
            FillKind::Normal { std_dev, mean } => {
                Matrix::rand_norm(std_dev, mean, rows, cols, &mut self.rng())
            }
        }
    }
}

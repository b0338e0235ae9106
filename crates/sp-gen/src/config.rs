use std::fmt;
use std::str::FromStr;

use crate::error::{GenError, Result};

/// Which generator to build a matrix with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixKind {
    /// Uniformly distributed coordinates and values.
    Random,
    /// Recursive-matrix (R-MAT) power-law pattern.
    Rmat,
    /// Every entry present with value 1.0.
    Ones,
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixKind::Random => write!(f, "random"),
            MatrixKind::Rmat => write!(f, "rmat"),
            MatrixKind::Ones => write!(f, "ones"),
        }
    }
}

impl FromStr for MatrixKind {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "random" => Ok(MatrixKind::Random),
            "rmat" => Ok(MatrixKind::Rmat),
            "ones" => Ok(MatrixKind::Ones),
            other => Err(GenError::UnknownKind(other.to_string())),
        }
    }
}

/// Quadrant probabilities for R-MAT. The fourth probability is
/// `1 - a - b - c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RmatParams {
    /// Top-left quadrant.
    pub a: f64,
    /// Top-right quadrant.
    pub b: f64,
    /// Bottom-left quadrant.
    pub c: f64,
}

impl RmatParams {
    /// Bottom-right quadrant probability.
    pub fn d(&self) -> f64 {
        1.0 - self.a - self.b - self.c
    }

    pub fn validate(&self) -> Result<()> {
        let all = [self.a, self.b, self.c];
        if all.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(GenError::InvalidConfig(format!(
                "rmat probabilities must be non-negative, got {:?}",
                self
            )));
        }
        if self.d() < -1e-12 {
            return Err(GenError::InvalidConfig(format!(
                "rmat probabilities sum to {}, which exceeds 1",
                self.a + self.b + self.c
            )));
        }
        Ok(())
    }
}

impl Default for RmatParams {
    fn default() -> Self {
        Self {
            a: 0.57,
            b: 0.19,
            c: 0.19,
        }
    }
}

/// Parameters shared by all generators.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub nrows: usize,
    pub ncols: usize,
    /// Number of triples to draw. Ignored by `MatrixKind::Ones`.
    pub nnz: usize,
    pub seed: u64,
    pub rmat: RmatParams,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            nrows: 8192,
            ncols: 8192,
            nnz: 100_000,
            seed: 4567289,
            rmat: RmatParams::default(),
        }
    }
}

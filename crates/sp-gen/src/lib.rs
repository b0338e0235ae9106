//! `sp-gen` - seeded generators for test and benchmark matrices.
//!
//! Every generator draws from a `StdRng` seeded with `GeneratorConfig::seed`,
//! so the same configuration always yields the same matrix.

pub mod config;
pub mod error;
pub mod generator;
pub mod ones;
pub mod rmat;
pub mod uniform;

pub use config::{GeneratorConfig, MatrixKind, RmatParams};
pub use error::{GenError, Result};
pub use generator::{generate, random_vector, MatrixGenerator};
pub use ones::OnesGenerator;
pub use rmat::RmatGenerator;
pub use uniform::UniformGenerator;

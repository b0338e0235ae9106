use rand::rngs::StdRng;
use rand::Rng;

use sp_matrix::{CooMatrix, Element};

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::generator::{check_room, initial_capacity, MatrixGenerator};

/// Uniform generator: `nnz` triples with independent uniform row, column
/// and value in [0, 1). Coordinates may repeat.
pub struct UniformGenerator;

impl MatrixGenerator for UniformGenerator {
    fn name(&self) -> &str {
        "random"
    }

    fn generate(&self, config: &GeneratorConfig, rng: &mut StdRng) -> Result<CooMatrix> {
        let shape = check_room(config)?;
        let mut elements = Vec::with_capacity(initial_capacity(config.nnz));
        for _ in 0..config.nnz {
            let row = rng.gen_range(0..shape.nrows);
            let col = rng.gen_range(0..shape.ncols);
            elements.push(Element::new(row, col, rng.gen::<f64>()));
        }
        Ok(CooMatrix::new(shape, elements)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_uniform_in_bounds() {
        let cfg = GeneratorConfig {
            nrows: 10,
            ncols: 3,
            nnz: 500,
            seed: 1,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let m = UniformGenerator.generate(&cfg, &mut rng).unwrap();
        assert_eq!(m.nnz(), 500);
        assert!(m
            .elements()
            .iter()
            .all(|e| e.row < 10 && e.col < 3 && (0.0..1.0).contains(&e.value)));
    }

    #[test]
    fn test_uniform_zero_nnz() {
        let cfg = GeneratorConfig {
            nrows: 0,
            ncols: 0,
            nnz: 0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(UniformGenerator.generate(&cfg, &mut rng).unwrap().nnz(), 0);
    }
}

use rand::rngs::StdRng;

use sp_matrix::{CooMatrix, Element, MatrixShape};

use crate::config::GeneratorConfig;
use crate::error::{GenError, Result};
use crate::generator::{initial_capacity, MatrixGenerator};

/// Dense pattern generator: every (i, j) with value 1.0, row by row.
///
/// Useful for checking kernels, since y = A * 1 gives `ncols` in every row.
pub struct OnesGenerator;

impl MatrixGenerator for OnesGenerator {
    fn name(&self) -> &str {
        "ones"
    }

    fn generate(&self, config: &GeneratorConfig, _rng: &mut StdRng) -> Result<CooMatrix> {
        let shape = MatrixShape::new(config.nrows, config.ncols);
        let total = shape.nrows.checked_mul(shape.ncols).ok_or_else(|| {
            GenError::InvalidConfig(format!("{} matrix is too large to fill", shape))
        })?;

        let mut elements = Vec::with_capacity(initial_capacity(total));
        for row in 0..shape.nrows {
            for col in 0..shape.ncols {
                elements.push(Element::new(row, col, 1.0));
            }
        }
        Ok(CooMatrix::new(shape, elements)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_ones_fills_every_cell() {
        let cfg = GeneratorConfig {
            nrows: 3,
            ncols: 4,
            nnz: 1,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let m = OnesGenerator.generate(&cfg, &mut rng).unwrap();
        assert_eq!(m.nnz(), 12);
        assert!(m.elements().iter().all(|e| e.value == 1.0));
        assert_eq!((m.elements()[5].row, m.elements()[5].col), (1, 1));
    }

    #[test]
    fn test_ones_overflow() {
        let cfg = GeneratorConfig {
            nrows: usize::MAX,
            ncols: 2,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(OnesGenerator.generate(&cfg, &mut rng).is_err());
    }
}

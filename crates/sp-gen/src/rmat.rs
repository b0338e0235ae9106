use rand::rngs::StdRng;
use rand::Rng;

use sp_matrix::{CooMatrix, Element, MatrixShape};

use crate::config::{GeneratorConfig, RmatParams};
use crate::error::{GenError, Result};
use crate::generator::{check_room, initial_capacity, MatrixGenerator};

/// Draws per element before giving up on landing inside the shape.
const MAX_ATTEMPTS: usize = 10_000;

/// R-MAT generator.
///
/// Each element descends through the quadrants of the smallest
/// power-of-two square covering the matrix, choosing a quadrant at every
/// level with probabilities (a, b, c, d). Coordinates outside the matrix
/// are redrawn. Values are uniform in [0, 1).
pub struct RmatGenerator;

impl RmatGenerator {
    fn sample(
        params: &RmatParams,
        levels: u32,
        shape: MatrixShape,
        rng: &mut StdRng,
    ) -> Option<(usize, usize)> {
        let ab = params.a + params.b;
        let abc = ab + params.c;
        for _ in 0..MAX_ATTEMPTS {
            let (mut row, mut col) = (0usize, 0usize);
            for level in (0..levels).rev() {
                let bit = 1usize << level;
                let p: f64 = rng.gen();
                if p < params.a {
                    // top-left
                } else if p < ab {
                    col |= bit;
                } else if p < abc {
                    row |= bit;
                } else {
                    row |= bit;
                    col |= bit;
                }
            }
            if shape.contains(row, col) {
                return Some((row, col));
            }
        }
        None
    }
}

impl MatrixGenerator for RmatGenerator {
    fn name(&self) -> &str {
        "rmat"
    }

    fn generate(&self, config: &GeneratorConfig, rng: &mut StdRng) -> Result<CooMatrix> {
        config.rmat.validate()?;
        let shape = check_room(config)?;
        let side = shape.nrows.max(shape.ncols).max(1).next_power_of_two();
        let levels = side.trailing_zeros();

        let mut elements = Vec::with_capacity(initial_capacity(config.nnz));
        for _ in 0..config.nnz {
            let (row, col) = Self::sample(&config.rmat, levels, shape, rng).ok_or_else(|| {
                GenError::InvalidConfig(format!(
                    "rmat could not place an element inside a {} matrix",
                    shape
                ))
            })?;
            elements.push(Element::new(row, col, rng.gen::<f64>()));
        }
        Ok(CooMatrix::new(shape, elements)?)
    }
}

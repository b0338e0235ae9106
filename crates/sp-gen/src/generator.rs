use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sp_matrix::{CooMatrix, DenseVector, MatrixShape};

use crate::config::{GeneratorConfig, MatrixKind};
use crate::error::{GenError, Result};
use crate::ones::OnesGenerator;
use crate::rmat::RmatGenerator;
use crate::uniform::UniformGenerator;

/// Trait for generators that build a COO matrix from a seeded RNG.
pub trait MatrixGenerator: Send + Sync {
    /// Returns the name of this generator.
    fn name(&self) -> &str;

    /// Build a matrix described by `config`, drawing from `rng`.
    fn generate(&self, config: &GeneratorConfig, rng: &mut StdRng) -> Result<CooMatrix>;
}

/// Build a matrix of the given kind, seeding the RNG from `config.seed`.
pub fn generate(kind: MatrixKind, config: &GeneratorConfig) -> Result<CooMatrix> {
    let generator: Box<dyn MatrixGenerator> = match kind {
        MatrixKind::Random => Box::new(UniformGenerator),
        MatrixKind::Rmat => Box::new(RmatGenerator),
        MatrixKind::Ones => Box::new(OnesGenerator),
    };
    let mut rng = StdRng::seed_from_u64(config.seed);
    let coo = generator.generate(config, &mut rng)?;
    tracing::info!(
        generator = generator.name(),
        shape = %coo.shape(),
        nnz = coo.nnz(),
        seed = config.seed,
        "generated matrix"
    );
    Ok(coo)
}

/// A vector of `n` values drawn uniformly from [0, 1).
pub fn random_vector(n: usize, seed: u64) -> DenseVector {
    let mut rng = StdRng::seed_from_u64(seed);
    DenseVector::from_vec((0..n).map(|_| rng.gen::<f64>()).collect())
}

/// Largest element count reserved before generation starts; bigger
/// requests grow the buffer as elements are produced.
pub(crate) const MAX_RESERVE: usize = 1 << 20;

/// Initial capacity for a buffer expected to hold `n` elements.
pub(crate) fn initial_capacity(n: usize) -> usize {
    n.min(MAX_RESERVE)
}

/// Fails when triples are requested for a matrix with no cells.
pub(crate) fn check_room(config: &GeneratorConfig) -> Result<MatrixShape> {
    let shape = MatrixShape::new(config.nrows, config.ncols);
    if config.nnz > 0 && (config.nrows == 0 || config.ncols == 0) {
        return Err(GenError::InvalidConfig(format!(
            "cannot place {} elements in a {} matrix",
            config.nnz, shape
        )));
    }
    Ok(shape)
}

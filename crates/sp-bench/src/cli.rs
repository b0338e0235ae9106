use std::path::PathBuf;

use clap::Parser;

use sp_gen::{GeneratorConfig, MatrixKind, RmatParams};
use sp_matrix::{Algorithm, SparseFormat};

/// Repeated sparse matrix-vector multiplication benchmark.
///
/// Builds a matrix, then runs y = A * x `repeat` times. For square matrices
/// each iteration feeds y / |y| back in as x, so the reported |y|
/// approaches the dominant eigenvalue.
#[derive(Parser, Debug, Clone)]
#[command(name = "spmv")]
#[command(version)]
pub struct Cli {
    /// Number of rows
    #[arg(short = 'M', long, default_value_t = 8192)]
    pub nrows: usize,

    /// Number of columns
    #[arg(short = 'N', long, default_value_t = 8192)]
    pub ncols: usize,

    /// Number of nonzeros to generate (ignored by `ones` and `--mtx`)
    #[arg(short = 'z', long, default_value_t = 100_000)]
    pub nnz: usize,

    /// Matrix generator: random, rmat or ones
    #[arg(short = 't', long = "type", default_value = "random")]
    pub kind: MatrixKind,

    /// Load the matrix from a Matrix Market file instead of generating it
    #[arg(long, value_name = "FILE")]
    pub mtx: Option<PathBuf>,

    /// Storage format: coo or coo_sorted
    #[arg(short = 'f', long, env = "SPMV_FORMAT", default_value = "coo")]
    pub format: SparseFormat,

    /// SpMV algorithm: serial or parallel
    #[arg(short = 'a', long, env = "SPMV_ALGO", default_value = "serial")]
    pub algo: Algorithm,

    /// Number of SpMV iterations
    #[arg(short = 'r', long, default_value_t = 5)]
    pub repeat: usize,

    /// Random seed for the generators
    #[arg(short = 's', long, default_value_t = 4567289)]
    pub seed: u64,

    /// Worker threads for the parallel algorithm (default: all cores)
    #[arg(long, env = "SPMV_THREADS")]
    pub threads: Option<usize>,

    /// R-MAT quadrant probabilities a, b, c
    #[arg(long, num_args = 3, value_names = ["A", "B", "C"])]
    pub rmat: Option<Vec<f64>>,
}

impl Cli {
    /// Generator settings derived from the command line.
    pub fn generator_config(&self) -> GeneratorConfig {
        let rmat = match self.rmat.as_deref() {
            Some(&[a, b, c]) => RmatParams { a, b, c },
            _ => RmatParams::default(),
        };
        GeneratorConfig {
            nrows: self.nrows,
            ncols: self.ncols,
            nnz: self.nnz,
            seed: self.seed,
            rmat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["spmv"]).unwrap();
        assert_eq!(cli.nrows, 8192);
        assert_eq!(cli.ncols, 8192);
        assert_eq!(cli.nnz, 100_000);
        assert_eq!(cli.kind, MatrixKind::Random);
        assert_eq!(cli.repeat, 5);
        assert_eq!(cli.seed, 4567289);
        assert!(cli.mtx.is_none());
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "spmv", "-M", "10", "-N", "20", "-z", "30", "-t", "rmat", "-f", "coo_sorted", "-a",
            "parallel", "-r", "2", "-s", "9",
        ])
        .unwrap();
        assert_eq!((cli.nrows, cli.ncols, cli.nnz), (10, 20, 30));
        assert_eq!(cli.kind, MatrixKind::Rmat);
        assert_eq!(cli.format, SparseFormat::CooSorted);
        assert_eq!(cli.algo, Algorithm::Parallel);
        assert_eq!(cli.repeat, 2);
        assert_eq!(cli.generator_config().seed, 9);
    }

    #[test]
    fn test_rejects_unknown_algorithm() {
        assert!(Cli::try_parse_from(["spmv", "-a", "cuda"]).is_err());
        assert!(Cli::try_parse_from(["spmv", "-f", "csr"]).is_err());
    }

    #[test]
    fn test_rmat_params() {
        let cli = Cli::try_parse_from(["spmv", "--rmat", "0.4", "0.2", "0.2"]).unwrap();
        let p = cli.generator_config().rmat;
        assert_eq!((p.a, p.b, p.c), (0.4, 0.2, 0.2));
    }
}

use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use sp_matrix::{
    backend_for, Algorithm, DenseVector, ParallelBackend, SparseFormat, SparseMatrix, SpmvBackend,
};

use crate::cli::Cli;

/// Outcome of a benchmark run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub nrows: usize,
    pub ncols: usize,
    pub nnz: usize,
    pub format: SparseFormat,
    pub backend: String,
    pub repeat: usize,
    pub elapsed: Duration,
    /// |y| after the last iteration.
    pub norm: f64,
}

impl RunReport {
    /// Floating-point operations performed: one multiply and one add per
    /// stored triple per iteration.
    pub fn flops(&self) -> f64 {
        2.0 * self.nnz as f64 * self.repeat as f64
    }

    pub fn gflops_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.flops() / secs * 1e-9
        } else {
            0.0
        }
    }
}

/// Build the matrix described by `cli` in the requested format.
pub fn build_matrix(cli: &Cli) -> Result<SparseMatrix> {
    let coo = match &cli.mtx {
        Some(path) => sp_io::MatrixMarketFile::open(path)
            .and_then(|mtx| mtx.to_coo())
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => sp_gen::generate(cli.kind, &cli.generator_config())
            .with_context(|| format!("failed to generate {} matrix", cli.kind))?,
    };
    Ok(SparseMatrix::from_coo(coo, cli.format))
}

/// Select the backend for `algo`.
///
/// An explicit thread count gives the parallel backend a dedicated pool of
/// that size. The serial backend has no pool, so the count is ignored.
pub fn make_backend(algo: Algorithm, threads: Option<usize>) -> Result<Box<dyn SpmvBackend>> {
    match (algo, threads) {
        (Algorithm::Parallel, Some(n)) => Ok(Box::new(
            ParallelBackend::with_threads(n).context("failed to configure threads")?,
        )),
        (Algorithm::Serial, Some(n)) => {
            tracing::warn!(threads = n, "--threads has no effect with the serial algorithm");
            Ok(backend_for(Algorithm::Serial))
        }
        (algo, None) => Ok(backend_for(algo)),
    }
}

/// Run `repeat` SpMV iterations starting from x = (1, ..., 1).
///
/// For a square matrix, y / |y| becomes the next x whenever |y| is
/// nonzero.
pub fn run(a: &SparseMatrix, backend: &dyn SpmvBackend, repeat: usize) -> Result<RunReport> {
    let shape = a.shape();
    let mut x = DenseVector::filled(shape.ncols, 1.0);
    let mut y = DenseVector::zeros(shape.nrows);
    let mut norm = 0.0;

    let start = Instant::now();
    for iter in 0..repeat {
        backend
            .spmv(a, x.as_slice(), y.as_mut_slice())
            .with_context(|| format!("spmv failed at iteration {}", iter))?;
        norm = y.norm2();
        tracing::debug!(iter, norm, "iteration done");
        if shape.is_square() && norm > 0.0 {
            x.copy_from(&y);
            x.scale(1.0 / norm);
        }
    }
    let elapsed = start.elapsed();

    Ok(RunReport {
        nrows: shape.nrows,
        ncols: shape.ncols,
        nnz: a.nnz(),
        format: a.format(),
        backend: backend.name().to_string(),
        repeat,
        elapsed,
        norm,
    })
}

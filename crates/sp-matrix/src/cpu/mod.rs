// CPU SpMV kernels.
//
// `serial` holds the single-threaded reference kernels, `parallel` the
// rayon kernels. The backends below wrap them behind `SpmvBackend`.
pub mod parallel;
pub mod serial;

use std::sync::Arc;

use crate::backend::SpmvBackend;
use crate::coo::{CooMatrix, SortedCooMatrix};
use crate::error::{Result, SparseError};
use crate::format::Algorithm;
use crate::matrix::SparseMatrix;
use crate::Real;

pub use parallel::{spmv_coo_parallel, spmv_coo_sorted_parallel};
pub use serial::{spmv_coo_serial, spmv_coo_sorted_serial};

/// Single-threaded reference backend.
#[derive(Debug, Clone)]
pub struct SerialBackend;

impl SerialBackend {
    pub fn new() -> Self {
        SerialBackend
    }
}

impl Default for SerialBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SpmvBackend for SerialBackend {
    fn name(&self) -> &str {
        "serial"
    }

    fn spmv_coo(&self, a: &CooMatrix, x: &[Real], y: &mut [Real]) -> Result<()> {
        spmv_coo_serial(a, x, y)
    }

    fn spmv_coo_sorted(&self, a: &SortedCooMatrix, x: &[Real], y: &mut [Real]) -> Result<()> {
        spmv_coo_sorted_serial(a, x, y)
    }
}

/// Multi-threaded backend built on rayon.
///
/// Runs on the global rayon pool unless constructed with `with_threads`,
/// in which case it owns a dedicated pool.
#[derive(Debug, Clone, Default)]
pub struct ParallelBackend {
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl ParallelBackend {
    pub fn new() -> Self {
        ParallelBackend { pool: None }
    }

    /// Create a backend with its own pool of `threads` workers.
    pub fn with_threads(threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("spmv-worker-{}", i))
            .build()
            .map_err(|e| SparseError::Other(format!("failed to build thread pool: {}", e)))?;
        Ok(ParallelBackend {
            pool: Some(Arc::new(pool)),
        })
    }

    /// Number of workers the kernels will run on.
    pub fn num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    fn run<F>(&self, op: F) -> Result<()>
    where
        F: FnOnce() -> Result<()> + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl SpmvBackend for ParallelBackend {
    fn name(&self) -> &str {
        "parallel"
    }

    fn spmv_coo(&self, a: &CooMatrix, x: &[Real], y: &mut [Real]) -> Result<()> {
        self.run(|| spmv_coo_parallel(a, x, y))
    }

    fn spmv_coo_sorted(&self, a: &SortedCooMatrix, x: &[Real], y: &mut [Real]) -> Result<()> {
        self.run(|| spmv_coo_sorted_parallel(a, x, y))
    }
}

/// Returns the backend implementing `algo`.
pub fn backend_for(algo: Algorithm) -> Box<dyn SpmvBackend> {
    match algo {
        Algorithm::Serial => Box::new(SerialBackend::new()),
        Algorithm::Parallel => Box::new(ParallelBackend::new()),
    }
}

/// y := A * x with the kernel chosen by `algo` and the format of `a`.
pub fn spmv(algo: Algorithm, a: &SparseMatrix, x: &[Real], y: &mut [Real]) -> Result<()> {
    backend_for(algo).spmv(a, x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coo::SortOrder;
    use crate::format::SparseFormat;
    use approx::assert_relative_eq;

    // [1 0 2]
    // [0 3 0]
    fn small() -> CooMatrix {
        CooMatrix::from_triplets(2, 3, &[1, 0, 0], &[1, 2, 0], &[3.0, 2.0, 1.0]).unwrap()
    }

    #[test]
    fn test_serial_coo() {
        let mut y = vec![9.0; 2];
        spmv_coo_serial(&small(), &[1.0, 2.0, 3.0], &mut y).unwrap();
        assert_eq!(y, vec![7.0, 6.0]);
    }

    #[test]
    fn test_parallel_coo() {
        let mut y = vec![9.0; 2];
        spmv_coo_parallel(&small(), &[1.0, 2.0, 3.0], &mut y).unwrap();
        assert_eq!(y, vec![7.0, 6.0]);
    }

    #[test]
    fn test_duplicates_are_summed() {
        let a = CooMatrix::from_triplets(1, 1, &[0, 0], &[0, 0], &[1.5, 2.5]).unwrap();
        let mut y = vec![0.0];
        spmv_coo_parallel(&a, &[2.0], &mut y).unwrap();
        assert_eq!(y, vec![8.0]);
        spmv_coo_serial(&a, &[2.0], &mut y).unwrap();
        assert_eq!(y, vec![8.0]);
    }

    #[test]
    fn test_empty_matrix_zeroes_output() {
        let a = CooMatrix::from_triplets(3, 2, &[], &[], &[]).unwrap();
        let mut y = vec![1.0, 2.0, 3.0];
        spmv_coo_parallel(&a, &[1.0, 1.0], &mut y).unwrap();
        assert_eq!(y, vec![0.0; 3]);
    }

    #[test]
    fn test_sorted_parallel_matches_parallel() {
        let a = small();
        let sorted = a.sorted(SortOrder::RowMajor);
        let x = [0.5, -1.0, 4.0];
        let mut direct = vec![0.0; 2];
        let mut delegated = vec![0.0; 2];
        spmv_coo_parallel(&a, &x, &mut direct).unwrap();
        spmv_coo_sorted_parallel(&sorted, &x, &mut delegated).unwrap();
        assert_eq!(direct, delegated);
    }

    #[test]
    fn test_sorted_parallel_propagates_length_error() {
        let sorted = small().sorted(SortOrder::ColMajor);
        let mut y = vec![5.0; 2];
        let err = spmv_coo_sorted_parallel(&sorted, &[1.0, 2.0], &mut y).unwrap_err();
        assert!(matches!(
            err,
            SparseError::VectorLength { which: "input", expected: 3, got: 2 }
        ));
        // y is left untouched on failure.
        assert_eq!(y, vec![5.0; 2]);
    }

    #[test]
    fn test_output_length_checked() {
        let mut y = vec![0.0; 3];
        assert!(spmv_coo_serial(&small(), &[1.0, 2.0, 3.0], &mut y).is_err());
    }

    #[test]
    fn test_backend_names() {
        assert_eq!(backend_for(Algorithm::Serial).name(), "serial");
        assert_eq!(backend_for(Algorithm::Parallel).name(), "parallel");
    }

    #[test]
    fn test_dispatch_all_formats_and_algorithms() {
        let x = [1.0, 2.0, 3.0];
        for format in SparseFormat::ALL {
            let a = SparseMatrix::from_coo(small(), format);
            for algo in Algorithm::ALL {
                let mut y = vec![0.0; 2];
                spmv(algo, &a, &x, &mut y).unwrap();
                assert_relative_eq!(y[0], 7.0);
                assert_relative_eq!(y[1], 6.0);
            }
        }
    }

    #[test]
    fn test_dedicated_pool() {
        let backend = ParallelBackend::with_threads(2).unwrap();
        assert_eq!(backend.num_threads(), 2);
        let sorted = small().sorted(SortOrder::RowMajor);
        let mut y = vec![0.0; 2];
        backend.spmv_coo_sorted(&sorted, &[1.0, 2.0, 3.0], &mut y).unwrap();
        assert_eq!(y, vec![7.0, 6.0]);
    }
}

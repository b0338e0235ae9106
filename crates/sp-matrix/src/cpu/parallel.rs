use rayon::prelude::*;

use super::serial::accumulate;
use crate::coo::{CooMatrix, SortedCooMatrix};
use crate::error::Result;
use crate::Real;

/// Number of element chunks handed to each rayon worker.
const CHUNKS_PER_THREAD: usize = 4;

fn chunk_len(nnz: usize) -> usize {
    let chunks = rayon::current_num_threads().max(1) * CHUNKS_PER_THREAD;
    nnz.div_ceil(chunks).max(1)
}

/// Whether `nnz` triples justify one `nrows` buffer per worker.
fn worth_splitting(nnz: usize, nrows: usize) -> bool {
    rayon::current_num_threads() > 1 && nnz >= nrows && nnz > chunk_len(nnz)
}

/// y := A * x for a COO matrix using the current rayon pool.
///
/// The triples are split into chunks. Each worker accumulates its chunks
/// into a private row buffer, and the buffers are summed into `y`, so two
/// workers never write the same row concurrently. Results match
/// `spmv_coo_serial` up to floating-point reassociation.
///
/// Each buffer costs `nrows` to zero and to reduce, so the extra work grows
/// with threads × nrows. When there are fewer triples than rows that cost
/// exceeds the product itself, and the triples are accumulated on the
/// calling thread instead.
pub fn spmv_coo_parallel(a: &CooMatrix, x: &[Real], y: &mut [Real]) -> Result<()> {
    let shape = a.shape();
    shape.check_spmv(x.len(), y.len())?;
    let nrows = shape.nrows;
    let elements = a.elements();
    let split = worth_splitting(elements.len(), nrows);
    tracing::debug!(
        kernel = "coo_parallel",
        shape = %shape,
        nnz = a.nnz(),
        threads = rayon::current_num_threads(),
        split,
        "spmv"
    );

    if !split {
        accumulate(a, x, y);
        return Ok(());
    }

    let sums = elements
        .par_chunks(chunk_len(elements.len()))
        .fold(
            || vec![0.0 as Real; nrows],
            |mut acc, chunk| {
                for e in chunk {
                    acc[e.row] += e.value * x[e.col];
                }
                acc
            },
        )
        .reduce(
            || vec![0.0 as Real; nrows],
            |mut lhs, rhs| {
                lhs.iter_mut().zip(rhs).for_each(|(l, r)| *l += r);
                lhs
            },
        );

    y.copy_from_slice(&sums);
    Ok(())
}

/// y := A * x for a sorted COO matrix using the current rayon pool.
///
/// The product of COO triples does not depend on their order, so this
/// runs `spmv_coo_parallel` on the sorted view and returns its result
/// unchanged.
pub fn spmv_coo_sorted_parallel(a: &SortedCooMatrix, x: &[Real], y: &mut [Real]) -> Result<()> {
    spmv_coo_parallel(a.as_coo(), x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_len_never_zero() {
        assert_eq!(chunk_len(0), 1);
        assert!(chunk_len(1) >= 1);
        let n = 1_000_000;
        let len = chunk_len(n);
        assert!(len * rayon::current_num_threads() * CHUNKS_PER_THREAD >= n);
    }

    #[test]
    fn test_hypersparse_stays_on_caller() {
        assert!(!worth_splitting(2, 4_000_000));
        assert!(!worth_splitting(0, 0));
    }

    #[test]
    fn test_hypersparse_product() {
        let nrows = 100_000;
        let a = CooMatrix::from_triplets(nrows, 3, &[7, nrows - 1], &[2, 0], &[2.0, -1.0])
            .unwrap();
        let x = [5.0, 0.0, 3.0];
        let mut y = vec![9.0; nrows];
        spmv_coo_parallel(&a, &x, &mut y).unwrap();
        assert_eq!(y[7], 6.0);
        assert_eq!(y[nrows - 1], -5.0);
        assert_eq!(y.iter().filter(|&&v| v != 0.0).count(), 2);
    }

    #[test]
    fn test_split_matches_serial() {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();
        let rows: Vec<usize> = (0..1000).map(|i| i % 10).collect();
        let cols: Vec<usize> = (0..1000).map(|i| (i * 7) % 10).collect();
        let values: Vec<Real> = (0..1000).map(|i| i as Real * 0.5).collect();
        let a = CooMatrix::from_triplets(10, 10, &rows, &cols, &values).unwrap();
        let x: Vec<Real> = (0..10).map(|i| i as Real).collect();

        let mut expected = vec![0.0; 10];
        accumulate(&a, &x, &mut expected);
        let mut y = vec![0.0; 10];
        pool.install(|| {
            assert!(worth_splitting(a.nnz(), 10));
            spmv_coo_parallel(&a, &x, &mut y)
        })
        .unwrap();
        for (got, want) in y.iter().zip(&expected) {
            assert!((got - want).abs() <= 1e-9 * want.abs().max(1.0));
        }
    }
}

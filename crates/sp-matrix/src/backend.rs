use std::fmt::Debug;

use crate::coo::{CooMatrix, SortedCooMatrix};
use crate::error::Result;
use crate::matrix::SparseMatrix;
use crate::Real;

/// Trait for pluggable SpMV backends (serial, parallel, ...).
///
/// Every kernel computes y := A * x, overwriting `y`. Operands are plain
/// slices: `x` must have `ncols` entries and `y` must have `nrows` entries,
/// otherwise the kernel fails before writing to `y`.
pub trait SpmvBackend: Send + Sync + Debug {
    /// Returns the name of this backend (e.g., "serial", "parallel").
    fn name(&self) -> &str;

    /// y := A * x for a COO matrix in arbitrary element order.
    fn spmv_coo(&self, a: &CooMatrix, x: &[Real], y: &mut [Real]) -> Result<()>;

    /// y := A * x for a sorted COO matrix.
    ///
    /// Element order does not affect the COO product, so the default body
    /// runs `spmv_coo` on the same triples.
    fn spmv_coo_sorted(&self, a: &SortedCooMatrix, x: &[Real], y: &mut [Real]) -> Result<()> {
        self.spmv_coo(a.as_coo(), x, y)
    }

    /// y := A * x, selecting the kernel from the matrix format.
    fn spmv(&self, a: &SparseMatrix, x: &[Real], y: &mut [Real]) -> Result<()> {
        match a {
            SparseMatrix::Coo(m) => self.spmv_coo(m, x, y),
            SparseMatrix::CooSorted(m) => self.spmv_coo_sorted(m, x, y),
        }
    }
}

use crate::coo::{CooMatrix, SortedCooMatrix};
use crate::error::Result;
use crate::Real;

/// y := A * x for a COO matrix on the calling thread.
pub fn spmv_coo_serial(a: &CooMatrix, x: &[Real], y: &mut [Real]) -> Result<()> {
    let shape = a.shape();
    shape.check_spmv(x.len(), y.len())?;
    tracing::debug!(kernel = "coo_serial", shape = %shape, nnz = a.nnz(), "spmv");
    accumulate(a, x, y);
    Ok(())
}

/// Zero `y`, then add every triple of `a` into it. Lengths must already
/// have been checked.
pub(crate) fn accumulate(a: &CooMatrix, x: &[Real], y: &mut [Real]) {
    y.iter_mut().for_each(|v| *v = 0.0);
    for e in a.elements() {
        y[e.row] += e.value * x[e.col];
    }
}

/// y := A * x for a sorted COO matrix on the calling thread.
///
/// Same triples, same product: this is `spmv_coo_serial` on the sorted view.
pub fn spmv_coo_sorted_serial(a: &SortedCooMatrix, x: &[Real], y: &mut [Real]) -> Result<()> {
    spmv_coo_serial(a.as_coo(), x, y)
}

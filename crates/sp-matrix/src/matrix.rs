use crate::coo::{CooMatrix, SortOrder, SortedCooMatrix};
use crate::format::SparseFormat;
use crate::shape::MatrixShape;

/// A sparse matrix in one of the supported storage formats.
///
/// Kernels are selected by matching on the variant; see `SpmvBackend::spmv`.
#[derive(Debug, Clone, PartialEq)]
pub enum SparseMatrix {
    Coo(CooMatrix),
    CooSorted(SortedCooMatrix),
}

impl SparseMatrix {
    /// Store `coo` in `format`. Sorted formats are sorted row-major.
    pub fn from_coo(coo: CooMatrix, format: SparseFormat) -> Self {
        match format {
            SparseFormat::Coo => SparseMatrix::Coo(coo),
            SparseFormat::CooSorted => {
                SparseMatrix::CooSorted(SortedCooMatrix::from_coo(coo, SortOrder::RowMajor))
            }
        }
    }

    pub fn format(&self) -> SparseFormat {
        match self {
            SparseMatrix::Coo(_) => SparseFormat::Coo,
            SparseMatrix::CooSorted(_) => SparseFormat::CooSorted,
        }
    }

    pub fn shape(&self) -> MatrixShape {
        match self {
            SparseMatrix::Coo(m) => m.shape(),
            SparseMatrix::CooSorted(m) => m.shape(),
        }
    }

    pub fn nnz(&self) -> usize {
        match self {
            SparseMatrix::Coo(m) => m.nnz(),
            SparseMatrix::CooSorted(m) => m.nnz(),
        }
    }

    /// The underlying triples, regardless of ordering.
    pub fn as_coo(&self) -> &CooMatrix {
        match self {
            SparseMatrix::Coo(m) => m,
            SparseMatrix::CooSorted(m) => m.as_coo(),
        }
    }
}

impl From<CooMatrix> for SparseMatrix {
    fn from(m: CooMatrix) -> Self {
        SparseMatrix::Coo(m)
    }
}

impl From<SortedCooMatrix> for SparseMatrix {
    fn from(m: SortedCooMatrix) -> Self {
        SparseMatrix::CooSorted(m)
    }
}

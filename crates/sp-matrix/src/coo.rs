use std::fmt;

use crate::error::{Result, SparseError};
use crate::shape::MatrixShape;
use crate::Real;

/// One nonzero of a coordinate-format matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub row: usize,
    pub col: usize,
    pub value: Real,
}

impl Element {
    pub fn new(row: usize, col: usize, value: Real) -> Self {
        Element { row, col, value }
    }
}

/// A sparse matrix stored as unordered `(row, col, value)` triples.
///
/// Duplicate coordinates are allowed; SpMV sums them.
#[derive(Debug, Clone, PartialEq)]
pub struct CooMatrix {
    shape: MatrixShape,
    elements: Vec<Element>,
}

impl CooMatrix {
    /// Create a COO matrix, checking every element against `shape`.
    pub fn new(shape: MatrixShape, elements: Vec<Element>) -> Result<Self> {
        for e in &elements {
            shape.check_index(e.row, e.col)?;
        }
        Ok(CooMatrix { shape, elements })
    }

    /// Create a COO matrix from parallel row, column and value arrays.
    pub fn from_triplets(
        nrows: usize,
        ncols: usize,
        rows: &[usize],
        cols: &[usize],
        values: &[Real],
    ) -> Result<Self> {
        if rows.len() != cols.len() || rows.len() != values.len() {
            return Err(SparseError::Other(format!(
                "triplet arrays differ in length: rows={} cols={} values={}",
                rows.len(),
                cols.len(),
                values.len()
            )));
        }
        let elements = rows
            .iter()
            .zip(cols)
            .zip(values)
            .map(|((&row, &col), &value)| Element { row, col, value })
            .collect();
        Self::new(MatrixShape::new(nrows, ncols), elements)
    }

    /// A matrix with no nonzeros.
    pub fn empty(shape: MatrixShape) -> Self {
        CooMatrix {
            shape,
            elements: Vec::new(),
        }
    }

    pub fn shape(&self) -> MatrixShape {
        self.shape
    }

    /// Number of stored triples, counting duplicates.
    pub fn nnz(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Sort a copy of this matrix by `order`.
    pub fn sorted(&self, order: SortOrder) -> SortedCooMatrix {
        SortedCooMatrix::from_coo(self.clone(), order)
    }
}

/// Key used to order the triples of a `SortedCooMatrix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// By row, then column.
    #[default]
    RowMajor,
    /// By column, then row.
    ColMajor,
}

impl SortOrder {
    fn key(&self, e: &Element) -> (usize, usize) {
        match self {
            SortOrder::RowMajor => (e.row, e.col),
            SortOrder::ColMajor => (e.col, e.row),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::RowMajor => write!(f, "row-major"),
            SortOrder::ColMajor => write!(f, "col-major"),
        }
    }
}

/// A COO matrix whose triples are ordered by a `SortOrder` key.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedCooMatrix {
    inner: CooMatrix,
    order: SortOrder,
}

impl SortedCooMatrix {
    /// Sort `coo` by `order`. The sort is stable, so duplicates keep
    /// their relative order.
    pub fn from_coo(mut coo: CooMatrix, order: SortOrder) -> Self {
        coo.elements.sort_by_key(|e| order.key(e));
        SortedCooMatrix { inner: coo, order }
    }

    /// Wrap `coo` without sorting it.
    ///
    /// # Errors
    /// Returns `SparseError::NotSorted` at the first element whose key is
    /// smaller than its predecessor's.
    pub fn from_sorted(coo: CooMatrix, order: SortOrder) -> Result<Self> {
        if let Some(pos) = coo
            .elements
            .windows(2)
            .position(|w| order.key(&w[0]) > order.key(&w[1]))
        {
            return Err(SparseError::NotSorted {
                order: order.to_string(),
                position: pos + 1,
            });
        }
        Ok(SortedCooMatrix { inner: coo, order })
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn shape(&self) -> MatrixShape {
        self.inner.shape()
    }

    pub fn nnz(&self) -> usize {
        self.inner.nnz()
    }

    pub fn elements(&self) -> &[Element] {
        self.inner.elements()
    }

    /// View the sorted triples as a plain COO matrix.
    pub fn as_coo(&self) -> &CooMatrix {
        &self.inner
    }

    pub fn into_coo(self) -> CooMatrix {
        self.inner
    }
}

use crate::error::{Result, SparseError};
use std::fmt;

/// Dimensions of a 2D sparse matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatrixShape {
    pub nrows: usize,
    pub ncols: usize,
}

impl MatrixShape {
    pub fn new(nrows: usize, ncols: usize) -> Self {
        MatrixShape { nrows, ncols }
    }

    /// Returns true if the matrix has as many rows as columns.
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Returns true if `(row, col)` lies inside the matrix.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.nrows && col < self.ncols
    }

    /// Checks that `(row, col)` lies inside the matrix.
    pub fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if self.contains(row, col) {
            Ok(())
        } else {
            Err(SparseError::IndexOutOfBounds {
                row,
                col,
                nrows: self.nrows,
                ncols: self.ncols,
            })
        }
    }

    /// Checks the operand lengths of y = A * x.
    ///
    /// `x` must have `ncols` entries and `y` must have `nrows` entries.
    pub fn check_spmv(&self, x_len: usize, y_len: usize) -> Result<()> {
        if x_len != self.ncols {
            return Err(SparseError::VectorLength {
                which: "input",
                expected: self.ncols,
                got: x_len,
            });
        }
        if y_len != self.nrows {
            return Err(SparseError::VectorLength {
                which: "output",
                expected: self.nrows,
                got: y_len,
            });
        }
        Ok(())
    }
}

impl fmt::Display for MatrixShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.nrows, self.ncols)
    }
}

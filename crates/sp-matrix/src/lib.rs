//! `sp-matrix` - Sparse matrix types and SpMV kernels for the spmv runtime.
//!
//! This crate provides:
//! - `CooMatrix` and `SortedCooMatrix` coordinate-format matrices
//! - `SparseMatrix`, the format-tagged matrix handle
//! - `DenseVector` for SpMV operands
//! - A `SpmvBackend` trait with serial and rayon-parallel CPU backends
//! - Format and algorithm selectors used by the CLI and the C API

pub mod backend;
pub mod coo;
pub mod cpu;
pub mod error;
pub mod format;
pub mod matrix;
pub mod shape;
pub mod vector;

/// Scalar type of every matrix and vector entry.
pub type Real = f64;

// Re-export primary types at the crate root for convenience.
pub use backend::SpmvBackend;
pub use coo::{CooMatrix, Element, SortOrder, SortedCooMatrix};
pub use cpu::{
    backend_for, spmv, spmv_coo_parallel, spmv_coo_serial, spmv_coo_sorted_parallel,
    spmv_coo_sorted_serial, ParallelBackend, SerialBackend,
};
pub use error::{Result, SparseError};
pub use format::{Algorithm, SparseFormat};
pub use matrix::SparseMatrix;
pub use shape::MatrixShape;
pub use vector::DenseVector;

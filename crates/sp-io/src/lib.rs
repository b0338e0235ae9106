//! `sp-io` - loading sparse matrices from Matrix Market coordinate files.

pub mod error;
pub mod mtx;

pub use error::{MtxError, Result};
pub use mtx::{read_coo, MatrixMarketFile, MatrixMarketHeader, MtxField, MtxSymmetry};

pub mod header;
pub mod reader;

pub use header::{MatrixMarketHeader, MtxField, MtxSymmetry, MTX_BANNER};
pub use reader::{read_coo, MatrixMarketFile, MtxSize};

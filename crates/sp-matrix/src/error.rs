use thiserror::Error;

#[derive(Error, Debug)]
pub enum SparseError {
    #[error("element ({row}, {col}) out of bounds for {nrows}x{ncols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },
    #[error("{which} vector has length {got}, expected {expected}")]
    VectorLength {
        which: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("elements are not sorted {order}: position {position} breaks the order")]
    NotSorted { order: String, position: usize },
    #[error("unknown sparse format: {0}")]
    UnknownFormat(String),
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SparseError>;

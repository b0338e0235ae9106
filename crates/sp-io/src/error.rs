use thiserror::Error;

#[derive(Error, Debug)]
pub enum MtxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid Matrix Market banner: {0:?}")]
    InvalidBanner(String),
    #[error("unsupported Matrix Market {what}: {value}")]
    Unsupported { what: &'static str, value: String },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("expected {expected} entries, found {found}")]
    EntryCount { expected: usize, found: usize },
    #[error("matrix error: {0}")]
    Matrix(#[from] sp_matrix::SparseError),
}

pub type Result<T> = std::result::Result<T, MtxError>;

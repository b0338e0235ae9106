use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("unknown matrix kind: {0}")]
    UnknownKind(String),
    #[error("invalid generator config: {0}")]
    InvalidConfig(String),
    #[error("matrix error: {0}")]
    Matrix(#[from] sp_matrix::SparseError),
}

pub type Result<T> = std::result::Result<T, GenError>;

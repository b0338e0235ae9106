use sp_matrix::{Algorithm, SparseFormat};

/// Status returned by every FFI function: 1 on success, 0 on failure.
///
/// On failure a message is available from `sp_last_error`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpStatus {
    Failure = 0,
    Success = 1,
}

impl SpStatus {
    pub fn is_success(self) -> bool {
        self == SpStatus::Success
    }
}

/// Storage format selector.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub enum SpFormat {
    Coo = 0,
    CooSorted = 1,
}

impl From<SpFormat> for SparseFormat {
    fn from(f: SpFormat) -> Self {
        match f {
            SpFormat::Coo => SparseFormat::Coo,
            SpFormat::CooSorted => SparseFormat::CooSorted,
        }
    }
}

/// SpMV algorithm selector.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub enum SpAlgorithm {
    Serial = 0,
    Parallel = 1,
}

impl From<SpAlgorithm> for Algorithm {
    fn from(a: SpAlgorithm) -> Self {
        match a {
            SpAlgorithm::Serial => Algorithm::Serial,
            SpAlgorithm::Parallel => Algorithm::Parallel,
        }
    }
}

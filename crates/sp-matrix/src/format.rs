use std::fmt;
use std::str::FromStr;

use crate::error::SparseError;

/// Storage formats a `SparseMatrix` can be held in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SparseFormat {
    /// Coordinate triples in arbitrary order.
    Coo,
    /// Coordinate triples ordered by a `SortOrder` key.
    CooSorted,
}

impl SparseFormat {
    /// All formats, in the order they are listed by the CLI.
    pub const ALL: [SparseFormat; 2] = [SparseFormat::Coo, SparseFormat::CooSorted];
}

impl fmt::Display for SparseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SparseFormat::Coo => write!(f, "coo"),
            SparseFormat::CooSorted => write!(f, "coo_sorted"),
        }
    }
}

impl FromStr for SparseFormat {
    type Err = SparseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coo" => Ok(SparseFormat::Coo),
            "coo_sorted" => Ok(SparseFormat::CooSorted),
            other => Err(SparseError::UnknownFormat(other.to_string())),
        }
    }
}

/// SpMV execution strategies.
///
/// Only CPU strategies exist; a name such as `cuda` parses to
/// `SparseError::UnsupportedAlgorithm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// One thread walks every element.
    Serial,
    /// Elements are split across the rayon thread pool.
    Parallel,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Serial, Algorithm::Parallel];
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Serial => write!(f, "serial"),
            Algorithm::Parallel => write!(f, "parallel"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = SparseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "serial" => Ok(Algorithm::Serial),
            "parallel" => Ok(Algorithm::Parallel),
            other => Err(SparseError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

use crate::error::{MtxError, Result};

/// The token every Matrix Market file starts with.
pub const MTX_BANNER: &str = "%%MatrixMarket";

/// Value field declared in the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MtxField {
    Real,
    Integer,
    /// No value column; every stored entry is 1.0.
    Pattern,
}

/// Symmetry declared in the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MtxSymmetry {
    General,
    /// Only the lower triangle is stored; (j, i) mirrors (i, j).
    Symmetric,
    /// Only the strict lower triangle is stored; (j, i) is -(i, j).
    SkewSymmetric,
}

/// Parsed Matrix Market banner line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixMarketHeader {
    pub field: MtxField,
    pub symmetry: MtxSymmetry,
}

impl MatrixMarketHeader {
    /// Parse the banner, e.g. `%%MatrixMarket matrix coordinate real general`.
    ///
    /// Only coordinate matrices are supported. Keywords are
    /// case-insensitive.
    pub fn parse(line: &str) -> Result<MatrixMarketHeader> {
        let tokens: Vec<String> = line.split_whitespace().map(str::to_lowercase).collect();
        if tokens.len() != 5 || !tokens[0].eq_ignore_ascii_case(MTX_BANNER) {
            return Err(MtxError::InvalidBanner(line.trim_end().to_string()));
        }

        if tokens[1] != "matrix" {
            return Err(MtxError::Unsupported {
                what: "object",
                value: tokens[1].clone(),
            });
        }
        if tokens[2] != "coordinate" {
            return Err(MtxError::Unsupported {
                what: "format",
                value: tokens[2].clone(),
            });
        }

        let field = match tokens[3].as_str() {
            "real" => MtxField::Real,
            "integer" => MtxField::Integer,
            "pattern" => MtxField::Pattern,
            other => {
                return Err(MtxError::Unsupported {
                    what: "field",
                    value: other.to_string(),
                })
            }
        };

        let symmetry = match tokens[4].as_str() {
            "general" => MtxSymmetry::General,
            "symmetric" => MtxSymmetry::Symmetric,
            "skew-symmetric" => MtxSymmetry::SkewSymmetric,
            other => {
                return Err(MtxError::Unsupported {
                    what: "symmetry",
                    value: other.to_string(),
                })
            }
        };

        Ok(MatrixMarketHeader { field, symmetry })
    }
}

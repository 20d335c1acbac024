//! Error types for affine cipher analysis

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AffineError {
    #[error("Invalid key: a = {a} is not coprime with 26")]
    InvalidKey { a: i64 },

    #[error("Key out of range: a = {a}, b = {b} (expected a in 1..=25, b in 0..=25)")]
    KeyOutOfRange { a: i64, b: i64 },

    #[error("No key hypothesis produced a plausible plaintext")]
    NoHypothesisFound,

    #[error("Formula not applicable for tag {tag}: a = {a} is not coprime with 26")]
    FormulaInapplicable { tag: i64, a: i64 },
}

pub type Result<T> = std::result::Result<T, AffineError>;

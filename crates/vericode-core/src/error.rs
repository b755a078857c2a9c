//! Error types for Vericode
//!
//! Every variant is a caller configuration mistake detected before any
//! hashing takes place. Messages carry parameter values only, never the
//! secret or the hash input.

use thiserror::Error;

/// Configuration errors raised by `generate` and `validate`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VericodeError {
    #[error("At least one character set must be selected")]
    EmptyCharset,

    #[error("Invalid period: {0} (must be at least 1 second)")]
    InvalidPeriod(u64),

    #[error("Invalid length: {0} (must be between 1 and {max})", max = crate::MAX_LENGTH)]
    InvalidLength(usize),

    #[error("Secret key is missing or empty")]
    EmptySecret,

    #[error("User identifier must not be empty")]
    EmptyIdentifier,
}

/// Result type for Vericode operations
pub type VericodeResult<T> = Result<T, VericodeError>;

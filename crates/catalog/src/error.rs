//! Catalog Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A catalog error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The storage backend could not read or write the library file.
    #[display("library storage failure: {_0}")]
    Storage(#[error(not(source))] String),
    /// The library file exists but is not a list of book records.
    #[display("malformed library file: {}", _0.display())]
    Malformed(#[error(not(source))] PathBuf),
    /// The in-memory library could not be encoded.
    #[display("could not serialize library")]
    Serialize,
    /// A form field failed entry-time validation.
    #[display("invalid {field}: {reason}")]
    Invalid {
        /// The offending form field.
        field: &'static str,
        /// Human readable explanation, shown to the user.
        reason: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

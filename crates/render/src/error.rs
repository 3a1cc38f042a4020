//! Render Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A render error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for render operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Template was not loadable (either file or builtin).
    #[display("template not found: {_0}")]
    TemplateNotFound(#[error(not(source))] String),
    /// Template source is not valid UTF-8.
    #[display("template is not valid UTF-8: {_0}")]
    Encoding(#[error(not(source))] String),
    /// Template syntax error, reported when the renderer is built.
    #[display("template failed to compile: {_0}")]
    Compile(#[error(not(source))] String),
    /// The context did not fit the template (missing field, wrong type).
    #[display("template failed to render: {_0}")]
    Render(#[error(not(source))] String),
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

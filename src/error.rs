//! Application Error Types
//!
//! Only startup can fail: once a session is running, every problem is turned
//! into a [`Notice`](crate::notice::Notice) instead.

use derive_more::{Display, Error};

/// An application error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for application startup.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("invalid configuration")]
    Config,
    /// The library directory could not be prepared.
    #[display("could not open library storage")]
    Storage,
    /// Builtin or user templates failed to load or compile.
    #[display("could not load templates")]
    Templates,
    /// The decoration could not be fetched. Never shown to the user.
    #[display("decoration unavailable: {_0}")]
    Decoration(#[error(not(source))] String),
    /// Reading commands or writing screens failed.
    #[display("terminal I/O failed")]
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Decoration(_))
    }
}

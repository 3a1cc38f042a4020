use serde::Serialize;
use shelf_catalog::Status;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A one-shot message produced by handling an action.
///
/// Notices queue up on the [`App`](crate::App) and are shown by the next
/// render only; navigating between views does not discard them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Added { title: String },
    Removed { title: String },
    StatusChanged { title: String, status: Status },
    /// The change was applied in memory but not written to the library file.
    SaveFailed { reason: String },
    /// The library file could not be read; the session started empty.
    LoadFailed { reason: String },
    InvalidInput { reason: String },
    UnknownBook { reference: String },
    EmptyQuery,
}
impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::SaveFailed { .. } | Self::LoadFailed { .. } | Self::InvalidInput { .. } | Self::UnknownBook { .. }
        )
    }
}
impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Added { title } => write!(f, "Book added successfully: {title}"),
            Self::Removed { title } => write!(f, "Book removed successfully: {title}"),
            Self::StatusChanged { title, status } => write!(f, "Marked {title} as {status}"),
            Self::SaveFailed { reason } => {
                write!(f, "Error saving library ({reason}); changes are kept for this session only")
            },
            Self::LoadFailed { reason } => {
                write!(f, "Error loading library ({reason}); starting with an empty library")
            },
            Self::InvalidInput { reason } => write!(f, "Book not added: {reason}"),
            Self::UnknownBook { reference } => write!(f, "No book at {reference}"),
            Self::EmptyQuery => write!(f, "Enter a search term"),
        }
    }
}

/// A notice as handed to templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeLine {
    pub error: bool,
    pub text: String,
}
impl From<&Notice> for NoticeLine {
    fn from(notice: &Notice) -> Self {
        Self { error: notice.is_error(), text: notice.to_string() }
    }
}

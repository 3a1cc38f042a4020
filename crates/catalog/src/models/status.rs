use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use super::sanitize;
use crate::error::{Error, ErrorKind};

/// Whether a book has been read.
///
/// Persisted as the exact strings `"Read"` and `"Unread"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Read,
    #[default]
    Unread,
}
impl Status {
    pub const ALL: [Status; 2] = [Status::Read, Status::Unread];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Read => "Read",
            Status::Unread => "Unread",
        }
    }

    pub fn is_read(&self) -> bool {
        matches!(self, Status::Read)
    }

    /// The other status.
    pub fn toggled(self) -> Self {
        match self {
            Status::Read => Status::Unread,
            Status::Unread => Status::Read,
        }
    }

    /// Lenient conversion: anything that isn't recognisably "read" is
    /// [`Unread`](Status::Unread).
    pub fn normalize(s: impl AsRef<str>) -> Self {
        s.as_ref().parse().unwrap_or_default()
    }
}
impl FromStr for Status {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match sanitize(s).as_str() {
            "read" => Self::Read,
            "unread" => Self::Unread,
            _ => exn::bail!(ErrorKind::Invalid {
                field: "status",
                reason: format!("expected Read or Unread, got {s:?}"),
            }),
        })
    }
}
impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

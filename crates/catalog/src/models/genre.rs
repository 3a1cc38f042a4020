use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use super::sanitize;
use crate::error::{Error, ErrorKind};

/// Closed set of shelf categories offered when adding a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    Biography,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Fantasy,
    Mystery,
    Romance,
    Thriller,
    Horror,
    #[serde(rename = "Self-Help")]
    SelfHelp,
    History,
    Travel,
    Cooking,
    Art,
    Programming,
    /// Catch-all for anything that doesn't fit elsewhere.
    Other,
}
impl Genre {
    /// Every genre, in the order a form should offer them.
    pub const ALL: [Genre; 16] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::Biography,
        Genre::ScienceFiction,
        Genre::Fantasy,
        Genre::Mystery,
        Genre::Romance,
        Genre::Thriller,
        Genre::Horror,
        Genre::SelfHelp,
        Genre::History,
        Genre::Travel,
        Genre::Cooking,
        Genre::Art,
        Genre::Programming,
        Genre::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-Fiction",
            Genre::Biography => "Biography",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Fantasy => "Fantasy",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::Thriller => "Thriller",
            Genre::Horror => "Horror",
            Genre::SelfHelp => "Self-Help",
            Genre::History => "History",
            Genre::Travel => "Travel",
            Genre::Cooking => "Cooking",
            Genre::Art => "Art",
            Genre::Programming => "Programming",
            Genre::Other => "Other",
        }
    }
}
impl FromStr for Genre {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match sanitize(s).as_str() {
            "fiction" => Self::Fiction,
            "nonfiction" => Self::NonFiction,
            "biography" | "memoir" => Self::Biography,
            "sciencefiction" | "scifi" | "sf" => Self::ScienceFiction,
            "fantasy" => Self::Fantasy,
            "mystery" => Self::Mystery,
            "romance" => Self::Romance,
            "thriller" => Self::Thriller,
            "horror" => Self::Horror,
            "selfhelp" => Self::SelfHelp,
            "history" => Self::History,
            "travel" => Self::Travel,
            "cooking" | "cookbook" => Self::Cooking,
            "art" => Self::Art,
            "programming" => Self::Programming,
            "other" => Self::Other,
            _ => exn::bail!(ErrorKind::Invalid {
                field: "genre",
                reason: format!("unknown genre {s:?}"),
            }),
        })
    }
}
impl Display for Genre {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::{Error, ErrorKind};
use crate::models::Book;

/// The book field a search query is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    #[default]
    Title,
    Author,
    Genre,
}
impl SearchField {
    pub const ALL: [SearchField; 3] = [SearchField::Title, SearchField::Author, SearchField::Genre];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Genre => "genre",
        }
    }

    /// The text of `book` this field refers to.
    pub fn value<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            SearchField::Title => &book.title,
            SearchField::Author => &book.author,
            SearchField::Genre => book.genre.as_str(),
        }
    }

    /// Case-insensitive substring match. `needle` must already be lowercase.
    pub(crate) fn matches(&self, book: &Book, needle: &str) -> bool {
        self.value(book).to_lowercase().contains(needle)
    }
}
impl FromStr for SearchField {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "title" => Self::Title,
            "author" => Self::Author,
            "genre" => Self::Genre,
            _ => exn::bail!(ErrorKind::Invalid {
                field: "search field",
                reason: format!("expected title, author or genre, got {s:?}"),
            }),
        })
    }
}
impl Display for SearchField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("title", SearchField::Title)]
    #[case("Author", SearchField::Author)]
    #[case(" GENRE ", SearchField::Genre)]
    fn test_parse(#[case] input: &str, #[case] expected: SearchField) {
        assert_eq!(input.parse::<SearchField>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown() {
        assert!("isbn".parse::<SearchField>().is_err());
    }
}

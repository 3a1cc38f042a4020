use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use time::Date;

use super::{Genre, Status};

/// Stable identifier of a book within one library file.
///
/// Assigned once when the book is added and never reused, so it survives
/// removals and reordering (unlike a position in the list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub u64);
impl Display for BookId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{}", self.0)
    }
}
impl From<u64> for BookId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A single catalog entry.
///
/// Field order is the order written to the library file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Validated against `[1000, current year]` when entered, never again.
    pub published_year: i32,
    pub status: Status,
    pub genre: Genre,
    /// Day the book was added to the library.
    #[serde(with = "super::date")]
    pub added_date: Date,
}
impl Book {
    /// The decade the book was published in, e.g. `1995` → `1990`.
    pub fn decade(&self) -> i32 {
        self.published_year.div_euclid(10) * 10
    }
}
impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} by {} ({})", self.title, self.author, self.published_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::Month;

    fn book(year: i32) -> Book {
        Book {
            id: BookId(7),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            published_year: year,
            status: Status::Read,
            genre: Genre::ScienceFiction,
            added_date: Date::from_calendar_date(2024, Month::May, 2).unwrap(),
        }
    }

    #[rstest]
    #[case(1995, 1990)]
    #[case(1990, 1990)]
    #[case(1999, 1990)]
    #[case(2000, 2000)]
    #[case(1000, 1000)]
    fn test_decade(#[case] year: i32, #[case] decade: i32) {
        assert_eq!(book(year).decade(), decade);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(book(1965)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "title": "Dune",
                "author": "Frank Herbert",
                "published_year": 1965,
                "status": "Read",
                "genre": "Science Fiction",
                "added_date": "2024-05-02",
            })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(book(1965).to_string(), "Dune by Frank Herbert (1965)");
        assert_eq!(BookId(12).to_string(), "#12");
    }
}

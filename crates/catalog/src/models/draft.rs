use exn::ResultExt;
use time::Date;

use super::{Genre, Status};
use crate::error::{ErrorKind, Result};

/// Longest title or author name accepted by the add-book form.
pub const MAX_TEXT_CHARS: usize = 100;
/// Earliest publication year accepted by the add-book form.
pub const MIN_YEAR: i32 = 1000;

/// Unvalidated add-book form input, exactly as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub status: String,
    pub genre: String,
}
impl Draft {
    pub fn new(title: impl Into<String>, author: impl Into<String>, published_year: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            published_year,
            status: Status::default().to_string(),
            genre: Genre::Other.to_string(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    /// Applies the entry-time rules.
    ///
    /// Title and author are trimmed and must be 1..=[`MAX_TEXT_CHARS`]
    /// characters, the year must fall in `[MIN_YEAR, today.year()]` and the
    /// genre must be one of [`Genre::ALL`]. Status is lenient: anything that
    /// isn't "read" becomes [`Status::Unread`].
    pub fn validate(self, today: Date) -> Result<ValidDraft> {
        let title = required_text("title", &self.title)?;
        let author = required_text("author", &self.author)?;
        let max_year = today.year();
        if !(MIN_YEAR..=max_year).contains(&self.published_year) {
            exn::bail!(ErrorKind::Invalid {
                field: "published year",
                reason: format!("{} is outside {MIN_YEAR}..={max_year}", self.published_year),
            });
        }
        let genre = self.genre.parse::<Genre>().or_raise(|| ErrorKind::Invalid {
            field: "genre",
            reason: format!("choose one of: {}", Genre::ALL.map(|g| g.as_str()).join(", ")),
        })?;
        Ok(ValidDraft {
            title,
            author,
            published_year: self.published_year,
            status: Status::normalize(&self.status),
            genre,
        })
    }
}

fn required_text(field: &'static str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        exn::bail!(ErrorKind::Invalid { field, reason: "must not be empty".to_string() });
    }
    let chars = value.chars().count();
    if chars > MAX_TEXT_CHARS {
        exn::bail!(ErrorKind::Invalid {
            field,
            reason: format!("{chars} characters, at most {MAX_TEXT_CHARS} allowed"),
        });
    }
    Ok(value.to_string())
}

/// A [`Draft`] that passed validation; the only way to add a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) published_year: i32,
    pub(crate) status: Status,
    pub(crate) genre: Genre,
}
impl ValidDraft {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn published_year(&self) -> i32 {
        self.published_year
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::Month;

    fn today() -> Date {
        Date::from_calendar_date(2025, Month::June, 1).unwrap()
    }

    #[test]
    fn test_valid_draft() {
        let valid = Draft::new("  Dune ", "Frank Herbert", 1965)
            .with_status("read")
            .with_genre("science fiction")
            .validate(today())
            .unwrap();
        assert_eq!(valid.title(), "Dune");
        assert_eq!(valid.author(), "Frank Herbert");
        assert_eq!(valid.published_year(), 1965);
        assert_eq!(valid.status(), Status::Read);
        assert_eq!(valid.genre(), Genre::ScienceFiction);
    }

    #[test]
    fn test_odd_status_becomes_unread() {
        let valid = Draft::new("Dune", "Frank Herbert", 1965).with_status("true").validate(today()).unwrap();
        assert_eq!(valid.status(), Status::Unread);
    }

    #[rstest]
    #[case(Draft::new("", "Frank Herbert", 1965), "title")]
    #[case(Draft::new("   ", "Frank Herbert", 1965), "title")]
    #[case(Draft::new("Dune", "", 1965), "author")]
    #[case(Draft::new("x".repeat(101), "Frank Herbert", 1965), "title")]
    #[case(Draft::new("Dune", "y".repeat(101), 1965), "author")]
    #[case(Draft::new("Dune", "Frank Herbert", 999), "published year")]
    #[case(Draft::new("Dune", "Frank Herbert", 2026), "published year")]
    #[case(Draft::new("Dune", "Frank Herbert", 1965).with_genre("Poetry"), "genre")]
    fn test_rejected(#[case] draft: Draft, #[case] expected_field: &str) {
        let err = draft.validate(today()).unwrap_err();
        match &*err {
            ErrorKind::Invalid { field, .. } => assert_eq!(*field, expected_field),
            other => panic!("unexpected error kind: {other}"),
        }
    }

    #[test]
    fn test_boundaries_accepted() {
        assert!(Draft::new("x".repeat(100), "y", 1000).validate(today()).is_ok());
        assert!(Draft::new("Dune", "Frank Herbert", 2025).validate(today()).is_ok());
    }
}

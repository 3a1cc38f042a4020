//! Normalization of records written by older versions of the library file.
//!
//! Runs once when a library is opened, never as a side effect of reading.
//! Normalizing already-normalized books changes nothing, so the resulting
//! [`Report`] is clean and no save is triggered.

use serde_json::Value;
use std::collections::HashSet;

use crate::models::{Book, BookId, Genre, Status};
use crate::store::Record;

/// What [`normalize`] had to fix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Records whose status was missing or not exactly `"Read"`/`"Unread"`.
    pub statuses: usize,
    /// Records whose genre was not spelled like one of [`Genre::ALL`].
    pub genres: usize,
    /// Records that had no id, or shared one with an earlier record.
    pub ids: usize,
}
impl Report {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Normalized books plus a summary of the changes.
#[derive(Debug)]
pub struct Migration {
    pub books: Vec<Book>,
    pub report: Report,
}

/// Turns raw records into books, preserving order.
///
/// - status: case-insensitive `"read"` is [`Status::Read`]; missing, non-string
///   or unrecognised values become [`Status::Unread`].
/// - genre: lenient spelling is accepted, unknown genres become
///   [`Genre::Other`].
/// - id: the first record keeps a given id; records without one (or with a
///   duplicate) get fresh ids above the highest one in use. When those would
///   not fit below `u64::MAX`, every record is renumbered from 1 instead.
pub fn normalize(records: Vec<Record>) -> Migration {
    let mut report = Report::default();
    let ids = assign_ids(&records);

    let books = records
        .into_iter()
        .zip(ids)
        .map(|(record, id)| {
            if record.id != Some(id.0) {
                report.ids += 1;
            }
            let status = match &record.status {
                Some(Value::String(s)) if s == Status::Read.as_str() => Status::Read,
                Some(Value::String(s)) if s == Status::Unread.as_str() => Status::Unread,
                Some(Value::String(s)) => {
                    report.statuses += 1;
                    Status::normalize(s)
                },
                _ => {
                    report.statuses += 1;
                    Status::Unread
                },
            };
            let genre = match record.genre.parse::<Genre>() {
                Ok(genre) => {
                    if genre.as_str() != record.genre {
                        report.genres += 1;
                    }
                    genre
                },
                Err(_) => {
                    tracing::warn!(genre = %record.genre, title = %record.title, "Unknown genre, filing under Other");
                    report.genres += 1;
                    Genre::Other
                },
            };
            Book {
                id,
                title: record.title,
                author: record.author,
                published_year: record.published_year,
                status,
                genre,
                added_date: record.added_date,
            }
        })
        .collect();

    Migration { books, report }
}

/// One unique id per record, in record order.
///
/// The highest id handed out always leaves room for one more, so the catalog
/// can keep counting up from it.
fn assign_ids(records: &[Record]) -> Vec<BookId> {
    let mut seen = HashSet::with_capacity(records.len());
    let kept: Vec<Option<u64>> = records.iter().map(|r| r.id.filter(|id| seen.insert(*id))).collect();
    let missing = kept.iter().filter(|id| id.is_none()).count() as u64;
    let highest = seen.iter().copied().max().unwrap_or(0);

    match highest.checked_add(missing).and_then(|top| top.checked_add(1)) {
        Some(_) => {
            let mut last = highest;
            kept.into_iter()
                .map(|id| {
                    BookId(id.unwrap_or_else(|| {
                        last += 1;
                        last
                    }))
                })
                .collect()
        },
        None => {
            tracing::warn!(highest, missing, "Book ids exhausted, renumbering the library");
            (1..=records.len() as u64).map(BookId).collect()
        },
    }
}

use serde::Serialize;
use shelf_catalog::{Book, Genre, Status};
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::table::{Entry, FrequencyTable};

/// The decade a book was published in, labelled like `1990s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decade(pub i32);
impl Decade {
    pub fn of(year: i32) -> Self {
        Self(year.div_euclid(10) * 10)
    }
}
impl Display for Decade {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}s", self.0)
    }
}

/// Point-in-time statistics for a list of books.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub total: usize,
    pub read: usize,
    pub unread: usize,
    /// Share of read books as a whole percentage, rounded half up.
    pub percent_read: usize,
    pub genres: FrequencyTable<Genre>,
    pub authors: FrequencyTable<String>,
    pub decades: FrequencyTable<Decade>,
}
impl Snapshot {
    pub fn compute(books: &[Book]) -> Self {
        let total = books.len();
        if total == 0 {
            return Self::default();
        }
        let read = books.iter().filter(|b| b.status == Status::Read).count();
        let snapshot = Self {
            total,
            read,
            unread: total - read,
            percent_read: percent(read, total),
            genres: books.iter().map(|b| b.genre).collect(),
            authors: books.iter().map(|b| b.author.clone()).collect(),
            decades: books.iter().map(|b| Decade::of(b.published_year)).collect(),
        };
        tracing::trace!(total, read, genres = snapshot.genres.len(), "Computed library statistics");
        snapshot
    }

    pub fn unread(&self) -> usize {
        self.unread
    }

    /// Read and unread counts, in that order, for the status pie chart.
    pub fn status_split(&self) -> [Entry<Status>; 2] {
        [Entry { key: Status::Read, count: self.read }, Entry { key: Status::Unread, count: self.unread }]
    }

    pub fn top_authors(&self, n: usize) -> &[Entry<String>] {
        self.authors.top(n)
    }

    /// Decade rows ordered oldest first, for the line chart.
    pub fn decades_chronological(&self) -> Vec<Entry<Decade>> {
        let mut rows = self.decades.entries().to_vec();
        rows.sort_by_key(|e| e.key);
        rows
    }
}

/// `100 * part / whole` rounded half up, without floating point.
fn percent(part: usize, whole: usize) -> usize {
    (200 * part + whole) / (2 * whole)
}

mod book;
pub(crate) mod date;
mod draft;
mod genre;
mod status;

pub use self::book::{Book, BookId};
pub use self::date::format as format_date;
pub use self::draft::{Draft, MAX_TEXT_CHARS, MIN_YEAR, ValidDraft};
pub use self::genre::Genre;
pub use self::status::Status;

/// Lowercases and strips the separators people type inconsistently.
fn sanitize(s: impl AsRef<str>) -> String {
    s.as_ref().trim().to_lowercase().replace(['-', '_', ' ', '/'], "")
}

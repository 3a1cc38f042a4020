//! Whole-file JSON persistence of the library.

use exn::ResultExt;
use serde::{Deserialize, Serialize};
use shelf_storage::BackendHandle;
use std::path::{Path, PathBuf};
use time::Date;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::models::Book;

/// File name used when only a directory is configured.
pub const DEFAULT_FILE_NAME: &str = "library.json";

/// A book exactly as found on disk.
///
/// Looser than [`Book`]: files written by older versions may
/// lack an `id`, carry a status that isn't `"Read"`/`"Unread"` (or none at
/// all) and name genres outside the current set. [`migrate`](crate::migrate)
/// turns these into proper books.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    pub author: String,
    pub published_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<serde_json::Value>,
    pub genre: String,
    #[serde(with = "crate::models::date")]
    pub added_date: Date,
}
impl From<&Book> for Record {
    fn from(book: &Book) -> Self {
        Self {
            id: Some(book.id.0),
            title: book.title.clone(),
            author: book.author.clone(),
            published_year: book.published_year,
            status: Some(serde_json::Value::String(book.status.to_string())),
            genre: book.genre.to_string(),
            added_date: book.added_date,
        }
    }
}

/// Location of the library file on a storage backend.
#[derive(Clone)]
pub struct LibraryStore {
    backend: BackendHandle,
    path: PathBuf,
}
impl LibraryStore {
    pub fn new(backend: BackendHandle, path: impl Into<PathBuf>) -> Self {
        Self { backend, path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Reads every record from the library file.
    ///
    /// A missing file is an empty library, not an error.
    ///
    /// # Errors
    /// - [`ErrorKind::Storage`] when the file exists but cannot be read.
    /// - [`ErrorKind::Malformed`] when it isn't a JSON list of records.
    #[instrument(skip(self), fields(backend = self.backend.name(), path = %self.path.display()))]
    pub async fn load(&self) -> Result<Vec<Record>> {
        if !storage(self.backend.exists(&self.path).await)? {
            tracing::debug!("No library file yet, starting empty");
            return Ok(Vec::new());
        }
        let data = storage(self.backend.read(&self.path).await)?;
        let records: Vec<Record> =
            serde_json::from_slice(&data).or_raise(|| ErrorKind::Malformed(self.path.clone()))?;
        tracing::debug!(records = records.len(), "Library file loaded");
        Ok(records)
    }

    /// Overwrites the library file with the given books.
    #[instrument(skip_all, fields(backend = self.backend.name(), path = %self.path.display(), books = books.len()))]
    pub async fn save(&self, books: &[Book]) -> Result<()> {
        let mut data = serde_json::to_vec_pretty(books).or_raise(|| ErrorKind::Serialize)?;
        data.push(b'\n');
        storage(self.backend.write(&self.path, &data).await)?;
        tracing::debug!(bytes = data.len(), "Library file saved");
        Ok(())
    }
}

/// Wraps a backend failure, keeping its message for the user-facing notice.
fn storage<T>(result: shelf_storage::error::Result<T>) -> Result<T> {
    let reason = result.as_ref().err().map(|e| (**e).to_string()).unwrap_or_default();
    result.or_raise(|| ErrorKind::Storage(reason))
}

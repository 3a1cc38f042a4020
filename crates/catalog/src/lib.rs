//! Book records and the operations a reader performs on their library.
//!
//! # Architecture
//! - [`models`]: the [`Book`] record and its closed vocabularies
//!   ([`Status`], [`Genre`]), plus the unvalidated [`Draft`] coming from a
//!   form.
//! - [`LibraryStore`]: whole-file JSON persistence on top of a
//!   [`shelf_storage::StorageBackend`].
//! - [`migrate`]: one-off cleanup of legacy records, run when a library is
//!   opened.
//! - [`Catalog`]: the in-memory library plus add/remove/toggle/search, each
//!   mutation flushed to the store straight away.

mod catalog;
pub mod error;
pub mod migrate;
pub mod models;
mod search;
mod store;

pub use crate::catalog::{Catalog, Persisted};
pub use crate::models::{Book, BookId, Draft, Genre, Status, ValidDraft};
pub use crate::search::SearchField;
pub use crate::store::{DEFAULT_FILE_NAME, LibraryStore, Record};

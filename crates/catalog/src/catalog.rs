use std::collections::HashSet;
use time::Date;
use tracing::instrument;

use crate::error::Result;
use crate::migrate::{Migration, normalize};
use crate::models::{Book, BookId, Status, ValidDraft};
use crate::search::SearchField;
use crate::store::LibraryStore;

/// The value produced by a mutation, together with the outcome of flushing
/// the library to its store.
///
/// A failed flush never undoes the in-memory change: memory and disk may
/// diverge until the next successful save.
#[derive(Debug)]
pub struct Persisted<T> {
    pub value: T,
    pub saved: Result<()>,
}
impl<T> Persisted<T> {
    pub fn is_saved(&self) -> bool {
        self.saved.is_ok()
    }
}

/// The reader's library: an ordered list of books backed by a
/// [`LibraryStore`].
///
/// Books keep their insertion order and duplicates are allowed. Operations
/// address books by [`BookId`]; positions are only for display
/// ([`id_at`](Self::id_at), [`position_of`](Self::position_of)).
pub struct Catalog {
    store: LibraryStore,
    books: Vec<Book>,
    /// One past the highest id in use, `None` once that would overflow.
    next_id: Option<u64>,
}
impl Catalog {
    /// A catalog with no books that will save to `store`.
    pub fn empty(store: LibraryStore) -> Self {
        Self { store, books: Vec::new(), next_id: Some(1) }
    }

    /// Loads the library and normalizes legacy records.
    ///
    /// When normalization changed anything the cleaned library is saved
    /// straight away; failing to do so is logged and otherwise ignored, the
    /// next mutation will try again.
    ///
    /// # Errors
    /// Whatever [`LibraryStore::load`] reports. A missing file is not an error.
    #[instrument(skip_all, fields(backend = store.backend_name(), path = %store.path().display()))]
    pub async fn open(store: LibraryStore) -> Result<Self> {
        let Migration { books, report } = normalize(store.load().await?);
        let next_id = books.iter().map(|b| b.id.0).max().map_or(Some(1), |max| max.checked_add(1));
        let catalog = Self { store, books, next_id };
        if !report.is_clean() {
            tracing::info!(
                statuses = report.statuses,
                genres = report.genres,
                ids = report.ids,
                "Normalized legacy library records"
            );
            if let Err(e) = catalog.flush().await {
                tracing::warn!(error = ?e, "Could not save normalized library");
            }
        }
        Ok(catalog)
    }

    pub fn store(&self) -> &LibraryStore {
        &self.store
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Zero-based position of a book in insertion order.
    pub fn position_of(&self, id: BookId) -> Option<usize> {
        self.books.iter().position(|b| b.id == id)
    }

    /// The id of the book currently at a zero-based position.
    pub fn id_at(&self, index: usize) -> Option<BookId> {
        self.books.get(index).map(|b| b.id)
    }

    /// Writes the whole library to the store.
    pub async fn flush(&self) -> Result<()> {
        self.store.save(&self.books).await
    }

    async fn persist<T>(&self, value: T) -> Persisted<T> {
        let saved = self.flush().await;
        if let Err(e) = &saved {
            tracing::warn!(error = ?e, "Library change kept in memory but not saved");
        }
        Persisted { value, saved }
    }

    /// Appends a new book added on `added`.
    #[instrument(skip_all, fields(title = draft.title()))]
    pub async fn add_book(&mut self, draft: ValidDraft, added: Date) -> Persisted<BookId> {
        let id = self.allocate_id();
        self.books.push(Book {
            id,
            title: draft.title,
            author: draft.author,
            published_year: draft.published_year,
            status: draft.status,
            genre: draft.genre,
            added_date: added,
        });
        tracing::debug!(%id, "Book added");
        self.persist(id).await
    }

    /// Counts up from the highest id; after `u64::MAX` has been handed out,
    /// falls back to the lowest id no book uses.
    fn allocate_id(&mut self) -> BookId {
        let id = self.next_id.unwrap_or_else(|| self.lowest_free_id());
        self.next_id = id.checked_add(1).filter(|next| self.get(BookId(*next)).is_none());
        BookId(id)
    }

    fn lowest_free_id(&self) -> u64 {
        let used: HashSet<u64> = self.books.iter().map(|b| b.id.0).collect();
        // There are fewer books than ids, so a free one always exists.
        (1..=u64::MAX).find(|id| !used.contains(id)).unwrap_or(u64::MAX)
    }

    /// Removes a book. Returns `None` (and changes nothing) for an unknown id.
    #[instrument(skip(self))]
    pub async fn remove_book(&mut self, id: BookId) -> Option<Persisted<Book>> {
        let index = self.position_of(id)?;
        self.remove_at(index).await
    }

    /// Removes the book at a zero-based position; later books shift down by
    /// one. Returns `None` (and changes nothing) when out of range.
    #[instrument(skip(self))]
    pub async fn remove_at(&mut self, index: usize) -> Option<Persisted<Book>> {
        if index >= self.books.len() {
            tracing::debug!(len = self.books.len(), "Position out of range, nothing removed");
            return None;
        }
        let book = self.books.remove(index);
        tracing::debug!(id = %book.id, "Book removed");
        Some(self.persist(book).await)
    }

    /// Flips a book between read and unread, returning the new status.
    #[instrument(skip(self))]
    pub async fn toggle_status(&mut self, id: BookId) -> Option<Persisted<Status>> {
        let book = self.books.iter_mut().find(|b| b.id == id)?;
        book.status = book.status.toggled();
        let status = book.status;
        tracing::debug!(%status, "Book status changed");
        Some(self.persist(status).await)
    }

    /// Case-insensitive substring search over one field, in library order.
    ///
    /// An empty query matches every book; callers that don't want that
    /// should not search with one.
    pub fn search(&self, query: &str, field: SearchField) -> Vec<&Book> {
        let needle = query.to_lowercase();
        self.books.iter().filter(|book| field.matches(book, &needle)).collect()
    }
}

//! The view controller.
//!
//! One [`App`] lives for the whole session. Each user event becomes one or
//! more [`Action`]s passed to [`App::dispatch`], followed by exactly one
//! [`App::render`]. Nothing that goes wrong while dispatching escapes: it is
//! queued as a [`Notice`] for the next render instead.

use shelf_catalog::{BookId, Catalog, Draft, LibraryStore, SearchField};
use shelf_stats::Snapshot;
use time::{Date, OffsetDateTime};
use tracing::instrument;

use crate::decoration::Decoration;
use crate::notice::{Notice, NoticeLine};
use crate::screen::{AddBookPage, LastSearch, LibraryPage, Page, Screen, SearchPage, StatisticsPage};
use crate::view::View;

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(View),
    Submit(Draft),
    Remove(BookId),
    ToggleStatus(BookId),
    Search { field: SearchField, query: String },
}

/// Source of "today", used to date new books and bound the year field.
pub trait Clock {
    fn today(&self) -> Date;
}

/// The local date, or UTC when the local offset can't be determined.
pub struct SystemClock;
impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()).date()
    }
}

pub struct FixedClock(pub Date);
impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

pub struct App {
    catalog: Catalog,
    view: View,
    last_search: Option<LastSearch>,
    notices: Vec<Notice>,
    decoration: Option<Decoration>,
    clock: Box<dyn Clock>,
}
impl App {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            view: View::default(),
            last_search: None,
            notices: Vec::new(),
            decoration: None,
            clock: Box::new(SystemClock),
        }
    }

    /// Opens the library behind `store`.
    ///
    /// A file that can't be read or parsed does not stop the session: it
    /// starts with an empty library and a [`Notice::LoadFailed`]. The next
    /// successful save replaces the unreadable file.
    #[instrument(skip_all, fields(path = %store.path().display()))]
    pub async fn open(store: LibraryStore) -> Self {
        match Catalog::open(store.clone()).await {
            Ok(catalog) => Self::new(catalog),
            Err(e) => {
                tracing::warn!(error = ?e, "Could not load library, starting empty");
                let mut app = Self::new(Catalog::empty(store));
                app.notify(Notice::LoadFailed { reason: (*e).to_string() });
                app
            },
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_decoration(mut self, decoration: Option<Decoration>) -> Self {
        self.decoration = decoration;
        self
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn today(&self) -> Date {
        self.clock.today()
    }

    /// Notices waiting for the next render.
    pub fn pending_notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn notify(&mut self, notice: Notice) {
        tracing::debug!(%notice, "Notice queued");
        self.notices.push(notice);
    }

    /// Translates a 1-based position as shown on screen into a book id.
    pub fn id_at_position(&self, position: usize) -> Option<BookId> {
        self.catalog.id_at(position.checked_sub(1)?)
    }

    #[instrument(skip(self))]
    pub async fn dispatch(&mut self, action: Action) {
        match action {
            Action::Navigate(view) => self.view = view,
            Action::Submit(draft) => self.submit(draft).await,
            Action::Remove(id) => match self.catalog.remove_book(id).await {
                Some(removed) => {
                    self.notify(Notice::Removed { title: removed.value.title });
                    self.check_saved(removed.saved);
                },
                None => self.notify(Notice::UnknownBook { reference: id.to_string() }),
            },
            Action::ToggleStatus(id) => match self.catalog.toggle_status(id).await {
                Some(toggled) => {
                    let title = self.catalog.get(id).map(|b| b.title.clone()).unwrap_or_default();
                    self.notify(Notice::StatusChanged { title, status: toggled.value });
                    self.check_saved(toggled.saved);
                },
                None => self.notify(Notice::UnknownBook { reference: id.to_string() }),
            },
            Action::Search { field, query } => self.search(field, query),
        }
    }

    async fn submit(&mut self, draft: Draft) {
        let today = self.today();
        let valid = match draft.validate(today) {
            Ok(valid) => valid,
            Err(e) => {
                self.notify(Notice::InvalidInput { reason: (*e).to_string() });
                return;
            },
        };
        let title = valid.title().to_string();
        let added = self.catalog.add_book(valid, today).await;
        self.notify(Notice::Added { title });
        self.check_saved(added.saved);
    }

    fn search(&mut self, field: SearchField, query: String) {
        let query = query.trim();
        if query.is_empty() {
            // Previous results stay on screen.
            self.notify(Notice::EmptyQuery);
            return;
        }
        let ids = self.catalog.search(query, field).iter().map(|b| b.id).collect::<Vec<_>>();
        tracing::debug!(%field, query, results = ids.len(), "Searched library");
        self.last_search = Some(LastSearch { field, query: query.to_string(), ids });
    }

    fn check_saved(&mut self, saved: shelf_catalog::error::Result<()>) {
        if let Err(e) = saved {
            self.notify(Notice::SaveFailed { reason: (*e).to_string() });
        }
    }

    /// Builds the model of the current view, consuming pending notices.
    pub fn render(&mut self) -> Screen {
        let notices = std::mem::take(&mut self.notices).iter().map(NoticeLine::from).collect();
        let page = match self.view {
            View::Library => Page::Library(LibraryPage::build(&self.catalog)),
            View::AddBook => Page::AddBook(AddBookPage::build(self.today())),
            View::Search => Page::Search(SearchPage::build(&self.catalog, self.last_search.as_ref())),
            View::Statistics => Page::Statistics(StatisticsPage::build(&Snapshot::compute(self.catalog.books()))),
        };
        Screen { view: self.view, title: self.view.title(), decoration: self.decoration.clone(), notices, page }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_catalog::{DEFAULT_FILE_NAME, Status};
    use shelf_storage::backend::{MockBackend, ReadOnlyBackend};
    use std::sync::Arc;
    use time::Month;

    fn today() -> Date {
        Date::from_calendar_date(2025, Month::March, 14).unwrap()
    }

    fn app_on(backend: Arc<MockBackend>) -> App {
        App::new(Catalog::empty(LibraryStore::new(backend, DEFAULT_FILE_NAME))).with_clock(FixedClock(today()))
    }

    fn app() -> App {
        app_on(Arc::new(MockBackend::default()))
    }

    fn dune() -> Action {
        Action::Submit(Draft::new("Dune", "Frank Herbert", 1965).with_genre("Science Fiction"))
    }

    fn emma() -> Action {
        Action::Submit(Draft::new("Emma", "Jane Austen", 1815).with_genre("Romance").with_status("Read"))
    }

    fn texts(screen: &Screen) -> Vec<&str> {
        screen.notices.iter().map(|n| n.text.as_str()).collect()
    }

    #[tokio::test]
    async fn test_navigation_is_unconditional() {
        let mut app = app();
        assert_eq!(app.view(), View::Library);
        for view in [View::Statistics, View::AddBook, View::AddBook, View::Search, View::Library] {
            app.dispatch(Action::Navigate(view)).await;
            assert_eq!(app.view(), view);
            assert_eq!(app.render().view, view);
        }
    }

    #[tokio::test]
    async fn test_submit_adds_and_notifies_once() {
        let mut app = app();
        app.dispatch(Action::Navigate(View::AddBook)).await;
        app.dispatch(dune()).await;
        // Submitting does not navigate.
        assert_eq!(app.view(), View::AddBook);
        let book = &app.catalog().books()[0];
        assert_eq!(book.added_date, today());
        assert_eq!(book.status, Status::Unread);

        let first = app.render();
        assert_eq!(texts(&first), ["Book added successfully: Dune"]);
        assert!(app.render().notices.is_empty());
    }

    #[tokio::test]
    async fn test_navigation_keeps_pending_notices() {
        let mut app = app();
        app.dispatch(dune()).await;
        app.dispatch(Action::Navigate(View::Statistics)).await;
        let screen = app.render();
        assert_eq!(screen.view, View::Statistics);
        assert_eq!(screen.notices.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_draft_does_not_mutate() {
        let backend = Arc::new(MockBackend::default());
        let mut app = app_on(backend.clone());
        app.dispatch(Action::Submit(Draft::new("  ", "Frank Herbert", 1965))).await;
        app.dispatch(Action::Submit(Draft::new("Dune", "Frank Herbert", 2026))).await;
        app.dispatch(Action::Submit(Draft::new("Dune", "Frank Herbert", 1965).with_genre("Poetry"))).await;
        assert!(app.catalog().is_empty());
        assert_eq!(backend.write_count(), 0);
        assert_eq!(app.pending_notices().len(), 3);
        assert!(app.pending_notices().iter().all(|n| matches!(n, Notice::InvalidInput { .. })));
    }

    #[tokio::test]
    async fn test_remove_and_toggle() {
        let mut app = app();
        app.dispatch(dune()).await;
        app.dispatch(emma()).await;
        let emma_id = app.id_at_position(2).unwrap();

        app.dispatch(Action::ToggleStatus(emma_id)).await;
        assert_eq!(app.catalog().get(emma_id).unwrap().status, Status::Unread);

        let dune_id = app.id_at_position(1).unwrap();
        app.dispatch(Action::Remove(dune_id)).await;
        assert_eq!(app.id_at_position(1), Some(emma_id));

        app.dispatch(Action::Remove(dune_id)).await;
        let screen = app.render();
        assert_eq!(&texts(&screen)[2..], ["Marked Emma as Unread", "Book removed successfully: Dune", "No book at #1"]);
    }

    #[tokio::test]
    async fn test_positions_are_one_based() {
        let mut app = app();
        app.dispatch(dune()).await;
        assert_eq!(app.id_at_position(0), None);
        assert!(app.id_at_position(1).is_some());
        assert_eq!(app.id_at_position(2), None);
    }

    #[tokio::test]
    async fn test_empty_query_keeps_previous_results() {
        let mut app = app();
        app.dispatch(dune()).await;
        app.dispatch(emma()).await;
        app.render();
        app.dispatch(Action::Navigate(View::Search)).await;
        app.dispatch(Action::Search { field: SearchField::Author, query: "AUSTEN".into() }).await;
        app.dispatch(Action::Search { field: SearchField::Title, query: "   ".into() }).await;

        let screen = app.render();
        assert_eq!(app.pending_notices(), []);
        assert_eq!(texts(&screen), ["Enter a search term"]);
        let Page::Search(page) = screen.page else { panic!("expected search page") };
        assert_eq!(page.field, SearchField::Author);
        assert_eq!(page.query, "AUSTEN");
        assert_eq!(page.results.iter().map(|c| c.title.as_str()).collect::<Vec<_>>(), ["Emma"]);
    }

    #[tokio::test]
    async fn test_search_results_drop_removed_books() {
        let mut app = app();
        app.dispatch(dune()).await;
        app.dispatch(emma()).await;
        app.dispatch(Action::Navigate(View::Search)).await;
        app.dispatch(Action::Search { field: SearchField::Title, query: "e".into() }).await;
        let dune_id = app.id_at_position(1).unwrap();
        app.dispatch(Action::Remove(dune_id)).await;

        let Page::Search(page) = app.render().page else { panic!("expected search page") };
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].title, "Emma");
        // Positions follow the live library.
        assert_eq!(page.results[0].position, 1);
    }

    #[tokio::test]
    async fn test_read_only_keeps_changes_in_memory() {
        let mock = Arc::new(MockBackend::default());
        let store = LibraryStore::new(Arc::new(ReadOnlyBackend::new(mock.clone())), DEFAULT_FILE_NAME);
        let mut app = App::open(store).await.with_clock(FixedClock(today()));
        app.dispatch(dune()).await;

        assert_eq!(app.catalog().len(), 1);
        assert_eq!(mock.write_count(), 0);
        let notices = app.pending_notices();
        assert!(matches!(&notices[0], Notice::Added { .. }));
        assert!(matches!(&notices[1], Notice::SaveFailed { reason } if reason.contains("read-only")));
    }

    #[tokio::test]
    async fn test_unreadable_library_starts_empty() {
        let backend = Arc::new(MockBackend::with_files([(DEFAULT_FILE_NAME, "not json")]));
        let store = LibraryStore::new(backend.clone(), DEFAULT_FILE_NAME);
        let mut app = App::open(store).await.with_clock(FixedClock(today()));
        assert!(app.catalog().is_empty());
        assert!(matches!(app.pending_notices(), [Notice::LoadFailed { .. }]));

        // The next save replaces the unreadable file.
        app.dispatch(dune()).await;
        let saved = backend.contents(DEFAULT_FILE_NAME).await.unwrap();
        assert!(String::from_utf8(saved).unwrap().contains("\"Dune\""));
    }

    #[tokio::test]
    async fn test_statistics_screen() {
        let mut app = app();
        app.dispatch(dune()).await;
        app.dispatch(emma()).await;
        app.dispatch(Action::Submit(Draft::new("Persuasion", "Jane Austen", 1817).with_genre("Romance"))).await;
        app.dispatch(Action::Navigate(View::Statistics)).await;

        let Page::Statistics(page) = app.render().page else { panic!("expected statistics page") };
        assert_eq!((page.total, page.read, page.unread, page.percent_read), (3, 1, 2, 33));
        assert_eq!(page.genres[0].key, shelf_catalog::Genre::Romance);
        assert_eq!(page.decades.iter().map(|d| d.key.to_string()).collect::<Vec<_>>(), ["1810s", "1960s"]);
        assert_eq!(page.authors[0].key, "Jane Austen");
    }
}

//! Serializable models of each view, handed to the templates.
//!
//! Positions shown to the user are 1-based and refer to the book's place in
//! the whole library, so a position seen on any screen can be passed
//! straight to `remove` or `toggle`.

use serde::Serialize;
use shelf_catalog::models::{MAX_TEXT_CHARS, MIN_YEAR, format_date};
use shelf_catalog::{Book, BookId, Catalog, Genre, SearchField, Status};
use shelf_stats::{Decade, Entry, Snapshot, TOP_AUTHORS};
use time::Date;

use crate::decoration::Decoration;
use crate::notice::NoticeLine;
use crate::view::View;

#[derive(Debug, Clone, Serialize)]
pub struct Screen {
    pub view: View,
    pub title: &'static str,
    pub decoration: Option<Decoration>,
    pub notices: Vec<NoticeLine>,
    pub page: Page,
}
impl Screen {
    pub fn template(&self) -> &'static str {
        self.view.template()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Page {
    Library(LibraryPage),
    AddBook(AddBookPage),
    Search(SearchPage),
    Statistics(StatisticsPage),
}

/// One book as displayed in a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub position: usize,
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: &'static str,
    pub status: &'static str,
    pub read: bool,
    pub added: String,
}
impl Card {
    fn new(position: usize, book: &Book) -> Self {
        Self {
            position,
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.published_year,
            genre: book.genre.as_str(),
            status: book.status.as_str(),
            read: book.status.is_read(),
            added: format_date(&book.added_date),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LibraryPage {
    pub empty: bool,
    pub total: usize,
    pub read: usize,
    pub cards: Vec<Card>,
}
impl LibraryPage {
    pub fn build(catalog: &Catalog) -> Self {
        let cards: Vec<_> = catalog.books().iter().enumerate().map(|(i, book)| Card::new(i + 1, book)).collect();
        Self {
            empty: cards.is_empty(),
            total: cards.len(),
            read: cards.iter().filter(|c| c.read).count(),
            cards,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: &'static str,
    pub hint: String,
}

/// The add-book form: what each field accepts.
#[derive(Debug, Clone, Serialize)]
pub struct AddBookPage {
    pub fields: Vec<FormField>,
    pub min_year: i32,
    pub max_year: i32,
    pub statuses: String,
    pub genres: String,
}
impl AddBookPage {
    pub fn build(today: Date) -> Self {
        let max_year = today.year();
        let text = |name, label| FormField {
            name,
            label,
            kind: "text",
            hint: format!("required, at most {MAX_TEXT_CHARS} characters"),
        };
        Self {
            fields: vec![
                text("title", "Title"),
                text("author", "Author"),
                FormField {
                    name: "year",
                    label: "Year",
                    kind: "integer",
                    hint: format!("published between {MIN_YEAR} and {max_year}"),
                },
                FormField {
                    name: "status",
                    label: "Status",
                    kind: "choice",
                    hint: format!("one of the statuses below, default {}", Status::default()),
                },
                FormField {
                    name: "genre",
                    label: "Genre",
                    kind: "choice",
                    hint: format!("one of the genres below, default {}", crate::cli::DEFAULT_GENRE),
                },
            ],
            min_year: MIN_YEAR,
            max_year,
            statuses: join(Status::ALL.iter().map(Status::as_str)),
            genres: join(Genre::ALL.iter().map(Genre::as_str)),
        }
    }
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

/// The most recent successful search, kept as ids so that later removals
/// drop out of the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastSearch {
    pub field: SearchField,
    pub query: String,
    pub ids: Vec<BookId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    pub fields: String,
    pub searched: bool,
    pub field: SearchField,
    pub query: String,
    pub count: usize,
    pub no_results: bool,
    pub results: Vec<Card>,
}
impl SearchPage {
    pub fn build(catalog: &Catalog, last: Option<&LastSearch>) -> Self {
        let fields = SearchField::ALL.iter().map(SearchField::as_str).collect::<Vec<_>>().join("|");
        let Some(last) = last else {
            return Self {
                fields,
                searched: false,
                field: SearchField::default(),
                query: String::new(),
                count: 0,
                no_results: false,
                results: Vec::new(),
            };
        };
        let results: Vec<_> = last
            .ids
            .iter()
            .filter_map(|&id| Some(Card::new(catalog.position_of(id)? + 1, catalog.get(id)?)))
            .collect();
        Self {
            fields,
            searched: true,
            field: last.field,
            query: last.query.clone(),
            count: results.len(),
            no_results: results.is_empty(),
            results,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatisticsPage {
    pub empty: bool,
    pub total: usize,
    pub read: usize,
    pub unread: usize,
    pub percent_read: usize,
    pub status: [Entry<Status>; 2],
    pub genres: Vec<Entry<Genre>>,
    pub genre_max: usize,
    /// Oldest decade first, for the line chart.
    pub decades: Vec<Entry<Decade>>,
    pub decade_max: usize,
    pub authors: Vec<Entry<String>>,
}
impl StatisticsPage {
    pub fn build(snapshot: &Snapshot) -> Self {
        Self {
            empty: snapshot.total == 0,
            total: snapshot.total,
            read: snapshot.read,
            unread: snapshot.unread(),
            percent_read: snapshot.percent_read,
            status: snapshot.status_split(),
            genres: snapshot.genres.entries().to_vec(),
            genre_max: snapshot.genres.max(),
            decades: snapshot.decades_chronological(),
            decade_max: snapshot.decades.max(),
            authors: snapshot.top_authors(TOP_AUTHORS).to_vec(),
        }
    }
}

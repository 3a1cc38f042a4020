use clap::ValueEnum;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// The screen currently shown. Any view can be reached from any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    #[value(alias = "list")]
    Library,
    #[value(alias = "add")]
    AddBook,
    Search,
    #[value(alias = "stats")]
    Statistics,
}
impl View {
    pub const ALL: [View; 4] = [View::Library, View::AddBook, View::Search, View::Statistics];

    /// Name of the template drawing this view.
    pub fn template(&self) -> &'static str {
        match self {
            View::Library => "library",
            View::AddBook => "add_book",
            View::Search => "search",
            View::Statistics => "statistics",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Library => "Your Library",
            View::AddBook => "Add a Book",
            View::Search => "Search for a Book",
            View::Statistics => "Library Statistics",
        }
    }
}
impl Display for View {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.to_possible_value() {
            Some(value) => write!(f, "{}", value.get_name()),
            None => write!(f, "{}", self.template()),
        }
    }
}

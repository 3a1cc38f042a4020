//! Command-line grammar, shared by one-shot invocations and the interactive
//! session.

use clap::{Parser, Subcommand, ValueEnum};
use shelf_catalog::{Draft, SearchField};
use shelf_config::Config;
use std::path::PathBuf;

use crate::app::{Action, App};
use crate::notice::Notice;
use crate::view::View;

pub const DEFAULT_STATUS: &str = "Unread";
pub const DEFAULT_GENRE: &str = "Fiction";

/// Shelf - a personal library catalog
///
/// Run a single command, or no command at all to start an interactive
/// session reading one command per line.
#[derive(Parser, Debug)]
#[command(name = "shelf", version, about, long_about)]
pub struct Cli {
    /// Path to configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Library file (overrides config file)
    #[arg(short, long, global = true)]
    pub library: Option<PathBuf>,

    /// Never write to the library file
    #[arg(long, global = true)]
    pub read_only: bool,

    /// Skip fetching the header decoration
    #[arg(long, global = true)]
    pub no_decoration: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}
impl Cli {
    /// Applies command-line overrides on top of loaded configuration.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(library) = &self.library {
            config.library.path = library.clone();
        }
        config.library.read_only |= self.read_only;
        config.decoration.enabled &= !self.no_decoration;
        config
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show every book in the library
    #[command(alias = "ls")]
    List,

    /// Add a book to the library
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        author: String,

        /// Year of publication
        #[arg(short, long, allow_negative_numbers = true)]
        year: i32,

        /// Read or Unread
        #[arg(short, long, default_value = DEFAULT_STATUS)]
        status: String,

        #[arg(short, long, default_value = DEFAULT_GENRE)]
        genre: String,
    },

    /// Remove the book at a position in the library list
    #[command(alias = "rm")]
    Remove { position: usize },

    /// Mark the book at a position as read or unread
    Toggle { position: usize },

    /// Search books by title, author or genre
    Search {
        field: Field,

        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Show reading statistics and charts
    Stats,

    /// Switch to a screen
    View { screen: View },

    /// List the genres a book can have
    Genres,
}
impl Command {
    /// The actions carrying out this command against the app's current
    /// library, or the notice explaining why there are none.
    pub fn into_actions(self, app: &App) -> Result<Vec<Action>, Notice> {
        let book_at = |position: usize| {
            let reference = || format!("position {position}");
            app.id_at_position(position).ok_or_else(|| Notice::UnknownBook { reference: reference() })
        };
        Ok(match self {
            Command::List => vec![Action::Navigate(View::Library)],
            Command::Add { title, author, year, status, genre } => {
                vec![Action::Submit(Draft::new(title, author, year).with_status(status).with_genre(genre))]
            },
            Command::Remove { position } => vec![Action::Remove(book_at(position)?)],
            Command::Toggle { position } => vec![Action::ToggleStatus(book_at(position)?)],
            Command::Search { field, query } => vec![
                Action::Navigate(View::Search),
                Action::Search { field: field.into(), query: query.join(" ") },
            ],
            Command::Stats => vec![Action::Navigate(View::Statistics)],
            Command::View { screen } => vec![Action::Navigate(screen)],
            Command::Genres => Vec::new(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Field {
    Title,
    Author,
    Genre,
}
impl From<Field> for SearchField {
    fn from(field: Field) -> Self {
        match field {
            Field::Title => SearchField::Title,
            Field::Author => SearchField::Author,
            Field::Genre => SearchField::Genre,
        }
    }
}

/// One line typed into the interactive session.
#[derive(Parser, Debug)]
#[command(name = "shelf", no_binary_name = true, disable_version_flag = true)]
pub struct Line {
    #[command(subcommand)]
    pub command: LineCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum LineCommand {
    #[command(flatten)]
    Run(Command),

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn add(title: &str, author: &str) -> LineCommand {
        LineCommand::Run(Command::Add {
            title: title.into(),
            author: author.into(),
            year: 1965,
            status: DEFAULT_STATUS.into(),
            genre: DEFAULT_GENRE.into(),
        })
    }

    #[rstest]
    #[case("  view   stats ", LineCommand::Run(Command::View { screen: View::Statistics }))]
    #[case(
        r#"add --title "The Left Hand of Darkness" --author 'Ursula K. Le Guin' --year 1965"#,
        add("The Left Hand of Darkness", "Ursula K. Le Guin")
    )]
    #[case(r"add --title 'C:\Books\Dune' --author Herbert --year 1965", add(r"C:\Books\Dune", "Herbert"))]
    #[case(r#"add --title "say \"hi\"" --author Herbert --year 1965"#, add(r#"say "hi""#, "Herbert"))]
    #[case(
        r"search title Ender\'s Game",
        LineCommand::Run(Command::Search { field: Field::Title, query: vec!["Ender's".into(), "Game".into()] })
    )]
    fn test_typed_line(#[case] line: &str, #[case] expected: LineCommand) {
        let words = shlex::split(line).unwrap();
        assert_eq!(Line::try_parse_from(words).unwrap().command, expected);
    }

    #[rstest]
    #[case(r#"add --title "Dune"#)]
    #[case("add --title 'Dune")]
    #[case(r"list \")]
    fn test_typed_line_unbalanced(#[case] line: &str) {
        assert_eq!(shlex::split(line), None);
    }

    #[test]
    fn test_add_defaults() {
        let args = ["shelf", "add", "--title", "Dune", "--author", "Frank Herbert", "--year", "1965"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Add {
                title: "Dune".into(),
                author: "Frank Herbert".into(),
                year: 1965,
                status: DEFAULT_STATUS.into(),
                genre: DEFAULT_GENRE.into(),
            })
        );
    }

    #[test]
    fn test_no_command_is_interactive() {
        let cli = Cli::try_parse_from(["shelf", "--read-only"]).unwrap();
        assert!(cli.read_only);
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_global_flags_after_command() {
        let cli = Cli::try_parse_from(["shelf", "stats", "--library", "/tmp/books.json", "--no-decoration"]).unwrap();
        let config = cli.apply(Config::default());
        assert_eq!(config.library.path, PathBuf::from("/tmp/books.json"));
        assert!(!config.decoration.enabled);
        assert!(!config.library.read_only);
    }

    #[rstest]
    #[case(
        &["search", "author", "le", "guin"],
        LineCommand::Run(Command::Search { field: Field::Author, query: vec!["le".into(), "guin".into()] })
    )]
    #[case(&["view", "stats"], LineCommand::Run(Command::View { screen: View::Statistics }))]
    #[case(&["rm", "2"], LineCommand::Run(Command::Remove { position: 2 }))]
    #[case(&["quit"], LineCommand::Quit)]
    #[case(&["exit"], LineCommand::Quit)]
    fn test_line_grammar(#[case] words: &[&str], #[case] expected: LineCommand) {
        assert_eq!(Line::try_parse_from(words).unwrap().command, expected);
    }

    #[rstest]
    #[case(&["remove"])]
    #[case(&["remove", "two"])]
    #[case(&["search", "isbn", "123"])]
    #[case(&["search", "title"])]
    #[case(&["add", "--title", "Dune"])]
    #[case(&["fly"])]
    fn test_line_grammar_rejects(#[case] words: &[&str]) {
        assert!(Line::try_parse_from(words).is_err());
    }
}

//! Render passes and the interactive loop.

use clap::Parser;
use exn::ResultExt;
use shelf_catalog::Genre;
use shelf_render::Renderer;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::app::{Action, App};
use crate::cli::{Command, Line, LineCommand};
use crate::error::{ErrorKind, Result};
use crate::screen::Screen;

const PROMPT: &[u8] = b"> ";

pub struct Session {
    app: App,
    renderer: Renderer,
}
impl Session {
    pub fn new(app: App, renderer: Renderer) -> Self {
        Self { app, renderer }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// One render pass: apply `actions` in order, then draw the current view.
    pub async fn pass(&mut self, actions: Vec<Action>) -> String {
        for action in actions {
            self.app.dispatch(action).await;
        }
        let screen = self.app.render();
        self.draw(&screen)
    }

    fn draw(&self, screen: &Screen) -> String {
        match self.renderer.render(screen.template(), screen) {
            Ok(text) => text,
            Err(e) => {
                // User templates can be broken; still show what happened.
                tracing::error!(error = ?e, template = screen.template(), "Could not render screen");
                let mut text = format!("=== {} ===\n", screen.title);
                for notice in &screen.notices {
                    text.push_str(&notice.text);
                    text.push('\n');
                }
                text.push_str(&format!("({})\n", *e));
                text
            },
        }
    }

    /// Runs one command as one render pass.
    pub async fn run_command(&mut self, command: Command) -> String {
        if command == Command::Genres {
            return Genre::ALL.iter().map(|g| format!("{g}\n")).collect();
        }
        match command.into_actions(&self.app) {
            Ok(actions) => self.pass(actions).await,
            Err(notice) => {
                self.app.notify(notice);
                self.pass(Vec::new()).await
            },
        }
    }

    /// Reads commands line by line until end of input or `quit`.
    ///
    /// The initial load counts as a pass of its own, so the current view is
    /// drawn before the first prompt.
    pub async fn interactive(
        &mut self,
        input: impl AsyncBufRead + Unpin,
        mut output: impl AsyncWrite + Unpin,
    ) -> Result<()> {
        let mut lines = input.lines();
        let initial = self.pass(Vec::new()).await;
        write(&mut output, initial.as_bytes()).await?;
        loop {
            write(&mut output, PROMPT).await?;
            let Some(line) = lines.next_line().await.or_raise(|| ErrorKind::Io)? else {
                write(&mut output, b"\n").await?;
                break;
            };
            let Some(words) = shlex::split(&line) else {
                write(&mut output, b"error: unterminated quote or trailing backslash\n").await?;
                continue;
            };
            if words.is_empty() {
                continue;
            }
            let text = match Line::try_parse_from(words) {
                Ok(Line { command: LineCommand::Quit }) => break,
                Ok(Line { command: LineCommand::Run(command) }) => self.run_command(command).await,
                // Includes `help`, which clap reports as an "error".
                Err(e) => e.render().to_string(),
            };
            write(&mut output, text.as_bytes()).await?;
        }
        Ok(())
    }
}

async fn write(output: &mut (impl AsyncWrite + Unpin), bytes: &[u8]) -> Result<()> {
    output.write_all(bytes).await.or_raise(|| ErrorKind::Io)?;
    output.flush().await.or_raise(|| ErrorKind::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FixedClock;
    use crate::cli::DEFAULT_GENRE;
    use crate::decoration::Decoration;
    use crate::view::View;
    use rstest::rstest;
    use shelf_catalog::{Catalog, DEFAULT_FILE_NAME, Draft, LibraryStore};
    use shelf_render::Templates;
    use shelf_storage::backend::MockBackend;
    use std::sync::Arc;
    use time::{Date, Month};

    fn session() -> Session {
        let store = LibraryStore::new(Arc::new(MockBackend::default()), DEFAULT_FILE_NAME);
        let today = Date::from_calendar_date(2025, Month::March, 14).unwrap();
        let app = App::new(Catalog::empty(store)).with_clock(FixedClock(today));
        Session::new(app, Renderer::builtin().unwrap())
    }

    async fn stocked() -> Session {
        let mut session = session();
        let books = [
            ("Dune", "Frank Herbert", 1965, "Science Fiction", "Read"),
            ("Emma", "Jane Austen", 1815, "Romance", "Unread"),
            ("Persuasion", "Jane Austen", 1817, "Romance", "Unread"),
        ];
        let actions = books
            .into_iter()
            .map(|(t, a, y, g, s)| Action::Submit(Draft::new(t, a, y).with_genre(g).with_status(s)))
            .collect();
        session.pass(actions).await;
        session
    }

    #[rstest]
    #[case(View::Library, "=== Your Library ===")]
    #[case(View::AddBook, "=== Add a Book ===")]
    #[case(View::Search, "=== Search for a Book ===")]
    #[case(View::Statistics, "=== Library Statistics ===")]
    #[tokio::test]
    async fn test_every_screen_renders_when_empty(#[case] view: View, #[case] header: &str) {
        let mut session = session();
        let text = session.pass(vec![Action::Navigate(view)]).await;
        assert!(text.starts_with(header), "{text}");
        assert!(!text.contains("failed to render"), "{text}");
    }

    #[rstest]
    #[case(View::Library, &["1. [x] Dune by Frank Herbert (1965) · Science Fiction", "3 books, 1 read."])]
    #[case(View::AddBook, &["Year", "published between 1000 and 2025", "Science Fiction", "Self-Help"])]
    #[case(View::Statistics, &["Books: 3   Read: 1   Unread: 2", "33%", "Romance", "1810s", "Jane Austen", "2 books"])]
    #[tokio::test]
    async fn test_every_screen_renders_with_books(#[case] view: View, #[case] expected: &[&str]) {
        let mut session = stocked().await;
        let text = session.pass(vec![Action::Navigate(view)]).await;
        for line in expected {
            assert!(text.contains(line), "missing {line:?} in:\n{text}");
        }
    }

    #[tokio::test]
    async fn test_header_shows_decoration_and_notices() {
        let store = LibraryStore::new(Arc::new(MockBackend::default()), DEFAULT_FILE_NAME);
        let app = App::new(Catalog::empty(store))
            .with_decoration(Some(Decoration { name: "Book".to_string(), frames: 1 }));
        let mut session = Session::new(app, Renderer::builtin().unwrap());
        let text = session.run_command(Command::Remove { position: 3 }).await;
        assert!(text.starts_with("~ Book · 1 frame ~\n=== Your Library ==="), "{text}");
        assert!(text.contains("!! No book at position 3"), "{text}");
    }

    #[tokio::test]
    async fn test_search_command() {
        let mut session = stocked().await;
        let query = vec!["austen".to_string()];
        let text = session.run_command(Command::Search { field: crate::cli::Field::Author, query }).await;
        assert!(text.contains("2 results for author containing \"austen\""), "{text}");
        assert!(text.contains("3. Persuasion by Jane Austen (1817) · Romance · Unread"), "{text}");

        let query = vec!["Tolkien".to_string()];
        let text = session.run_command(Command::Search { field: crate::cli::Field::Author, query }).await;
        assert!(text.contains("No results found"), "{text}");
    }

    #[tokio::test]
    async fn test_genres_command() {
        let text = session().run_command(Command::Genres).await;
        assert_eq!(text.lines().count(), Genre::ALL.len());
        assert!(text.lines().any(|l| l == DEFAULT_GENRE));
    }

    #[tokio::test]
    async fn test_broken_user_template_still_shows_notices() {
        let templates = Templates::builtins().unwrap().with_content("library", "{{ page.missing }}");
        let store = LibraryStore::new(Arc::new(MockBackend::default()), DEFAULT_FILE_NAME);
        let mut session = Session::new(App::new(Catalog::empty(store)), Renderer::new(templates).unwrap());
        let text = session.run_command(Command::Toggle { position: 1 }).await;
        assert!(text.starts_with("=== Your Library ==="), "{text}");
        assert!(text.contains("No book at position 1"), "{text}");
    }

    #[tokio::test]
    async fn test_interactive_session() {
        let mut session = session();
        let input = "list\n\nadd --title Dune --author 'Frank Herbert' --year 1965\nview \"stats\nhelp\nquit\nlist\n";
        let mut output = Vec::new();
        session.interactive(input.as_bytes(), &mut output).await.unwrap();
        let output = String::from_utf8(output).unwrap();

        // Initial pass, `list` and `add`; nothing after `quit`.
        assert_eq!(output.matches("=== Your Library ===").count(), 3, "{output}");
        assert!(output.contains("Book added successfully: Dune"));
        assert!(output.contains("error: unterminated quote"));
        assert!(output.contains("Usage"));
        assert_eq!(session.app().catalog().len(), 1);
    }

    #[tokio::test]
    async fn test_interactive_keeps_backslashes_in_single_quotes() {
        let mut session = session();
        let input = "add --title 'C:\\Books\\Dune' --author \"Frank Herbert\" --year 1965\nlist \\\nquit\n";
        let mut output = Vec::new();
        session.interactive(input.as_bytes(), &mut output).await.unwrap();
        let output = String::from_utf8(output).unwrap();

        let books = session.app().catalog().books();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, r"C:\Books\Dune");
        assert_eq!(books[0].author, "Frank Herbert");
        assert!(output.contains("error: unterminated quote or trailing backslash"), "{output}");
    }

    #[tokio::test]
    async fn test_interactive_ends_at_eof() {
        let mut session = session();
        let mut output = Vec::new();
        session.interactive("stats\n".as_bytes(), &mut output).await.unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("=== Library Statistics ==="));
        assert!(output.ends_with("> \n"));
    }
}

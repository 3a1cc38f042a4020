//! Template source management.
//!
//! Templates are assembled through [`Templates`]' builder API, combining
//! compile-time embedded builtins (see [`Templates::builtins`]) with
//! user-provided files. All sources are read eagerly at construction time so
//! that missing files fail fast rather than at render time.

use crate::assets::{Builtins, EXTENSION};
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;

/// A named set of template sources, ready to be compiled by a
/// [`Renderer`](crate::Renderer).
///
/// Adding a template under a name that already exists replaces it, so user
/// directories added after the builtins override them one file at a time.
///
/// # Example
///
/// ```no_run
/// use shelf_render::Templates;
/// # use shelf_render::error::Result;
///
/// # fn get_templates() -> Result<Templates> {
/// let templates = Templates::builtins()?
///     .with_dir("/home/reader/.config/shelf/templates")?
///     .with_content("footer", "-- {{ total }} books --");
/// # Ok(templates)
/// # }
/// ```
#[derive(Debug, Default, Clone)]
pub struct Templates {
    sources: BTreeMap<String, Cow<'static, str>>,
}
impl Templates {
    /// Creates an empty set with no templates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every embedded builtin template.
    pub fn builtins() -> Result<Self> {
        Builtins::list().into_iter().try_fold(Self::new(), |templates, name| templates.with_builtin(name))
    }

    /// Adds a builtin template by name.
    ///
    /// Returns [`ErrorKind::TemplateNotFound`] if `name` does not match any
    /// embedded asset.
    pub fn with_builtin(mut self, name: impl AsRef<str>) -> Result<Self> {
        let name = template_name(name.as_ref());
        let source = Builtins::load(name)?;
        self.sources.insert(name.to_string(), source);
        Ok(self)
    }

    /// Adds every `*.txt` file in `dir`, named after the file without its
    /// extension. Other files are ignored.
    pub fn with_dir(mut self, dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            exn::bail!(ErrorKind::TemplateNotFound(dir.display().to_string()));
        }
        for entry in std::fs::read_dir(dir).or_raise(|| ErrorKind::Io)? {
            let path = entry.or_raise(|| ErrorKind::Io)?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()).and_then(|n| n.strip_suffix(EXTENSION)) else {
                continue;
            };
            if !path.is_file() {
                continue;
            }
            let name = name.to_string();
            let source = std::fs::read_to_string(&path).or_raise(|| ErrorKind::Io)?;
            tracing::debug!(template = name, path = %path.display(), "Loaded user template");
            self.sources.insert(name, Cow::Owned(source));
        }
        Ok(self)
    }

    /// Adds a template from raw source. This is infallible since no I/O is
    /// involved; syntax is checked when the renderer is built.
    pub fn with_content(mut self, name: impl AsRef<str>, source: impl Into<String>) -> Self {
        self.sources.insert(template_name(name.as_ref()).to_string(), Cow::Owned(source.into()));
        self
    }

    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.sources.contains_key(template_name(name.as_ref()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub(crate) fn into_sources(self) -> impl Iterator<Item = (String, Cow<'static, str>)> {
        self.sources.into_iter()
    }
}

fn template_name(name: &str) -> &str {
    let name = name.trim();
    name.strip_suffix(EXTENSION).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_builtins_cover_every_screen() {
        let templates = Templates::builtins().unwrap();
        for name in ["library", "add_book", "search", "statistics", "notices", "header"] {
            assert!(templates.contains(name), "missing {name}");
        }
    }

    #[test]
    fn test_unknown_builtin() {
        let err = Templates::new().with_builtin("chapter").unwrap_err();
        assert!(matches!(&*err, ErrorKind::TemplateNotFound(_)));
    }

    #[test]
    fn test_dir_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("header.txt"), "custom header").unwrap();
        fs::write(dir.path().join("extra.txt"), "extra").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let templates = Templates::builtins().unwrap().with_dir(dir.path()).unwrap();
        assert_eq!(templates.sources["header"], "custom header");
        assert!(templates.contains("extra.txt"));
        assert!(!templates.contains("notes"));
        assert!(templates.contains("library"));
    }

    #[test]
    fn test_missing_dir_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let err = Templates::new().with_dir(dir.path().join("missing")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::TemplateNotFound(_)));
    }

    #[test]
    fn test_content_replaces_by_name() {
        let templates = Templates::new().with_content("a.txt", "one").with_content("a", "two");
        assert_eq!(templates.names().collect::<Vec<_>>(), ["a"]);
        assert_eq!(templates.sources["a"], "two");
    }
}

//! Templates embedded into the binary at compile time using
//! [`rust-embed`](rust_embed).

use crate::error::{ErrorKind, Result};
use exn::OptionExt;
use rust_embed::Embed;
use std::borrow::Cow;

pub(crate) const EXTENSION: &str = ".txt";

#[derive(Embed)]
#[folder = "../../assets/templates/"]
pub struct Builtins;
impl Builtins {
    /// Get the source of a builtin template by name (`"library"` or `"library.txt"`).
    pub fn load(name: impl AsRef<str>) -> Result<Cow<'static, str>> {
        let file = Self::file_name(name.as_ref());
        let data = Self::get(&file)
            .map(|f| f.data)
            .ok_or_raise(|| ErrorKind::TemplateNotFound(Self::identifier(&file)))?;
        let source = match data {
            Cow::Borrowed(bytes) => std::str::from_utf8(bytes).map(Cow::Borrowed).ok(),
            Cow::Owned(bytes) => String::from_utf8(bytes).map(Cow::Owned).ok(),
        };
        source.ok_or_raise(|| ErrorKind::Encoding(Self::identifier(&file)))
    }

    /// List all builtin template names, without extension.
    pub fn list() -> Vec<String> {
        Self::iter().filter_map(|f| f.strip_suffix(EXTENSION).map(str::to_string)).collect()
    }

    fn file_name(name: &str) -> String {
        let name = name.trim().trim_start_matches("builtin:");
        if name.ends_with(EXTENSION) { name.to_string() } else { format!("{name}{EXTENSION}") }
    }

    pub(crate) fn identifier(name: impl AsRef<str>) -> String {
        format!("builtin:{}", name.as_ref().trim().trim_start_matches("builtin:"))
    }
}

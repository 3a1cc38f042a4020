//! Shelf: a personal library catalog for the terminal.
//!
//! # Architecture
//! - [`App`]: the view controller. Owns the [`Catalog`](shelf_catalog::Catalog),
//!   the current [`View`] and the queue of one-shot [`Notice`]s.
//! - [`screen`]: serializable models of each view, rendered to text by
//!   [`shelf_render`].
//! - [`Session`]: render passes, for a single command or an interactive
//!   loop over stdin.
//! - [`decoration`]: optional header art fetched once per session.

pub mod app;
pub mod cli;
pub mod decoration;
pub mod error;
pub mod notice;
pub mod screen;
pub mod session;
pub mod view;

pub use crate::app::{Action, App, Clock, FixedClock, SystemClock};
pub use crate::notice::Notice;
pub use crate::session::Session;
pub use crate::view::View;

use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use shelf_catalog::LibraryStore;
use shelf_config::{LibraryConfig, RenderConfig};
use shelf_render::{Renderer, Templates};
use shelf_storage::backend::{LocalBackend, ReadOnlyBackend};
use shelf_storage::BackendHandle;
use std::sync::Arc;

/// The store for the configured library file.
///
/// The file's directory becomes the backend root, created if missing.
/// Read-only mode wraps the backend so that every save is refused.
pub fn library_store(config: &LibraryConfig) -> Result<LibraryStore> {
    let path = std::path::absolute(&config.path).or_raise(|| ErrorKind::Storage)?;
    let file = path.file_name().ok_or_raise(|| ErrorKind::Storage)?.to_owned();
    let root = path.parent().ok_or_raise(|| ErrorKind::Storage)?;
    let local: BackendHandle = Arc::new(LocalBackend::new("local", root).or_raise(|| ErrorKind::Storage)?);
    let backend: BackendHandle = if config.read_only { Arc::new(ReadOnlyBackend::new(local)) } else { local };
    tracing::debug!(root = %root.display(), read_only = config.read_only, "Library storage ready");
    Ok(LibraryStore::new(backend, file))
}

/// Builtin templates, overridden by the configured template directory.
pub fn renderer(config: &RenderConfig) -> Result<Renderer> {
    let mut templates = Templates::builtins().or_raise(|| ErrorKind::Templates)?;
    if let Some(dir) = &config.templates_dir {
        templates = templates.with_dir(dir).or_raise(|| ErrorKind::Templates)?;
    }
    Renderer::new(templates).or_raise(|| ErrorKind::Templates)
}

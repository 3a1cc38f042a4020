//! Persisted-file storage for the library catalog.
//!
//! The catalog keeps its whole state in a single file, so backends only need
//! whole-file reads and overwrites. Every path handed to a backend is relative
//! to the backend's root and validated with [`validate_path`].

pub mod backend;
pub mod error;
mod path;

pub use crate::backend::StorageBackend;
pub use crate::path::validate as validate_path;
use std::sync::Arc;

pub type BackendHandle = Arc<dyn StorageBackend + Send + Sync>;

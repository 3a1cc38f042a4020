//! Storage backend trait and implementations.
//!
//! The [`StorageBackend`] trait is the seam between the catalog and wherever
//! its file physically lives. [`LocalBackend`] is the real thing,
//! [`ReadOnlyBackend`] decorates another backend for browse-only sessions and
//! `MockBackend` (feature `mock`) keeps everything in memory for tests.

mod local;
#[cfg(feature = "mock")]
mod mock;
mod ro;

pub use self::local::LocalBackend;
#[cfg(feature = "mock")]
pub use self::mock::MockBackend;
pub use self::ro::ReadOnlyBackend;
use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Unified interface for storage backends.
///
/// Whole-file operations only: the catalog never appends or seeks, it reads
/// the entire library file at startup and overwrites it after every change.
///
/// # Path Handling
/// All paths are relative to the storage root and must be validated using
/// [`validate_path`](crate::validate_path) before use. Implementations should
/// enforce this validation.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use shelf_storage::{backend::StorageBackend, error::Result};
///
/// async fn library_or_empty(backend: &dyn StorageBackend) -> Result<Vec<u8>> {
///     let path = Path::new("library.json");
///     if backend.exists(path).await? {
///         backend.read(path).await
///     } else {
///         Ok(b"[]".to_vec())
///     }
/// }
/// ```
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Name of the configured backend, used for logging only.
    fn name(&self) -> &str;

    /// Check whether a file exists at the given path.
    async fn exists(&self, path: &Path) -> Result<bool>;

    /// Read the entire contents of a file.
    async fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Replace the entire contents of a file, creating it (and any parent
    /// directories) if needed.
    async fn write(&self, path: &Path, data: &[u8]) -> Result<()>;
}

//! Local filesystem storage backend.
//!
//! Files live underneath a configured directory and are accessed with
//! `tokio::fs`. Writes go to a hidden sibling file first and are renamed
//! into place, so an interrupted write leaves the previous file intact.

use crate::error::{ErrorKind, Result};
use crate::{StorageBackend, path::validate as validate_path};
use async_trait::async_trait;
use std::fs::create_dir_all as sync_create_dir;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Local filesystem storage backend.
///
/// # Examples
///
/// ```no_run
/// use shelf_storage::backend::LocalBackend;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = LocalBackend::new("home", "/home/reader/.local/share/shelf")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LocalBackend {
    name: String,
    /// Directory holding the library file
    root: PathBuf,
}
impl LocalBackend {
    /// Create a new local filesystem backend rooted at an absolute directory.
    ///
    /// The directory is created if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidPath`] if the path is relative or points at
    /// something other than a directory.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        if root.exists() {
            if !root.is_dir() {
                exn::bail!(ErrorKind::InvalidPath(root));
            }
        } else {
            // Only happens once per session, not worth an async constructor.
            sync_create_dir(&root).map_err(|e| Self::map_io_error(e, &root))?;
            tracing::debug!(root = %root.display(), "Created library directory");
        }
        Ok(Self { name: name.into(), root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validates the relative path and joins it with the root directory.
    fn absolute_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let validated = validate_path(path.as_ref())?;
        Ok(self.root.join(validated))
    }

    /// Hidden sibling used as the staging file for atomic replacement.
    fn staging_path(target: &Path) -> Result<PathBuf> {
        let Some(file_name) = target.file_name() else {
            exn::bail!(ErrorKind::InvalidPath(target.to_path_buf()));
        };
        let mut staging = std::ffi::OsString::from(".");
        staging.push(file_name);
        staging.push(".tmp");
        Ok(target.with_file_name(staging))
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }
}

#[async_trait]
impl StorageBackend for LocalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        let abs_path = self.absolute_path(path)?;
        Ok(fs::try_exists(&abs_path).await.map_err(ErrorKind::Io)?)
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let abs_path = self.absolute_path(path)?;
        Ok(fs::read(&abs_path).await.map_err(|e| Self::map_io_error(e, path))?)
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let abs_path = self.absolute_path(path)?;
        if let Some(parent) = abs_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| Self::map_io_error(e, path))?;
        }
        let staging = Self::staging_path(&abs_path)?;
        fs::write(&staging, data).await.map_err(|e| Self::map_io_error(e, path))?;
        if let Err(e) = fs::rename(&staging, &abs_path).await {
            // Don't leave the staging file lying around next to the library.
            _ = fs::remove_file(&staging).await;
            exn::bail!(Self::map_io_error(e, path));
        }
        tracing::trace!(backend = %self.name, path = %path.display(), bytes = data.len(), "File replaced");
        Ok(())
    }
}

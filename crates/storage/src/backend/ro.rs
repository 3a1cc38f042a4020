//! Read-only storage backend.
//!
//! Wraps another backend and refuses every modification. Unlike a silent
//! no-op, refusals surface as [`ErrorKind::ReadOnly`] so the catalog reports
//! that changes were not saved while keeping them in memory.

use async_trait::async_trait;
use std::path::Path;

use crate::error::{ErrorKind, Result};
use crate::{BackendHandle, StorageBackend};

/// Read-only storage backend.
#[derive(Clone)]
pub struct ReadOnlyBackend {
    inner: BackendHandle,
}
impl ReadOnlyBackend {
    pub fn new(inner: BackendHandle) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StorageBackend for ReadOnlyBackend {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        self.inner.exists(path).await
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.inner.read(path).await
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        tracing::info!(path = %path.display(), bytes = data.len(), "Refusing write during read-only mode");
        exn::bail!(ErrorKind::ReadOnly(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LocalBackend;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_reads_pass_through_writes_refused() {
        let temp_dir = tempfile::tempdir().unwrap();
        let local = LocalBackend::new("home", temp_dir.path()).unwrap();
        local.write(Path::new("library.json"), b"[]").await.unwrap();

        let backend = ReadOnlyBackend::new(Arc::new(local));
        assert_eq!(backend.name(), "home");
        assert!(backend.exists(Path::new("library.json")).await.unwrap());
        assert_eq!(backend.read(Path::new("library.json")).await.unwrap(), b"[]");

        let err = backend.write(Path::new("library.json"), b"[{}]").await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::ReadOnly(_)));
        // Original content untouched.
        assert_eq!(backend.read(Path::new("library.json")).await.unwrap(), b"[]");
    }
}

//! Library file paths.
//!
//! A library is a single file kept directly in, or somewhere below, the
//! directory a backend was opened on. Paths handed to a backend are plain
//! descending relative paths: they never climb, never start at a filesystem
//! root, and never name one of the backend's own staging files.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Checks a library file path and returns it in canonical relative form.
///
/// Only `.` components and doubled separators are tidied away. Anything
/// else that is not a normal name (`..`, a leading `/`, a drive prefix) is
/// refused outright instead of being resolved. The final name must not be a
/// staging file (`.<name>.tmp`), and no segment may contain a NUL byte.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use shelf_storage::validate_path;
///
/// assert!(validate_path("library.json").is_ok());
/// assert!(validate_path("backups/2024/library.json").is_ok());
/// assert!(validate_path("../library.json").is_err());
/// assert!(validate_path("/library.json").is_err());
/// assert!(validate_path(".library.json.tmp").is_err());
/// assert_eq!(validate_path("./current//library.json").unwrap(), Path::new("current/library.json"));
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let original = path.as_ref();
    let mut canonical = PathBuf::new();
    for component in original.components() {
        let segment = match component {
            Component::CurDir => continue,
            Component::Normal(segment) => segment,
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                exn::bail!(ErrorKind::InvalidPath(original.to_path_buf()))
            },
        };
        // NUL survives Path::components() on Unix but truncates in syscalls.
        if segment.as_encoded_bytes().contains(&0) {
            exn::bail!(ErrorKind::InvalidPath(original.to_path_buf()));
        }
        canonical.push(segment);
    }
    match canonical.file_name() {
        Some(name) if !is_staging_name(name) => Ok(canonical),
        _ => exn::bail!(ErrorKind::InvalidPath(original.to_path_buf())),
    }
}

fn is_staging_name(name: &OsStr) -> bool {
    let bytes = name.as_encoded_bytes();
    bytes.len() > ".tmp".len() + 1 && bytes.starts_with(b".") && bytes.ends_with(b".tmp")
}

//! Single-file removal.
//!
//! # Overview
//!
//! [`remove_file`] removes one duplicate, either by unlinking it
//! ([`RemovalMethod::Permanent`], the default) or by moving it to the
//! system trash ([`RemovalMethod::Trash`]). The target is stat'ed first so
//! a file that vanished since planning fails with [`RemovalError::NotFound`]
//! instead of an opaque platform error.
//!
//! # Example
//!
//! ```no_run
//! use dedupe::actions::delete::{remove_file, RemovalMethod};
//! use std::path::Path;
//!
//! match remove_file(Path::new("/path/to/duplicate.txt"), RemovalMethod::Permanent) {
//!     Ok(()) => println!("Removed"),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// How a duplicate is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalMethod {
    /// Unlink the file. Cannot be undone.
    #[default]
    Permanent,
    /// Move the file to the system trash.
    Trash,
}

/// Error type for removal operations.
#[derive(Debug, Error)]
pub enum RemovalError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to remove.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The path no longer refers to a regular file.
    #[error("not a regular file: {0}")]
    NotAFile(PathBuf),

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed { path: PathBuf, message: String },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RemovalError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::NotAFile(p)
            | Self::TrashFailed { path: p, .. }
            | Self::Io { path: p, .. } => p,
        }
    }

    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Remove a single file.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if removal is not allowed
/// - `NotAFile` if the path is a directory or other non-file
/// - `TrashFailed` if the trash operation fails
pub fn remove_file(path: &Path, method: RemovalMethod) -> Result<(), RemovalError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| RemovalError::from_io(path, e))?;
    if !metadata.is_file() {
        return Err(RemovalError::NotAFile(path.to_path_buf()));
    }

    match method {
        RemovalMethod::Permanent => {
            fs::remove_file(path).map_err(|e| RemovalError::from_io(path, e))?;
            log::info!("Deleted: {} ({} bytes)", path.display(), metadata.len());
        }
        RemovalMethod::Trash => {
            trash::delete(path).map_err(|e| RemovalError::TrashFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            log::info!("Moved to trash: {} ({} bytes)", path.display(), metadata.len());
        }
    }

    Ok(())
}

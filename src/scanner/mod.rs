//! Scanner module for directory traversal and identity key extraction.
//!
//! This module provides functionality for:
//! - Sorted, depth-first directory walking using walkdir
//! - Identity keys from SHA-256 content digests or file names
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and candidate discovery
//! - [`key`]: Identity key strategies (content hash, base name)
//!
//! # Example
//!
//! ```no_run
//! use dedupe::scanner::{KeyStrategy, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default().with_recursive(true));
//! for candidate in walker.candidates() {
//!     match KeyStrategy::Hash.compute_key(&candidate) {
//!         Ok(key) => println!("{}  {}", key, candidate.path.display()),
//!         Err(e) => eprintln!("Skipping: {}", e),
//!     }
//! }
//! ```

pub mod key;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use key::{
    hash_file, ContentHashKey, IdentityKey, KeyExtractor, KeyStrategy, NameKey, HASH_BUFFER_SIZE,
};
pub use walker::Walker;

/// A file discovered by the walker.
///
/// Candidates are ephemeral: they live for one pass and are never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    /// Path to the file, as produced by the walk (root-joined)
    pub path: PathBuf,
    /// Whether the entry is a directory. The walker only yields regular
    /// files, so this is `false` for everything it emits.
    pub is_directory: bool,
}

impl FileCandidate {
    /// Create a candidate for a regular file.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            is_directory: false,
        }
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Descend into subdirectories. When `false`, only direct children of
    /// the root are visited.
    pub recursive: bool,
}

impl WalkerConfig {
    /// Enable or disable recursive descent.
    #[must_use]
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error for the given path.
    pub(crate) fn from_io(path: PathBuf, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            _ => Self::Io {
                path,
                source: error,
            },
        }
    }
}

/// Errors that can occur while computing an identity key.
#[derive(thiserror::Error, Debug)]
pub enum KeyError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The path has no final component to use as a name key.
    #[error("No file name: {0}")]
    NoFileName(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl KeyError {
    pub(crate) fn from_io(path: PathBuf, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            _ => Self::Io {
                path,
                source: error,
            },
        }
    }
}

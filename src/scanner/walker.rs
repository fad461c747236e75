//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and yielding the regular files found in it as [`FileCandidate`]s.
//!
//! # Ordering
//!
//! The walk is depth-first and every directory listing is sorted by file
//! name, so repeated walks over an unchanged tree yield candidates in the
//! same order. The duplicate planner relies on this order to pick the file
//! it keeps.
//!
//! # Features
//!
//! - Flat (direct children only) or recursive traversal
//! - Symbolic links are neither followed nor yielded
//! - Unreadable entries are reported as [`ScanError`] values and never
//!   stop the walk
//! - Graceful shutdown via atomic flag
//!
//! # Example
//!
//! ```no_run
//! use dedupe::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}", file.path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::WalkDir;

use super::{FileCandidate, ScanError, WalkerConfig};

/// Directory walker for deterministic file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
    /// Optional shutdown flag for graceful termination
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dedupe::scanner::{Walker, WalkerConfig};
    /// use std::path::Path;
    ///
    /// let walker = Walker::new(Path::new("."), WalkerConfig::default());
    /// ```
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// When the flag is set to `true`, the walker stops yielding entries.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Root path of this walk.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Walk the directory tree, yielding file candidates.
    ///
    /// Returns a lazy iterator over [`FileCandidate`] results. Entries that
    /// cannot be read are yielded as [`ScanError`] values rather than
    /// stopping iteration. Directories are never yielded.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dedupe::scanner::{Walker, WalkerConfig};
    /// use std::path::Path;
    ///
    /// let walker = Walker::new(Path::new("."), WalkerConfig::default());
    /// let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
    /// println!("Found {} files", files.len());
    /// ```
    pub fn walk(&self) -> impl Iterator<Item = Result<FileCandidate, ScanError>> + '_ {
        let max_depth = if self.config.recursive { usize::MAX } else { 1 };

        let walk_dir = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(false)
            .sort_by_file_name();

        walk_dir
            .into_iter()
            .take_while(move |_| {
                if self.is_shutdown_requested() {
                    log::debug!("Walker: Shutdown requested, stopping iteration");
                    false
                } else {
                    true
                }
            })
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    let file_type = entry.file_type();

                    if file_type.is_dir() {
                        return None;
                    }

                    if file_type.is_symlink() {
                        log::trace!("Skipping symlink: {}", entry.path().display());
                        return None;
                    }

                    if !file_type.is_file() {
                        log::trace!("Skipping special file: {}", entry.path().display());
                        return None;
                    }

                    Some(Ok(FileCandidate::new(entry.into_path())))
                }
                Err(e) => Some(Err(self.handle_walkdir_error(e))),
            })
    }

    /// Walk the tree, silently dropping entries that could not be read.
    ///
    /// Each dropped entry is logged at debug level.
    pub fn candidates(&self) -> impl Iterator<Item = FileCandidate> + '_ {
        self.walk().filter_map(|result| match result {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                log::debug!("Skipping entry: {}", e);
                None
            }
        })
    }

    fn handle_walkdir_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        if error.loop_ancestor().is_some() {
            return ScanError::Io {
                path,
                source: std::io::Error::other(error.to_string()),
            };
        }

        match error.into_io_error() {
            Some(io_error) => ScanError::from_io(path, io_error),
            None => ScanError::Io {
                path,
                source: std::io::Error::other("walk error"),
            },
        }
    }
}

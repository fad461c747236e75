//! Duplicate finder: the walk → key → group → plan pipeline.
//!
//! # Overview
//!
//! [`DuplicateFinder::find`] runs the read-only half of a dedupe pass:
//! 1. **Walk** - enumerate regular files under the root, in sorted
//!    depth-first order
//! 2. **Key** - compute identity keys on a bounded rayon pool
//! 3. **Group** - collect keys shared by two or more files
//! 4. **Plan** - keep the earliest-discovered member of each group
//!
//! Unreadable entries are skipped and counted; only a missing or
//! unreadable root aborts the pass.
//!
//! # Example
//!
//! ```no_run
//! use dedupe::duplicates::{DedupeConfig, DuplicateFinder};
//! use dedupe::scanner::KeyStrategy;
//!
//! let config = DedupeConfig::new("./downloads")
//!     .with_key_strategy(KeyStrategy::Hash)
//!     .with_recursive(true);
//! let (groups, summary) = DuplicateFinder::new(config).find().unwrap();
//!
//! println!("{} groups, {} skipped", groups.len(), summary.skipped);
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::{plan, DuplicateGroup, DuplicateGrouper};
use crate::actions::RemovalMethod;
use crate::progress::{ProgressCallback, PHASE_HASHING, PHASE_WALKING};
use crate::report::ExecutionMode;
use crate::scanner::{FileCandidate, IdentityKey, KeyError, KeyStrategy, Walker, WalkerConfig};

/// Default number of hashing threads.
pub const DEFAULT_IO_THREADS: usize = 4;

/// Validated configuration for one dedupe pass.
#[derive(Clone)]
pub struct DedupeConfig {
    /// Root directory to scan
    pub root_path: PathBuf,
    /// How identity keys are computed
    pub key_strategy: KeyStrategy,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Preview or apply
    pub mode: ExecutionMode,
    /// Number of I/O threads for parallel hashing
    pub io_threads: usize,
    /// How files are removed in apply mode
    pub removal_method: RemovalMethod,
    /// Optional shutdown flag for graceful termination
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for DedupeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DedupeConfig")
            .field("root_path", &self.root_path)
            .field("key_strategy", &self.key_strategy)
            .field("recursive", &self.recursive)
            .field("mode", &self.mode)
            .field("io_threads", &self.io_threads)
            .field("removal_method", &self.removal_method)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl DedupeConfig {
    /// Create a preview configuration for `root_path` with default settings.
    #[must_use]
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
            key_strategy: KeyStrategy::default(),
            recursive: false,
            mode: ExecutionMode::Preview,
            io_threads: DEFAULT_IO_THREADS,
            removal_method: RemovalMethod::default(),
            shutdown_flag: None,
            progress_callback: None,
        }
    }

    /// Set the key strategy.
    #[must_use]
    pub fn with_key_strategy(mut self, strategy: KeyStrategy) -> Self {
        self.key_strategy = strategy;
        self
    }

    /// Enable or disable recursive descent.
    #[must_use]
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set the execution mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the number of hashing threads (at least 1).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set the removal method used in apply mode.
    #[must_use]
    pub fn with_removal_method(mut self, method: RemovalMethod) -> Self {
        self.removal_method = method;
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Summary statistics from the read-only phases.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Regular files yielded by the walk
    pub total_files: usize,
    /// Files whose identity key was computed
    pub keyed_files: usize,
    /// Entries dropped because they could not be read (walk or key phase)
    pub skipped: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Number of removable members across all groups
    pub duplicate_files: usize,
    /// Duration of the walk phase
    pub walk_duration: Duration,
    /// Duration of the key phase
    pub key_duration: Duration,
    /// Duration of the whole scan
    pub scan_duration: Duration,
}

/// Errors that abort a dedupe pass.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The pass was interrupted by user (Ctrl+C or shutdown signal).
    #[error("Scan interrupted by user")]
    Interrupted,

    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The root could not be read.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The hashing thread pool could not be created.
    #[error("Failed to build hashing thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Orchestrates walk, key extraction, grouping and planning.
#[derive(Debug)]
pub struct DuplicateFinder {
    config: DedupeConfig,
}

impl DuplicateFinder {
    /// Create a new finder with the given configuration.
    #[must_use]
    pub fn new(config: DedupeConfig) -> Self {
        Self { config }
    }

    /// Find duplicate groups under the configured root.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if:
    /// - The root does not exist, is not a directory or cannot be listed
    /// - The pass is interrupted by the shutdown flag
    /// - The hashing pool cannot be created
    pub fn find(&self) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start_time = Instant::now();
        let mut summary = ScanSummary::default();
        let root = self.config.root_path.as_path();

        validate_root(root)?;

        // Walk
        let walk_start = Instant::now();
        let candidates = self.collect_candidates(&mut summary);
        summary.walk_duration = walk_start.elapsed();

        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        log::info!(
            "Walk: {} files under {} ({} skipped)",
            candidates.len(),
            root.display(),
            summary.skipped
        );

        // Key
        let key_start = Instant::now();
        let keyed = self.compute_keys(candidates)?;
        summary.key_duration = key_start.elapsed();

        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        // Group
        let mut grouper = DuplicateGrouper::new();
        for (ordinal, path, key) in keyed {
            match key {
                Ok(key) => grouper.push(ordinal, key, path),
                Err(e) => {
                    log::debug!("Skipping {}: {}", path.display(), e);
                    summary.skipped += 1;
                }
            }
        }
        summary.keyed_files = grouper.len();
        let (groups, _stats) = grouper.finish();

        // Plan
        let groups = plan(groups);

        summary.duplicate_groups = groups.len();
        summary.duplicate_files = groups.iter().map(DuplicateGroup::duplicate_count).sum();
        summary.scan_duration = start_time.elapsed();

        log::info!(
            "Scan complete: {} duplicate groups, {} removable files in {:?}",
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.scan_duration
        );

        Ok((groups, summary))
    }

    fn collect_candidates(&self, summary: &mut ScanSummary) -> Vec<FileCandidate> {
        let mut walker = Walker::new(
            &self.config.root_path,
            WalkerConfig::default().with_recursive(self.config.recursive),
        );
        if let Some(ref flag) = self.config.shutdown_flag {
            walker = walker.with_shutdown_flag(Arc::clone(flag));
        }

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start(PHASE_WALKING, 0);
        }

        let mut candidates = Vec::new();
        for entry in walker.walk() {
            match entry {
                Ok(candidate) => {
                    if let Some(ref callback) = self.config.progress_callback {
                        callback.on_progress(
                            candidates.len() + 1,
                            candidate.path.to_string_lossy().as_ref(),
                        );
                    }
                    candidates.push(candidate);
                }
                Err(e) => {
                    log::debug!("Skipping entry: {}", e);
                    summary.skipped += 1;
                }
            }
        }

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end(PHASE_WALKING);
        }

        summary.total_files = candidates.len();
        candidates
    }

    /// Compute keys in parallel; the result keeps walk order.
    fn compute_keys(
        &self,
        candidates: Vec<FileCandidate>,
    ) -> Result<Vec<(usize, PathBuf, Result<IdentityKey, KeyError>)>, FinderError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let strategy = self.config.key_strategy;
        let total = candidates.len();

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start(PHASE_HASHING, total);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.io_threads.max(1))
            .build()?;

        let results: Vec<Option<(usize, PathBuf, Result<IdentityKey, KeyError>)>> =
            pool.install(|| {
                candidates
                    .into_par_iter()
                    .enumerate()
                    .map(|(ordinal, candidate)| {
                        if self.config.is_shutdown_requested() {
                            return None;
                        }

                        let key = strategy.compute_key(&candidate);
                        if let Ok(ref key) = key {
                            log::trace!("{} {}", key, candidate.path.display());
                        }

                        if let Some(ref callback) = self.config.progress_callback {
                            callback.on_progress(
                                ordinal + 1,
                                candidate.path.to_string_lossy().as_ref(),
                            );
                        }

                        Some((ordinal, candidate.path, key))
                    })
                    .collect()
            });

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end(PHASE_HASHING);
        }

        Ok(results.into_iter().flatten().collect())
    }
}

/// Check that the root exists, is a directory and can be listed.
fn validate_root(root: &Path) -> Result<(), FinderError> {
    let metadata = fs::metadata(root).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => FinderError::PathNotFound(root.to_path_buf()),
        _ => FinderError::Io {
            path: root.to_path_buf(),
            source: e,
        },
    })?;

    if !metadata.is_dir() {
        return Err(FinderError::NotADirectory(root.to_path_buf()));
    }

    fs::read_dir(root).map_err(|e| FinderError::Io {
        path: root.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

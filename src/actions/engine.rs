//! Execution engine: turns a plan into a [`DedupeReport`].
//!
//! In [`ExecutionMode::Preview`] nothing on disk changes and the report
//! carries no removal outcomes. In [`ExecutionMode::Apply`] every removable
//! member is removed in group order, then member order. Each attempt is
//! independent: a failure is recorded and the batch moves on. Completed
//! removals are never rolled back.
//!
//! A set shutdown flag stops the batch before the next removal starts; the
//! report is marked `interrupted`.
//!
//! # Example
//!
//! ```no_run
//! use dedupe::actions::ExecutionEngine;
//! use dedupe::duplicates::{DedupeConfig, DuplicateFinder};
//! use dedupe::report::ExecutionMode;
//! use dedupe::scanner::KeyStrategy;
//! use std::path::Path;
//!
//! let (groups, _) = DuplicateFinder::new(DedupeConfig::new(".")).find().unwrap();
//! let report = ExecutionEngine::new(ExecutionMode::Preview)
//!     .execute(Path::new("."), KeyStrategy::Hash, groups);
//! println!("{}", report.summary());
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::delete::{remove_file, RemovalMethod};
use crate::duplicates::{removal_queue, DuplicateGroup};
use crate::progress::{ProgressCallback, PHASE_REMOVING};
use crate::report::{DedupeReport, ExecutionMode, RemovalOutcome};
use crate::scanner::KeyStrategy;

/// Applies (or previews) a removal plan.
#[derive(Clone, Default)]
pub struct ExecutionEngine {
    mode: ExecutionMode,
    removal_method: RemovalMethod,
    shutdown_flag: Option<Arc<AtomicBool>>,
    progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for ExecutionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionEngine")
            .field("mode", &self.mode)
            .field("removal_method", &self.removal_method)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl ExecutionEngine {
    /// Create an engine for the given mode.
    #[must_use]
    pub fn new(mode: ExecutionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Set how files are removed.
    #[must_use]
    pub fn with_removal_method(mut self, method: RemovalMethod) -> Self {
        self.removal_method = method;
        self
    }

    /// Set the shutdown flag checked before every removal.
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

    /// Mode this engine runs in.
    #[must_use]
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Execute the plan and build the report.
    #[must_use]
    pub fn execute(
        &self,
        root_path: &Path,
        key_strategy: KeyStrategy,
        groups: Vec<DuplicateGroup>,
    ) -> DedupeReport {
        let mut report = DedupeReport::new(root_path.to_path_buf(), key_strategy, groups, self.mode);

        if self.mode.is_preview() {
            log::info!(
                "Preview: {} file(s) in {} group(s) would be removed",
                report.to_delete(),
                report.group_count()
            );
            return report;
        }

        let queue = removal_queue(&report.groups);
        let total = queue.len();

        if let Some(ref callback) = self.progress_callback {
            callback.on_phase_start(PHASE_REMOVING, total);
        }

        for (index, path) in queue.into_iter().enumerate() {
            if self.is_shutdown_requested() {
                log::warn!(
                    "Shutdown requested, {} removal(s) not attempted",
                    total - index
                );
                report.interrupted = true;
                break;
            }

            if let Some(ref callback) = self.progress_callback {
                callback.on_progress(index + 1, path.to_string_lossy().as_ref());
            }

            let outcome = match remove_file(&path, self.removal_method) {
                Ok(()) => RemovalOutcome::removed(path),
                Err(e) => {
                    log::warn!("Failed to delete {}: {}", path.display(), e);
                    RemovalOutcome::failed(path, e.to_string())
                }
            };
            report.removal_outcomes.push(outcome);
        }

        if let Some(ref callback) = self.progress_callback {
            callback.on_phase_end(PHASE_REMOVING);
        }

        log::info!(
            "Removed {} file(s), {} failed",
            report.removed_count(),
            report.failed_count()
        );

        report
    }
}

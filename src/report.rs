//! Result values handed to the reporters.
//!
//! A [`DedupeReport`] is built fresh for every invocation and is the only
//! value the output formatters consume.

use std::path::PathBuf;

use crate::duplicates::DuplicateGroup;
use crate::scanner::KeyStrategy;

/// Whether the engine may touch the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Report intended removals only
    #[default]
    Preview,
    /// Perform removals
    Apply,
}

impl ExecutionMode {
    /// Map the CLI's `apply` flag to a mode.
    #[must_use]
    pub fn from_apply(apply: bool) -> Self {
        if apply {
            Self::Apply
        } else {
            Self::Preview
        }
    }

    /// `true` for [`ExecutionMode::Preview`].
    #[must_use]
    pub fn is_preview(self) -> bool {
        self == Self::Preview
    }
}

/// Outcome of one removal attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalOutcome {
    /// Path the engine tried to remove
    pub path: PathBuf,
    /// Whether the file is gone because of this attempt
    pub removed: bool,
    /// Failure description when `removed` is false
    pub error: Option<String>,
}

impl RemovalOutcome {
    /// A successful removal.
    #[must_use]
    pub fn removed(path: PathBuf) -> Self {
        Self {
            path,
            removed: true,
            error: None,
        }
    }

    /// A failed removal.
    #[must_use]
    pub fn failed(path: PathBuf, error: impl Into<String>) -> Self {
        Self {
            path,
            removed: false,
            error: Some(error.into()),
        }
    }
}

/// Everything one dedupe pass produced.
#[derive(Debug, Clone)]
pub struct DedupeReport {
    /// Root of the walk
    pub root_path: PathBuf,
    /// Strategy used for identity keys
    pub key_strategy: KeyStrategy,
    /// Duplicate groups, kept member first
    pub groups: Vec<DuplicateGroup>,
    /// One entry per removal attempt; empty in preview mode
    pub removal_outcomes: Vec<RemovalOutcome>,
    /// Whether this was a preview run
    pub preview_mode: bool,
    /// Entries skipped because they could not be read
    pub skipped: usize,
    /// Whether a shutdown request stopped removals early
    pub interrupted: bool,
}

impl DedupeReport {
    /// Create a report with no removal outcomes.
    #[must_use]
    pub fn new(
        root_path: PathBuf,
        key_strategy: KeyStrategy,
        groups: Vec<DuplicateGroup>,
        mode: ExecutionMode,
    ) -> Self {
        Self {
            root_path,
            key_strategy,
            groups,
            removal_outcomes: Vec::new(),
            preview_mode: mode.is_preview(),
            skipped: 0,
            interrupted: false,
        }
    }

    /// Number of duplicate groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of members planned for removal across all groups.
    #[must_use]
    pub fn to_delete(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::duplicate_count).sum()
    }

    /// Number of successful removals.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.removal_outcomes.iter().filter(|o| o.removed).count()
    }

    /// Number of failed removals.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.removal_outcomes.iter().filter(|o| !o.removed).count()
    }

    /// Human-readable summary of the pass.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.preview_mode {
            format!(
                "Found {} duplicate group(s), {} file(s) would be removed",
                self.group_count(),
                self.to_delete()
            )
        } else {
            format!(
                "Found {} duplicate group(s), removed {} file(s), {} failed",
                self.group_count(),
                self.removed_count(),
                self.failed_count()
            )
        }
    }
}

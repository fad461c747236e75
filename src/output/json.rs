//! JSON output formatter for dedupe reports.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "root_path": "./downloads",
//!   "method": "hash",
//!   "duplicates": [
//!     {
//!       "key": "4b68ab38...",
//!       "keep": "./downloads/a.txt",
//!       "duplicates": ["./downloads/b.txt"],
//!       "count": 1
//!     }
//!   ],
//!   "count": 1,
//!   "to_delete": 1,
//!   "dry_run": true,
//!   "removals": [],
//!   "skipped": 0,
//!   "interrupted": false
//! }
//! ```

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::duplicates::DuplicateGroup;
use crate::report::{DedupeReport, RemovalOutcome};
use crate::scanner::KeyStrategy;

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// Identity key shared by the group
    pub key: String,
    /// Path that is kept
    pub keep: String,
    /// Paths that are (or would be) removed
    pub duplicates: Vec<String>,
    /// Number of removable paths
    pub count: usize,
}

impl JsonDuplicateGroup {
    /// Create a JSON duplicate group from a DuplicateGroup.
    #[must_use]
    pub fn from_duplicate_group(group: &DuplicateGroup) -> Self {
        Self {
            key: group.key.to_string(),
            keep: path_string(group.keep()),
            duplicates: group.removable().iter().map(|p| path_string(p)).collect(),
            count: group.duplicate_count(),
        }
    }
}

/// One removal attempt in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRemoval {
    /// Path the engine tried to remove
    pub path: String,
    /// Whether the removal succeeded
    pub removed: bool,
    /// Failure description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&RemovalOutcome> for JsonRemoval {
    fn from(outcome: &RemovalOutcome) -> Self {
        Self {
            path: path_string(&outcome.path),
            removed: outcome.removed,
            error: outcome.error.clone(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Root of the walk
    pub root_path: String,
    /// Key strategy (`hash` or `name`)
    pub method: KeyStrategy,
    /// Duplicate groups
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Number of duplicate groups
    pub count: usize,
    /// Number of removable files
    pub to_delete: usize,
    /// Whether this was a preview run
    pub dry_run: bool,
    /// Removal attempts (empty in preview)
    pub removals: Vec<JsonRemoval>,
    /// Entries skipped because they could not be read
    pub skipped: usize,
    /// Whether removals stopped early on a shutdown request
    pub interrupted: bool,
}

impl JsonOutput {
    /// Create a new JSON output from a report.
    ///
    /// # Example
    ///
    /// ```
    /// use dedupe::output::json::JsonOutput;
    /// use dedupe::report::{DedupeReport, ExecutionMode};
    /// use dedupe::scanner::KeyStrategy;
    /// use std::path::PathBuf;
    ///
    /// let report = DedupeReport::new(PathBuf::from("."), KeyStrategy::Hash, vec![], ExecutionMode::Preview);
    /// let output = JsonOutput::new(&report);
    /// assert_eq!(output.count, 0);
    /// assert!(output.dry_run);
    /// ```
    #[must_use]
    pub fn new(report: &DedupeReport) -> Self {
        Self {
            root_path: path_string(&report.root_path),
            method: report.key_strategy,
            duplicates: report
                .groups
                .iter()
                .map(JsonDuplicateGroup::from_duplicate_group)
                .collect(),
            count: report.group_count(),
            to_delete: report.to_delete(),
            dry_run: report.preview_mode,
            removals: report.removal_outcomes.iter().map(JsonRemoval::from).collect(),
            skipped: report.skipped,
            interrupted: report.interrupted,
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer)
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

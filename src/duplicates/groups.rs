//! Duplicate grouping by identity key.
//!
//! # Overview
//!
//! The grouper consumes `(ordinal, key, path)` triples, where `ordinal` is
//! the position at which the walker discovered the path, and accumulates a
//! multi-map from key to paths. Keys seen only once are identity matches,
//! not duplicates, and are dropped when the grouper is finished.
//!
//! Members of every group are ordered by ordinal, and groups are ordered by
//! the ordinal of their first member. Feeding triples out of order (for
//! example straight from a parallel hashing pool) yields the same result as
//! feeding them in walk order.
//!
//! # Example
//!
//! ```
//! use dedupe::duplicates::DuplicateGrouper;
//! use dedupe::scanner::IdentityKey;
//! use std::path::PathBuf;
//!
//! let mut grouper = DuplicateGrouper::new();
//! grouper.push(0, IdentityKey::new("k1"), PathBuf::from("/a.txt"));
//! grouper.push(1, IdentityKey::new("k1"), PathBuf::from("/b.txt"));
//! grouper.push(2, IdentityKey::new("k2"), PathBuf::from("/c.txt"));
//!
//! let (groups, stats) = grouper.finish();
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].keep(), PathBuf::from("/a.txt").as_path());
//! assert_eq!(stats.eliminated_unique, 1);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::scanner::IdentityKey;

/// Files sharing one identity key.
///
/// Invariant: `members` holds at least two paths, ordered by walk discovery.
/// `members[0]` is the file that is kept; every other member is removable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    /// Identity key shared by every member
    pub key: IdentityKey,
    /// Member paths in walk order
    members: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Create a duplicate group.
    ///
    /// Returns `None` when fewer than two members are given: a singleton is
    /// not a duplicate.
    #[must_use]
    pub fn new(key: IdentityKey, members: Vec<PathBuf>) -> Option<Self> {
        if members.len() < 2 {
            return None;
        }
        Some(Self { key, members })
    }

    /// All members, kept file first.
    #[must_use]
    pub fn members(&self) -> &[PathBuf] {
        &self.members
    }

    /// The retained member (earliest discovered).
    #[must_use]
    pub fn keep(&self) -> &Path {
        &self.members[0]
    }

    /// Members eligible for removal, in walk order.
    #[must_use]
    pub fn removable(&self) -> &[PathBuf] {
        &self.members[1..]
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`: a group holds at least two members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of duplicate copies (total - 1 kept).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.members.len() - 1
    }
}

/// Statistics from the grouping phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Number of keyed files consumed
    pub total_files: usize,
    /// Number of distinct keys
    pub unique_keys: usize,
    /// Number of files eliminated as unique (singleton keys)
    pub eliminated_unique: usize,
    /// Number of files in groups of 2+
    pub duplicate_members: usize,
    /// Number of groups with 2+ files
    pub duplicate_groups: usize,
}

/// Accumulates keyed paths into duplicate groups.
///
/// Single-writer: the grouper is owned by the thread draining key results.
#[derive(Debug, Default)]
pub struct DuplicateGrouper {
    buckets: HashMap<IdentityKey, Vec<(usize, PathBuf)>>,
    total_files: usize,
}

impl DuplicateGrouper {
    /// Create an empty grouper.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the file discovered at `ordinal` has identity `key`.
    pub fn push(&mut self, ordinal: usize, key: IdentityKey, path: PathBuf) {
        self.total_files += 1;
        self.buckets.entry(key).or_default().push((ordinal, path));
    }

    /// Number of keyed files recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.total_files
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_files == 0
    }

    /// Drop singleton keys and return the duplicate groups in discovery order.
    #[must_use]
    pub fn finish(self) -> (Vec<DuplicateGroup>, GroupingStats) {
        let mut stats = GroupingStats {
            total_files: self.total_files,
            unique_keys: self.buckets.len(),
            ..Default::default()
        };

        let mut ordered: Vec<(usize, DuplicateGroup)> = Vec::new();

        for (key, mut entries) in self.buckets {
            if entries.len() < 2 {
                stats.eliminated_unique += entries.len();
                log::trace!("Eliminated unique key {}", key);
                continue;
            }

            entries.sort_by_key(|(ordinal, _)| *ordinal);
            let first = entries[0].0;

            stats.duplicate_members += entries.len();
            stats.duplicate_groups += 1;
            log::debug!("Key {}: {} duplicates", key, entries.len());

            let members = entries.into_iter().map(|(_, path)| path).collect();
            if let Some(group) = DuplicateGroup::new(key, members) {
                ordered.push((first, group));
            }
        }

        ordered.sort_by_key(|(first, _)| *first);

        log::info!(
            "Grouping: {} files, {} unique keys, {} duplicate groups",
            stats.total_files,
            stats.unique_keys,
            stats.duplicate_groups
        );

        (ordered.into_iter().map(|(_, group)| group).collect(), stats)
    }
}

/// Group keyed paths in one call.
///
/// Each item's position in `keyed` is used as its discovery ordinal.
///
/// # Example
///
/// ```
/// use dedupe::duplicates::group;
/// use dedupe::scanner::IdentityKey;
/// use std::path::PathBuf;
///
/// let (groups, _) = group(vec![
///     (IdentityKey::new("x"), PathBuf::from("/a")),
///     (IdentityKey::new("x"), PathBuf::from("/b")),
/// ]);
/// assert_eq!(groups[0].removable(), &[PathBuf::from("/b")]);
/// ```
#[must_use]
pub fn group(
    keyed: impl IntoIterator<Item = (IdentityKey, PathBuf)>,
) -> (Vec<DuplicateGroup>, GroupingStats) {
    let mut grouper = DuplicateGrouper::new();
    for (ordinal, (key, path)) in keyed.into_iter().enumerate() {
        grouper.push(ordinal, key, path);
    }
    grouper.finish()
}

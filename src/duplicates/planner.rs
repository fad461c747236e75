//! Keep/remove planning for duplicate groups.
//!
//! The policy is fixed: in every group the earliest-discovered member (by
//! walk order) is kept and every other member is removable. Modification
//! time, size and path depth play no part.

use std::path::{Path, PathBuf};

use super::DuplicateGroup;

/// What happens to a group member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Retained in place
    Keep,
    /// Eligible for removal
    Remove,
}

/// A group member together with its disposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedFile<'a> {
    /// Member path
    pub path: &'a Path,
    /// Keep or remove
    pub disposition: Disposition,
}

impl DuplicateGroup {
    /// Iterate members with their dispositions, kept member first.
    pub fn dispositions(&self) -> impl Iterator<Item = PlannedFile<'_>> + '_ {
        self.members()
            .iter()
            .enumerate()
            .map(|(index, path)| PlannedFile {
                path,
                disposition: if index == 0 {
                    Disposition::Keep
                } else {
                    Disposition::Remove
                },
            })
    }
}

/// Apply the retain-first policy to grouped files.
///
/// Groups already carry their members in walk order, so the plan keeps the
/// structure unchanged; groups that somehow hold fewer than two members
/// are dropped.
#[must_use]
pub fn plan(groups: Vec<DuplicateGroup>) -> Vec<DuplicateGroup> {
    let planned: Vec<DuplicateGroup> = groups.into_iter().filter(|g| g.len() > 1).collect();

    log::debug!(
        "Plan: keep {} file(s), remove {} file(s)",
        planned.len(),
        planned.iter().map(DuplicateGroup::duplicate_count).sum::<usize>()
    );

    planned
}

/// Every removable path, in group order and then member order.
#[must_use]
pub fn removal_queue(groups: &[DuplicateGroup]) -> Vec<PathBuf> {
    groups
        .iter()
        .flat_map(|g| g.removable().iter().cloned())
        .collect()
}

//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Grouping keyed files by identity key
//! - Retain-first keep/remove planning
//! - The walk → key → group → plan pipeline

pub mod finder;
pub mod groups;
pub mod planner;

pub use finder::{DedupeConfig, DuplicateFinder, FinderError, ScanSummary};
pub use groups::{group, DuplicateGroup, DuplicateGrouper, GroupingStats};
pub use planner::{plan, removal_queue, Disposition, PlannedFile};

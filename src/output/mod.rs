//! Output formatters for dedupe reports.
//!
//! This module provides different output formats for a [`DedupeReport`]:
//! - JSON for automation and scripting
//! - Plain text for terminals
//!
//! # Example
//!
//! ```no_run
//! use dedupe::duplicates::DedupeConfig;
//! use dedupe::output::json::JsonOutput;
//!
//! let report = dedupe::dedupe(&DedupeConfig::new(".")).unwrap();
//! println!("{}", JsonOutput::new(&report).to_json_pretty().unwrap());
//! ```
//!
//! [`DedupeReport`]: crate::report::DedupeReport

pub mod json;
pub mod plain;

// Re-export main types
pub use json::JsonOutput;
pub use plain::PlainOutput;

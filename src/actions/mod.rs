//! File actions module.
//!
//! This module provides functionality for:
//! - Removing a single duplicate (unlink or system trash)
//! - Executing a removal plan in preview or apply mode
//!
//! ```no_run
//! use dedupe::actions::{remove_file, RemovalMethod};
//! use std::path::Path;
//!
//! let result = remove_file(Path::new("/path/to/duplicate.txt"), RemovalMethod::Trash);
//! ```

pub mod delete;
pub mod engine;

// Re-export commonly used types
pub use delete::{remove_file, RemovalError, RemovalMethod};
pub use engine::ExecutionEngine;

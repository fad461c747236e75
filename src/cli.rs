//! Command-line interface definitions.
//!
//! This module defines all CLI arguments and options using the clap derive API.
//! Global options (verbosity, colour, config file) apply to every subcommand.
//!
//! # Example
//!
//! ```bash
//! # List duplicate groups by content hash
//! dedupe dedupe ./downloads
//!
//! # Show what a delete would remove, grouping by file name
//! dedupe dedupe ./photos --by name --action delete --dry-run -r
//!
//! # Remove duplicates and emit JSON
//! dedupe dedupe ./downloads --action delete --output json
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scanner::KeyStrategy;

/// Find and remove duplicate files.
///
/// Files are compared by SHA-256 of their content (default) or by name.
/// Nothing is removed unless `--action delete` is given without `--dry-run`.
#[derive(Debug, Parser)]
#[command(name = "dedupe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors and the report
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print fatal errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Path to a TOML defaults file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find duplicate files and optionally remove them
    Dedupe(DedupeArgs),
}

/// Arguments for the dedupe subcommand.
#[derive(Debug, Args)]
pub struct DedupeArgs {
    /// Directory to search
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Comparison method [default: hash]
    #[arg(short = 'b', long = "by", value_enum)]
    pub by: Option<KeyStrategy>,

    /// What to do with duplicates
    #[arg(short, long, value_enum, default_value = "list")]
    pub action: Action,

    /// Show what would be deleted without making changes
    #[arg(short, long)]
    pub dry_run: bool,

    /// Search recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Output format [default: plain]
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Number of I/O threads for hashing [default: 4]
    #[arg(long, value_name = "N")]
    pub io_threads: Option<usize>,

    /// Move duplicates to the system trash instead of deleting them
    #[arg(long)]
    pub trash: bool,
}

impl DedupeArgs {
    /// Whether this invocation removes files.
    #[must_use]
    pub fn is_apply(&self) -> bool {
        self.action == Action::Delete && !self.dry_run
    }

    /// Whether plain output should list the files a delete would remove.
    #[must_use]
    pub fn shows_removal_plan(&self) -> bool {
        self.action == Action::Delete && self.dry_run
    }
}

/// Action applied to duplicate groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Action {
    /// Only list duplicate groups
    #[default]
    List,
    /// Delete every duplicate except the first one found
    Delete,
}

/// Output format for reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Plain,
    /// JSON for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

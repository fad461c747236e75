//! Dedupe - content-addressed duplicate file detection and safe removal
//!
//! One pass walks a directory tree, computes an identity key for every
//! regular file (SHA-256 of the content, or the file name), groups files
//! sharing a key, keeps the first file found in each group and, only when
//! asked to, removes the rest.
//!
//! # Example
//!
//! ```rust,no_run
//! use dedupe::duplicates::DedupeConfig;
//! use dedupe::scanner::KeyStrategy;
//!
//! let config = DedupeConfig::new("./downloads")
//!     .with_key_strategy(KeyStrategy::Hash)
//!     .with_recursive(true);
//!
//! let report = dedupe::dedupe(&config).unwrap();
//! println!("{}", report.summary());
//! ```

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod report;
pub mod scanner;
pub mod signal;

use std::io::{IsTerminal, Write};
use std::sync::Arc;

use anyhow::Context;

use crate::actions::{ExecutionEngine, RemovalMethod};
use crate::cli::{Cli, Commands, DedupeArgs, OutputFormat};
use crate::config::Config;
use crate::duplicates::{DedupeConfig, DuplicateFinder, FinderError};
use crate::error::ExitCode;
use crate::output::{JsonOutput, PlainOutput};
use crate::progress::{Progress, ProgressCallback};
use crate::report::{DedupeReport, ExecutionMode};

/// Run one dedupe pass: walk, key, group, plan and execute.
///
/// In preview mode the filesystem is never modified.
///
/// # Errors
///
/// Returns [`FinderError`] if the root is missing or unreadable, or the
/// walk/hash phase was interrupted. Per-file failures never abort the pass;
/// they are counted as skipped or recorded as failed removals.
pub fn dedupe(config: &DedupeConfig) -> Result<DedupeReport, FinderError> {
    let finder = DuplicateFinder::new(config.clone());
    let (groups, summary) = finder.find()?;

    log::info!(
        "Found {} duplicate group(s) in {} file(s) ({} skipped) in {:?}",
        summary.duplicate_groups,
        summary.total_files,
        summary.skipped,
        summary.scan_duration
    );

    let mut engine =
        ExecutionEngine::new(config.mode).with_removal_method(config.removal_method);
    if let Some(ref flag) = config.shutdown_flag {
        engine = engine.with_shutdown_flag(Arc::clone(flag));
    }
    if let Some(ref callback) = config.progress_callback {
        engine = engine.with_progress_callback(Arc::clone(callback));
    }

    let mut report = engine.execute(&config.root_path, config.key_strategy, groups);
    report.skipped = summary.skipped;
    Ok(report)
}

/// Main application logic for the binary.
///
/// # Errors
///
/// Returns an error for invalid configuration, a missing or unreadable root,
/// an interrupted scan, or a failure writing the report.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    if cli.no_color {
        yansi::disable();
    }

    let file_config =
        Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    log::debug!("Effective defaults: {:?}", file_config);

    match cli.command {
        Commands::Dedupe(args) => handle_dedupe(&args, &file_config, cli.quiet, cli.no_color),
    }
}

/// Merge command-line arguments over the loaded defaults.
fn build_config(args: &DedupeArgs, defaults: &Config) -> (DedupeConfig, OutputFormat) {
    let removal_method = if args.trash || defaults.trash {
        RemovalMethod::Trash
    } else {
        RemovalMethod::Permanent
    };

    let config = DedupeConfig::new(&args.path)
        .with_key_strategy(args.by.unwrap_or(defaults.by))
        .with_recursive(args.recursive || defaults.recursive)
        .with_mode(ExecutionMode::from_apply(args.is_apply()))
        .with_io_threads(args.io_threads.unwrap_or(defaults.io_threads))
        .with_removal_method(removal_method);

    (config, args.output.unwrap_or(defaults.output))
}

fn handle_dedupe(
    args: &DedupeArgs,
    defaults: &Config,
    quiet: bool,
    no_color: bool,
) -> anyhow::Result<ExitCode> {
    let (config, format) = build_config(args, defaults);

    let handler = signal::install_handler()?;
    let hide_progress =
        quiet || format == OutputFormat::Json || !std::io::stderr().is_terminal();
    let progress: Arc<dyn ProgressCallback> = Arc::new(Progress::new(hide_progress));

    let config = config
        .with_shutdown_flag(handler.get_flag())
        .with_progress_callback(progress);

    log::info!(
        "Scanning {} by {} ({})",
        config.root_path.display(),
        config.key_strategy,
        if config.mode.is_preview() {
            "preview"
        } else {
            "apply"
        }
    );

    let report = dedupe(&config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => JsonOutput::new(&report)
            .write_to(&mut out)
            .context("Failed to write JSON report")?,
        OutputFormat::Plain => {
            let color = !no_color && std::io::stdout().is_terminal();
            PlainOutput::new(&report)
                .with_removal_plan(args.shows_removal_plan())
                .with_color(color)
                .write_to(&mut out)
                .context("Failed to write report")?;
        }
    }
    out.flush().context("Failed to flush output")?;

    if report.interrupted || handler.is_shutdown_requested() {
        return Ok(ExitCode::Interrupted);
    }
    Ok(ExitCode::Success)
}

//! Line-oriented text output for dedupe reports.
//!
//! ```text
//!
//! Duplicate group (key: 4b68ab38...):
//!   Keep: ./a.txt
//!   Duplicate: ./b.txt
//!
//! Deleting duplicates:
//!   Deleted: ./b.txt
//!
//! Found 1 duplicate groups
//! ```

use std::fmt::Write as _;
use std::io::Write;

use yansi::{Color, Paint};

use crate::report::DedupeReport;

/// Plain text renderer.
#[derive(Debug, Clone)]
pub struct PlainOutput<'a> {
    report: &'a DedupeReport,
    show_plan: bool,
    color: bool,
}

impl<'a> PlainOutput<'a> {
    /// Create a renderer for `report` without colours or removal plan.
    #[must_use]
    pub fn new(report: &'a DedupeReport) -> Self {
        Self {
            report,
            show_plan: false,
            color: false,
        }
    }

    /// List the files a preview would remove (`DRY RUN - Would delete:`).
    #[must_use]
    pub fn with_removal_plan(mut self, show: bool) -> Self {
        self.show_plan = show;
        self
    }

    /// Enable or disable ANSI colours.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.paint(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// Render the whole report.
    #[must_use]
    pub fn render(&self) -> String {
        let report = self.report;
        let mut out = String::new();

        for group in &report.groups {
            let _ = writeln!(out, "\nDuplicate group (key: {}):", group.key);
            let _ = writeln!(
                out,
                "  {} {}",
                self.paint("Keep:", Color::Green),
                group.keep().display()
            );
            for path in group.removable() {
                let _ = writeln!(
                    out,
                    "  {} {}",
                    self.paint("Duplicate:", Color::Yellow),
                    path.display()
                );
            }
        }

        if report.preview_mode {
            if self.show_plan && report.to_delete() > 0 {
                let _ = writeln!(out, "\n{}", self.paint("DRY RUN - Would delete:", Color::Cyan));
                for group in &report.groups {
                    for path in group.removable() {
                        let _ = writeln!(out, "  Would delete: {}", path.display());
                    }
                }
            }
        } else if !report.removal_outcomes.is_empty() {
            let _ = writeln!(out, "\nDeleting duplicates:");
            for outcome in &report.removal_outcomes {
                if outcome.removed {
                    let _ = writeln!(
                        out,
                        "  {} {}",
                        self.paint("Deleted:", Color::Green),
                        outcome.path.display()
                    );
                } else {
                    let _ = writeln!(
                        out,
                        "  {} {}: {}",
                        self.paint("Failed to delete", Color::Red),
                        outcome.path.display(),
                        outcome.error.as_deref().unwrap_or("unknown error")
                    );
                }
            }
        }

        if report.interrupted {
            let _ = writeln!(
                out,
                "\n{}",
                self.paint("Interrupted: remaining duplicates were not removed", Color::Red)
            );
        }

        if report.skipped > 0 {
            let _ = writeln!(out, "\nSkipped {} unreadable entries", report.skipped);
        }

        let _ = writeln!(out, "\nFound {} duplicate groups", report.group_count());
        out
    }

    /// Write the rendered report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.render().as_bytes())
    }
}

//! Scan summary collection and display
//!
//! This module turns a finished scan into the figures the CLI reports:
//! total size, file and directory counts, elapsed time, and the
//! directories that could not be read.

use std::io;
use std::time::Duration;

use serde::Serialize;
use termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::output::{format_number, format_size_precise};
use crate::tree::DirectoryTree;

/// Collected figures for one scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanSummary {
    /// Root path as given
    pub path: String,
    /// Total bytes in all files
    pub size: u64,
    /// Total number of files
    pub files: u64,
    /// Total number of directories, unreadable ones included
    pub directories: u64,
    /// Wall-clock scan time in milliseconds
    pub elapsed_ms: u64,
    /// Directories that could not be listed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedSummary>,
}

/// A directory left out of the totals.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedSummary {
    pub path: String,
    pub reason: String,
}

impl ScanSummary {
    pub fn new(tree: &DirectoryTree, elapsed: Duration) -> Self {
        let (path, totals) = tree
            .root()
            .map(|root| (root.name().to_string(), root.totals()))
            .unwrap_or_default();

        let skipped = tree
            .skipped()
            .iter()
            .map(|s| SkippedSummary {
                path: s.path.display().to_string(),
                reason: s.kind.to_string(),
            })
            .collect();

        Self {
            path,
            size: totals.size,
            files: totals.files,
            directories: totals.subdirs,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            skipped,
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }
}

/// Print the summary to stdout with optional color.
pub fn print_summary(summary: &ScanSummary, use_color: bool) -> io::Result<()> {
    let color_choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color_choice);
    write_summary(summary, &mut stdout)
}

/// Write the summary block.
pub fn write_summary<W: WriteColor>(summary: &ScanSummary, out: &mut W) -> io::Result<()> {
    let mut bold = ColorSpec::new();
    bold.set_bold(true);

    write_label(out, &bold, "Size:")?;
    match format_size_precise(summary.size) {
        Some(human) => writeln!(out, "{}  ({} bytes)", human, format_number(summary.size))?,
        None => writeln!(out, "{} bytes", format_number(summary.size))?,
    }

    write_label(out, &bold, "Files:")?;
    writeln!(out, "{}", format_number(summary.files))?;

    write_label(out, &bold, "Directories:")?;
    writeln!(out, "{}", format_number(summary.directories))?;

    write_label(out, &bold, "Time:")?;
    writeln!(out, "{}", humantime::format_duration(summary.elapsed()))?;

    if !summary.skipped.is_empty() {
        let mut warn = ColorSpec::new();
        warn.set_fg(Some(termcolor::Color::Red));
        write_label(out, &warn, "Skipped:")?;
        let count = summary.skipped.len() as u64;
        writeln!(
            out,
            "{} unreadable {}",
            format_number(count),
            if count == 1 { "directory" } else { "directories" }
        )?;
        for skipped in &summary.skipped {
            writeln!(out, "  {} ({})", skipped.path, skipped.reason)?;
        }
    }

    Ok(())
}

fn write_label<W: WriteColor>(out: &mut W, spec: &ColorSpec, label: &str) -> io::Result<()> {
    out.set_color(spec)?;
    write!(out, "{:<13}", label)?;
    out.reset()
}

//! Output formatting for pyloc results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: a map from file path to its counts plus one aggregate record

use colored::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::analysis::LineCounts;
use crate::count::{AggregateReport, CountResult, FileError};

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    /// Counts keyed (and ordered) by file path.
    pub files: BTreeMap<String, LineCounts>,
    pub aggregate: AggregateReport,
    pub attempted: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FileError>,
}

impl JsonReport {
    pub fn from_result(result: &CountResult) -> Self {
        Self {
            files: result
                .files
                .iter()
                .map(|f| (f.path.clone(), f.counts))
                .collect(),
            aggregate: result.aggregate,
            attempted: result.attempted,
            errors: result.errors.clone(),
        }
    }
}

/// Render results as pretty-printed JSON.
pub fn to_json(result: &CountResult) -> anyhow::Result<String> {
    let report = JsonReport::from_result(result);
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Write results in JSON format to stdout.
pub fn write_json(result: &CountResult) -> anyhow::Result<()> {
    let json = to_json(result)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format to stdout.
pub fn write_pretty(path: &str, result: &CountResult) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_pretty(&mut out, path, result)?;
    Ok(())
}

/// Render results in pretty format to any writer.
pub fn render_pretty<W: Write>(out: &mut W, path: &str, result: &CountResult) -> io::Result<()> {
    // Header
    writeln!(out)?;
    writeln!(
        out,
        "  {} v{}",
        "pyloc".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out)?;
    writeln!(out, "  {}{}", "Counting: ".dimmed(), path)?;
    writeln!(out)?;

    for file in &result.files {
        writeln!(out, "  {} {}", "File:".bold(), file.path)?;
        writeln!(out, "    {}", format_counts(&file.counts))?;
    }

    writeln!(out, "  {}", "---".dimmed())?;
    write_summary(out, result)?;

    if !result.errors.is_empty() {
        writeln!(out)?;
        write_errors(out, &result.errors)?;
    }

    writeln!(out)?;
    Ok(())
}

fn format_counts(counts: &LineCounts) -> String {
    format!(
        "Total: {}  Code: {}  Comments: {}  Blank: {}",
        counts.total,
        counts.code.to_string().green(),
        counts.comments.to_string().yellow(),
        counts.blanks.to_string().dimmed()
    )
}

fn write_summary<W: Write>(out: &mut W, result: &CountResult) -> io::Result<()> {
    let aggregate = &result.aggregate;

    write!(out, "  Files analyzed: {}", aggregate.files.to_string().bold())?;
    if result.has_errors() {
        write!(
            out,
            "  {}",
            format!("({} skipped)", result.errors.len()).red()
        )?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "  Total lines: {}  Code: {}  Comments: {}  Blank: {}",
        aggregate.counts.total.to_string().bold(),
        aggregate.counts.code.to_string().green(),
        aggregate.counts.comments.to_string().yellow(),
        aggregate.counts.blanks.to_string().dimmed()
    )
}

fn write_errors<W: Write>(out: &mut W, errors: &[FileError]) -> io::Result<()> {
    writeln!(out, "  {}", "Skipped:".red().bold())?;
    for error in errors {
        writeln!(
            out,
            "    {} {} {}",
            error.path,
            format!("[{}]", error.kind).dimmed(),
            error.message
        )?;
    }
    Ok(())
}

//! Core types for counting results.

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisError, ErrorKind, FileReport, LineCounts};

/// Totals across every successfully analyzed file.
///
/// Folding is associative and commutative, so the result does not depend
/// on the order in which files are added or partial aggregates merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Number of files folded in.
    pub files: usize,
    #[serde(flatten)]
    pub counts: LineCounts,
}

impl AggregateReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file's totals into the aggregate.
    pub fn add_file(&mut self, report: &FileReport) {
        self.files += 1;
        self.counts.add(&report.counts);
    }

    /// Merge another partial aggregate into this one.
    pub fn merge(&mut self, other: AggregateReport) {
        self.files += other.files;
        self.counts.add(&other.counts);
    }
}

impl<'a> FromIterator<&'a FileReport> for AggregateReport {
    fn from_iter<I: IntoIterator<Item = &'a FileReport>>(iter: I) -> Self {
        let mut aggregate = Self::new();
        for report in iter {
            aggregate.add_file(report);
        }
        aggregate
    }
}

/// A file that could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileError {
    pub path: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl FileError {
    pub fn new(path: &str, error: &AnalysisError) -> Self {
        Self {
            path: path.to_string(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} error: {}", self.path, self.kind, self.message)
    }
}

/// Results of one counting run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResult {
    /// Per-file reports, sorted by path.
    pub files: Vec<FileReport>,
    /// Files that were skipped, sorted by path.
    #[serde(default)]
    pub errors: Vec<FileError>,
    /// Totals across `files` only.
    pub aggregate: AggregateReport,
    /// Number of files attempted, including skipped ones.
    pub attempted: usize,
}

impl CountResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successfully analyzed file.
    pub fn add_report(&mut self, report: FileReport) {
        self.attempted += 1;
        self.aggregate.add_file(&report);
        self.files.push(report);
    }

    /// Record a skipped file.
    pub fn add_error(&mut self, error: FileError) {
        self.attempted += 1;
        self.errors.push(error);
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: CountResult) {
        self.files.extend(other.files);
        self.errors.extend(other.errors);
        self.aggregate.merge(other.aggregate);
        self.attempted += other.attempted;
    }

    /// Sort reports and errors by path for deterministic output.
    pub fn sort(&mut self) {
        self.files.sort_by(|a, b| a.path.cmp(&b.path));
        self.errors.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Check if any file was skipped.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

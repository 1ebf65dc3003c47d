//! Counting runner that drives analysis over a set of files.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::analysis::{FileReport, PythonAnalyzer};

use super::{read_source, CountResult, FileError};

/// Reads, analyzes and aggregates a set of files.
///
/// A file that fails to read, decode, tokenize or parse is recorded as a
/// [`FileError`] and the run continues with the next one.
pub struct Runner {
    analyzer: PythonAnalyzer,
    parallel: bool,
}

impl Runner {
    /// Create a new sequential runner.
    pub fn new() -> Self {
        Self {
            analyzer: PythonAnalyzer::new(),
            parallel: false,
        }
    }

    /// Set whether files are analyzed on the rayon thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Count every file. Reports and errors come back sorted by path.
    pub fn run(&self, files: &[PathBuf]) -> CountResult {
        let mut result = if self.parallel {
            files
                .par_iter()
                .map(|path| self.count_file(path))
                .fold(CountResult::new, |mut acc, outcome| {
                    record(&mut acc, outcome);
                    acc
                })
                .reduce(CountResult::new, |mut a, b| {
                    a.merge(b);
                    a
                })
        } else {
            let mut acc = CountResult::new();
            for path in files {
                record(&mut acc, self.count_file(path));
            }
            acc
        };

        result.sort();

        tracing::info!(
            attempted = result.attempted,
            analyzed = result.aggregate.files,
            skipped = result.errors.len(),
            "count finished"
        );

        result
    }

    /// Read and count a single file.
    pub fn count_file(&self, path: &Path) -> Result<FileReport, FileError> {
        let display = path.to_string_lossy().to_string();
        let source = read_source(path).map_err(|e| FileError::new(&display, &e))?;
        self.count_source(&display, &source)
    }

    /// Count already-decoded source text.
    pub fn count_source(&self, path: &str, source: &str) -> Result<FileReport, FileError> {
        self.analyzer
            .analyze(path, source)
            .map_err(|e| FileError::new(path, &e))
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

fn record(result: &mut CountResult, outcome: Result<FileReport, FileError>) {
    match outcome {
        Ok(report) => {
            tracing::debug!(
                path = %report.path,
                total = report.counts.total,
                code = report.counts.code,
                comments = report.counts.comments,
                blanks = report.counts.blanks,
                "analyzed file"
            );
            result.add_report(report);
        }
        Err(error) => {
            tracing::warn!(path = %error.path, kind = %error.kind, "skipping file: {}", error.message);
            result.add_error(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_runner_basic() {
        let temp = TempDir::new().unwrap();
        let main_py = temp.path().join("main.py");
        std::fs::write(
            &main_py,
            r#""""Entry module."""

def main():
    # say hello
    print("hello")
"#,
        )
        .unwrap();

        let result = Runner::new().run(&[main_py]);

        assert_eq!(result.attempted, 1);
        assert_eq!(result.files.len(), 1);
        let counts = result.files[0].counts;
        assert_eq!(counts.total, 5);
        assert_eq!(counts.comments, 2);
        assert_eq!(counts.blanks, 1);
        assert_eq!(counts.code, 2);
        assert_eq!(result.aggregate.counts, counts);
    }

    #[test]
    fn test_runner_skips_broken_file() {
        let temp = TempDir::new().unwrap();
        let good = temp.path().join("good.py");
        let bad = temp.path().join("bad.py");
        std::fs::write(&good, "x = 1\ny = 2\n").unwrap();
        std::fs::write(&bad, "def broken(:\n    pass\n").unwrap();

        let result = Runner::new().run(&[bad.clone(), good]);

        assert_eq!(result.attempted, 2);
        assert_eq!(result.aggregate.files, 1);
        assert_eq!(result.aggregate.counts.code, 2);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, bad.to_string_lossy());
        assert_eq!(result.errors[0].kind, ErrorKind::Parse);
    }

    #[test]
    fn test_runner_reports_lex_error_kind() {
        let temp = TempDir::new().unwrap();
        let unterminated = temp.path().join("unterminated.py");
        let indented = temp.path().join("indented.py");
        std::fs::write(&unterminated, "x = \"abc\ny = 1\n").unwrap();
        std::fs::write(&indented, "x = 1\n    y = 2\n").unwrap();

        let result = Runner::new().run(&[unterminated, indented]);

        assert_eq!(result.aggregate.files, 0);
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors.iter().all(|e| e.kind == ErrorKind::Lex));
    }

    #[test]
    fn test_count_source_maps_errors() {
        let runner = Runner::new();
        let err = runner
            .count_source("inline.py", "class (:\n")
            .unwrap_err();
        assert_eq!(err.path, "inline.py");
        assert!(!err.message.is_empty());
    }
}

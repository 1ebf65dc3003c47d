//! Source file collection and reading.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::analysis::AnalysisError;

/// Extension of files picked up when walking a directory.
pub const SOURCE_EXTENSION: &str = "py";

/// Collect the files to count under `root`.
///
/// A file path is returned as-is whatever its extension. A directory is
/// walked recursively for `.py` files; results are sorted.
pub fn collect_files(root: &Path, follow_links: bool) -> anyhow::Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(follow_links) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() && is_source_file(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// Whether a path has the Python source extension.
pub fn is_source_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION)
}

/// Read a file and decode it as UTF-8.
pub fn read_source(path: &Path) -> Result<String, AnalysisError> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|e| AnalysisError::Decode {
        message: e.utf8_error().to_string(),
    })
}

//! Line classification engine.
//!
//! This module decides, for each physical line of a Python file, whether it
//! is code, a comment, or blank. Docstrings count as comments.
//!
//! # Architecture
//!
//! ```text
//!                      ┌──────────────────┐
//!                 ┌───▶│ Comment scanner  │──── comment lines ────┐
//! ┌────────────┐  │    └──────────────────┘                       ▼
//! │ ParsedFile │──┤                                       ┌───────────────┐
//! └────────────┘  │    ┌──────────────────┐               │  Classifier   │──▶ FileReport
//!       ▲         └───▶│ Docstring locator│── spans ─────▶│  (+ blanks)   │
//!       │              └──────────────────┘               └───────────────┘
//!  source text ───────────────────────────────────────────────────┘
//! ```
//!
//! Precedence when marks overlap: docstring, comment, blank, code.

mod classify;
mod comments;
mod docstrings;
mod error;
mod facts;
mod lexical;
mod parsed;
mod python;

pub use classify::{classify_lines, normalize_newlines, split_lines, LineMarks};
pub use error::{AnalysisError, ErrorKind};
pub use facts::{FileReport, LineCategory, LineCounts, LineSpan, SourceLine};
pub use parsed::ParsedFile;
pub use python::PythonAnalyzer;

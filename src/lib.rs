//! pyloc - Python line counter.
//!
//! pyloc classifies every physical line of a Python file as code, comment
//! or blank and aggregates the totals across a codebase. Docstrings of
//! modules, classes and functions count as comments; a string literal
//! anywhere else is code.
//!
//! # Architecture
//!
//! The codebase uses tree-sitter for token- and syntax-level analysis:
//!
//! - `analysis`: Line classification engine (comment scanner, docstring
//!   locator, classifier)
//! - `count`: File collection, per-file counting and aggregation
//! - `config`: YAML config file schema
//! - `report`: Output formatting (pretty, JSON)
//! - `cli`: Command-line interface

pub mod analysis;
pub mod cli;
pub mod config;
pub mod count;
pub mod report;

pub use analysis::{
    AnalysisError, FileReport, LineCategory, LineCounts, LineSpan, PythonAnalyzer, SourceLine,
};
pub use config::{Config, OutputFormat};
pub use count::{AggregateReport, CountResult, FileError, Runner};

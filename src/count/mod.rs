//! File collection, per-file counting and aggregation.

mod files;
mod runner;
mod types;

pub use files::{collect_files, is_source_file, read_source, SOURCE_EXTENSION};
pub use runner::Runner;
pub use types::{AggregateReport, CountResult, FileError};

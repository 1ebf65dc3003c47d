//! Errors that stop analysis of a single file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a file could not be analyzed.
///
/// Every variant is scoped to one file: callers record it and move on.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("line {line}: {message}")]
    Lex { line: usize, message: String },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("not valid UTF-8: {message}")]
    Decode { message: String },
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("parser unavailable: {0}")]
    Parser(String),
}

impl AnalysisError {
    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::Lex { .. } => ErrorKind::Lex,
            AnalysisError::Parse { .. } => ErrorKind::Parse,
            AnalysisError::Decode { .. } => ErrorKind::Decode,
            AnalysisError::Io(_) => ErrorKind::Io,
            AnalysisError::Parser(_) => ErrorKind::Parser,
        }
    }

    /// The offending line, for lexical and syntax errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            AnalysisError::Lex { line, .. } | AnalysisError::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Error categories as reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Io,
    Decode,
    Lex,
    Parse,
    Parser,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Io => "io",
            ErrorKind::Decode => "decode",
            ErrorKind::Lex => "lex",
            ErrorKind::Parse => "parse",
            ErrorKind::Parser => "parser",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

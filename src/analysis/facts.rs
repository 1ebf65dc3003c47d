//! Line-level facts produced by analysis.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inclusive range of 1-indexed line numbers covered by one construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineSpan {
    /// First line (1-indexed).
    pub start: usize,
    /// Last line (1-indexed, inclusive).
    pub end: usize,
}

impl LineSpan {
    /// Create a span. `start` and `end` are swapped if given out of order.
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// Create a span from a tree-sitter node.
    ///
    /// A node whose end point sits at column 0 of a later row ends on the
    /// previous line; tree-sitter reports the position after the last byte.
    pub fn from_node(node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        let end_row = if end.column == 0 && end.row > start.row {
            end.row - 1
        } else {
            end.row
        };
        Self::new(start.row + 1, end_row + 1)
    }

    /// Check whether a line number falls inside this span.
    pub fn contains(&self, line: usize) -> bool {
        self.start <= line && line <= self.end
    }
}

impl fmt::Display for LineSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// The verdict for one physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCategory {
    Blank,
    Comment,
    Code,
}

impl LineCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineCategory::Blank => "blank",
            LineCategory::Comment => "comment",
            LineCategory::Code => "code",
        }
    }
}

impl fmt::Display for LineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Line number (1-indexed).
    pub number: usize,
    /// Raw text without the line terminator.
    pub text: String,
    pub category: LineCategory,
}

/// Per-category line totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCounts {
    pub total: usize,
    pub code: usize,
    pub comments: usize,
    pub blanks: usize,
}

impl LineCounts {
    /// Tally a sequence of line verdicts.
    pub fn from_categories<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = LineCategory>,
    {
        let mut counts = Self::default();
        for category in categories {
            counts.record(category);
        }
        counts
    }

    /// Count one more line.
    pub fn record(&mut self, category: LineCategory) {
        self.total += 1;
        match category {
            LineCategory::Blank => self.blanks += 1,
            LineCategory::Comment => self.comments += 1,
            LineCategory::Code => self.code += 1,
        }
    }

    /// Add another set of counts to this one.
    pub fn add(&mut self, other: &LineCounts) {
        self.total += other.total;
        self.code += other.code;
        self.comments += other.comments;
        self.blanks += other.blanks;
    }

    /// `total == code + comments + blanks`.
    pub fn is_consistent(&self) -> bool {
        self.total == self.code + self.comments + self.blanks
    }
}

/// Line totals for one analyzed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: String,
    #[serde(flatten)]
    pub counts: LineCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_span_contains() {
        let span = LineSpan::new(3, 5);
        assert!(!span.contains(2));
        assert!(span.contains(3));
        assert!(span.contains(5));
        assert!(!span.contains(6));
    }

    #[test]
    fn test_line_span_normalizes_order() {
        assert_eq!(LineSpan::new(7, 2), LineSpan { start: 2, end: 7 });
    }

    #[test]
    fn test_line_span_display() {
        assert_eq!(LineSpan::new(4, 4).to_string(), "4");
        assert_eq!(LineSpan::new(4, 9).to_string(), "4-9");
    }

    #[test]
    fn test_line_counts_from_categories() {
        let counts = LineCounts::from_categories([
            LineCategory::Code,
            LineCategory::Comment,
            LineCategory::Blank,
            LineCategory::Code,
        ]);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.code, 2);
        assert_eq!(counts.comments, 1);
        assert_eq!(counts.blanks, 1);
        assert!(counts.is_consistent());
    }

    #[test]
    fn test_file_report_serializes_flat() {
        let report = FileReport {
            path: "a.py".to_string(),
            counts: LineCounts {
                total: 2,
                code: 1,
                comments: 1,
                blanks: 0,
            },
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["path"], "a.py");
        assert_eq!(value["total"], 2);
        assert_eq!(value["comments"], 1);
    }

    #[test]
    fn test_line_counts_add() {
        let mut a = LineCounts {
            total: 3,
            code: 1,
            comments: 1,
            blanks: 1,
        };
        a.add(&LineCounts {
            total: 2,
            code: 2,
            comments: 0,
            blanks: 0,
        });
        assert_eq!(a.total, 5);
        assert_eq!(a.code, 3);
        assert!(a.is_consistent());
    }
}

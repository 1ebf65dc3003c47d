//! Per-line classification.
//!
//! Three independent markings over the file's lines are combined with a
//! fixed precedence: docstring span, then comment token, then blank text.
//! Anything left is code. A line holding both code and a trailing comment
//! counts as a comment; lines are never split.

use std::borrow::Cow;
use std::collections::BTreeSet;

use super::{LineCategory, LineSpan, SourceLine};

/// Rewrite lone `\r` line terminators as `\n`.
///
/// Python ends a line at `\r`, `\n` or `\r\n`; tree-sitter rows and
/// [`split_lines`] only know the last two.
pub fn normalize_newlines(source: &str) -> Cow<'_, str> {
    if !source.contains('\r') {
        return Cow::Borrowed(source);
    }

    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' && chars.peek() != Some(&'\n') {
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Split text into physical lines.
///
/// `\r\n` and `\n` both terminate a line; a final terminator does not
/// start an extra empty line.
pub fn split_lines(source: &str) -> Vec<&str> {
    source.lines().collect()
}

/// Line markings, indexed by `line - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMarks {
    pub docstring: Vec<bool>,
    pub comment: Vec<bool>,
    pub blank: Vec<bool>,
}

impl LineMarks {
    /// Build markings for `lines` from comment line numbers and docstring spans.
    pub fn new(lines: &[&str], comment_lines: &BTreeSet<usize>, spans: &[LineSpan]) -> Self {
        let count = lines.len();

        let docstring = (1..=count)
            .map(|line| spans.iter().any(|span| span.contains(line)))
            .collect();

        let mut comment = vec![false; count];
        for line in comment_lines {
            if let Some(mark) = line.checked_sub(1).and_then(|i| comment.get_mut(i)) {
                *mark = true;
            }
        }

        let blank = lines.iter().map(|l| l.trim().is_empty()).collect();

        Self {
            docstring,
            comment,
            blank,
        }
    }

    /// Number of lines covered.
    pub fn len(&self) -> usize {
        self.blank.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blank.is_empty()
    }

    /// The verdict for the line at `index` (0-based).
    pub fn category(&self, index: usize) -> LineCategory {
        if self.docstring[index] || self.comment[index] {
            LineCategory::Comment
        } else if self.blank[index] {
            LineCategory::Blank
        } else {
            LineCategory::Code
        }
    }

    /// Verdicts for every line, in order.
    pub fn categories(&self) -> impl Iterator<Item = LineCategory> + '_ {
        (0..self.len()).map(move |i| self.category(i))
    }
}

/// Classify every line of `source`.
pub fn classify_lines(
    source: &str,
    comment_lines: &BTreeSet<usize>,
    spans: &[LineSpan],
) -> Vec<SourceLine> {
    let lines = split_lines(source);
    let marks = LineMarks::new(&lines, comment_lines, spans);

    lines
        .iter()
        .zip(marks.categories())
        .enumerate()
        .map(|(i, (text, category))| SourceLine {
            number: i + 1,
            text: (*text).to_string(),
            category,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(source: &str, comments: &[usize], spans: &[LineSpan]) -> Vec<LineCategory> {
        let comments: BTreeSet<usize> = comments.iter().copied().collect();
        classify_lines(source, &comments, spans)
            .into_iter()
            .map(|l| l.category)
            .collect()
    }

    #[test]
    fn test_split_lines() {
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\r\n\r\nb"), vec!["a", "", "b"]);
        assert_eq!(split_lines("a\n\n"), vec!["a", ""]);
    }

    #[test]
    fn test_normalize_newlines() {
        assert!(matches!(normalize_newlines("a\nb\n"), Cow::Borrowed(_)));
        assert_eq!(normalize_newlines("a\rb\r"), "a\nb\n");
        assert_eq!(normalize_newlines("a\r\nb\r\rc"), "a\r\nb\n\nc");
        assert_eq!(split_lines(&normalize_newlines("x = 1\r# c\ry = 2\r")).len(), 3);
    }

    #[test]
    fn test_whitespace_only_lines_are_blank() {
        let cats = categories("x = 1\n    \n\t \t\n\ny = 2\n", &[], &[]);
        assert_eq!(
            cats,
            vec![
                LineCategory::Code,
                LineCategory::Blank,
                LineCategory::Blank,
                LineCategory::Blank,
                LineCategory::Code,
            ]
        );
    }

    #[test]
    fn test_span_dominates_blank() {
        let source = "def f():\n    \"\"\"a\n\n    b\"\"\"\n";
        let cats = categories(source, &[], &[LineSpan::new(2, 4)]);
        assert_eq!(
            cats,
            vec![
                LineCategory::Code,
                LineCategory::Comment,
                LineCategory::Comment,
                LineCategory::Comment,
            ]
        );
    }

    #[test]
    fn test_trailing_comment_counts_as_comment() {
        let cats = categories("y = 5  # set y\n", &[1], &[]);
        assert_eq!(cats, vec![LineCategory::Comment]);
    }

    #[test]
    fn test_out_of_range_marks_are_ignored() {
        let cats = categories("x = 1\n", &[0, 9], &[LineSpan::new(3, 4)]);
        assert_eq!(cats, vec![LineCategory::Code]);
    }

    #[test]
    fn test_line_numbers_and_text() {
        let comments = BTreeSet::from([2]);
        let lines = classify_lines("a = 1\n# note\n", &comments, &[]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[0].text, "a = 1");
        assert_eq!(lines[1].number, 2);
        assert_eq!(lines[1].category, LineCategory::Comment);
    }
}

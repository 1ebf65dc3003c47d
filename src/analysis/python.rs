//! Python line analyzer using tree-sitter.

use std::collections::BTreeSet;

use tree_sitter::{Language, Parser};

use super::{
    classify, comments, docstrings, AnalysisError, FileReport, LineCounts, LineSpan, ParsedFile,
    SourceLine,
};

/// Classifies the lines of Python source files.
///
/// Note: tree_sitter::Parser is not Sync, so a parser is created per call
/// and the analyzer itself can be shared across threads.
pub struct PythonAnalyzer {
    language: Language,
}

impl PythonAnalyzer {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> Result<Parser, AnalysisError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| AnalysisError::Parser(e.to_string()))?;
        Ok(parser)
    }

    /// Parse source text into a tree.
    ///
    /// Syntax errors do not fail here; they are left as ERROR/MISSING nodes
    /// for the scanner and locator to report.
    pub fn parse(&self, source: &str) -> Result<ParsedFile, AnalysisError> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| AnalysisError::Parser("failed to parse source".to_string()))?;

        Ok(ParsedFile {
            tree,
            source: source.to_string(),
        })
    }

    /// Line numbers holding a comment token.
    pub fn comment_lines(&self, parsed: &ParsedFile) -> Result<BTreeSet<usize>, AnalysisError> {
        comments::comment_lines(&self.language, parsed)
    }

    /// Line spans of module, class and function docstrings.
    pub fn docstring_spans(&self, parsed: &ParsedFile) -> Result<Vec<LineSpan>, AnalysisError> {
        docstrings::docstring_spans(&self.language, parsed)
    }

    /// Classify every line of `source`.
    pub fn classify(&self, source: &str) -> Result<Vec<SourceLine>, AnalysisError> {
        self.classify_file(source)
    }

    /// Count the lines of one file.
    pub fn analyze(&self, path: &str, source: &str) -> Result<FileReport, AnalysisError> {
        let lines = self.classify_file(source)?;
        let counts = LineCounts::from_categories(lines.iter().map(|l| l.category));

        Ok(FileReport {
            path: path.to_string(),
            counts,
        })
    }

    fn classify_file(&self, source: &str) -> Result<Vec<SourceLine>, AnalysisError> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let source = classify::normalize_newlines(source);

        let parsed = self.parse(&source)?;
        let comment_lines = self.comment_lines(&parsed)?;
        let spans = self.docstring_spans(&parsed)?;

        Ok(classify::classify_lines(&source, &comment_lines, &spans))
    }
}

impl Default for PythonAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{ErrorKind, LineCategory};

    fn counts(source: &str) -> LineCounts {
        PythonAnalyzer::new().analyze("test.py", source).unwrap().counts
    }

    #[test]
    fn test_empty_file() {
        let c = counts("");
        assert_eq!(c, LineCounts::default());
    }

    #[test]
    fn test_module_docstring_vs_assignment() {
        let doc = counts("\"\"\"doc\"\"\"\n");
        assert_eq!(doc.comments, 1);
        assert_eq!(doc.code, 0);

        let assigned = counts("x = \"\"\"doc\"\"\"\n");
        assert_eq!(assigned.code, 1);
        assert_eq!(assigned.comments, 0);
    }

    #[test]
    fn test_mixed_file() {
        let source = r##"#!/usr/bin/env python3
"""Module doc.

Spans lines.
"""
import os


def main():
    """Entry point."""
    y = 5  # set y
    s = "# not a comment"
    "not a docstring"
    return y
"##;
        let c = counts(source);
        assert_eq!(c.total, 14);
        // shebang, 4 module doc lines, function doc, trailing comment
        assert_eq!(c.comments, 7);
        assert_eq!(c.blanks, 2);
        // import, def, s =, bare string, return
        assert_eq!(c.code, 5);
        assert!(c.is_consistent());
    }

    #[test]
    fn test_classify_reports_each_line() {
        let lines = PythonAnalyzer::new()
            .classify("x = 1\n\n# done\n")
            .unwrap();
        let cats: Vec<_> = lines.iter().map(|l| l.category).collect();
        assert_eq!(
            cats,
            vec![LineCategory::Code, LineCategory::Blank, LineCategory::Comment]
        );
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let c = counts("\u{feff}\"\"\"doc\"\"\"\nx = 1\n");
        assert_eq!(c.total, 2);
        assert_eq!(c.comments, 1);
        assert_eq!(c.code, 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let c = counts("x = 1\r\n\r\n# c\r\n");
        assert_eq!(c.total, 3);
        assert_eq!(c.code, 1);
        assert_eq!(c.blanks, 1);
        assert_eq!(c.comments, 1);
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let c = counts("x = 1\r# c\ry = 2\r");
        assert_eq!(c.total, 3);
        assert_eq!(c.code, 2);
        assert_eq!(c.comments, 1);
    }

    fn error_kind(source: &str) -> ErrorKind {
        PythonAnalyzer::new()
            .analyze("bad.py", source)
            .unwrap_err()
            .kind()
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let err = PythonAnalyzer::new()
            .analyze("bad.py", "def broken(:\n    pass\n")
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { line: 1, .. }), "{err:?}");
        assert_eq!(error_kind("print \"hello\"\n"), ErrorKind::Parse);
        assert_eq!(error_kind("exec \"x\"\n"), ErrorKind::Parse);
    }

    #[test]
    fn test_tokenizer_failures_are_lex_errors() {
        assert_eq!(error_kind("x = 1 $ 2\n"), ErrorKind::Lex);
        assert_eq!(error_kind("x = \"abc\ny = 1\n"), ErrorKind::Lex);
        assert_eq!(error_kind("x = \"\"\"abc\ny = 1\n"), ErrorKind::Lex);
        assert_eq!(error_kind("x = 0777\n"), ErrorKind::Lex);
        assert_eq!(error_kind("x = `y`\n"), ErrorKind::Lex);
    }

    #[test]
    fn test_bad_indentation_is_lex_error() {
        assert_eq!(error_kind("def f():\nreturn 1\n"), ErrorKind::Lex);
        assert_eq!(error_kind("x = 1\n    y = 2\n"), ErrorKind::Lex);
        assert_eq!(error_kind("if x:\n        a = 1\n    b = 2\n"), ErrorKind::Lex);
    }
}

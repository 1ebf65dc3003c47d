//! Lexical comment scanning.
//!
//! Comments are tokens in the tree-sitter-python grammar, so a `#` inside a
//! string or bytes literal is part of that literal's token and never shows
//! up here.

use std::collections::BTreeSet;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Query, QueryCursor};

use super::{lexical, AnalysisError, ParsedFile};

/// Tree-sitter query matching every comment token, including a shebang
/// and an encoding declaration.
const COMMENT_QUERY: &str = r#"
(comment) @comment
"#;

/// Collect the 1-indexed line numbers holding a comment token.
///
/// Fails with [`AnalysisError::Lex`] if the tokenizer could not make sense
/// of the text.
pub fn comment_lines(
    language: &Language,
    parsed: &ParsedFile,
) -> Result<BTreeSet<usize>, AnalysisError> {
    lexical::check(parsed)?;

    let query =
        Query::new(language, COMMENT_QUERY).map_err(|e| AnalysisError::Parser(e.to_string()))?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, parsed.tree.root_node(), parsed.source_bytes());

    let mut lines = BTreeSet::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            lines.insert(capture.node.start_position().row + 1);
        }
    }

    Ok(lines)
}

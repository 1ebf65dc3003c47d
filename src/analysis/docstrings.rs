//! Docstring location.
//!
//! A docstring is the first statement of a module, function, or class body
//! when that statement is nothing but a `str` literal. Every other string
//! statement is ordinary code.

use std::collections::HashSet;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Query, QueryCursor};

use super::{AnalysisError, LineSpan, ParsedFile};

/// Tree-sitter query for the bodies that may carry a docstring.
///
/// `async def` parses as `function_definition`, and decorated definitions
/// wrap the same nodes, so both are covered at any nesting depth.
const BODY_QUERY: &str = r#"
(function_definition body: (_) @body)
(class_definition body: (_) @body)
"#;

/// Find the line spans of every docstring in the file.
///
/// Spans are returned sorted by start line. Fails with
/// [`AnalysisError::Parse`] if the tree has syntax errors.
pub fn docstring_spans(
    language: &Language,
    parsed: &ParsedFile,
) -> Result<Vec<LineSpan>, AnalysisError> {
    if let Some(node) = parsed.find_error_node(|n| n.is_error() || n.is_missing()) {
        let message = if node.is_missing() {
            format!("expected {}", node.kind())
        } else {
            "invalid syntax".to_string()
        };
        return Err(AnalysisError::Parse {
            line: node.start_position().row + 1,
            message,
        });
    }

    if let Some(node) = parsed.find_node(|n| is_python2_statement(parsed, n)) {
        let keyword = if node.kind() == "exec_statement" {
            "exec"
        } else {
            "print"
        };
        return Err(AnalysisError::Parse {
            line: node.start_position().row + 1,
            message: format!("Missing parentheses in call to '{}'", keyword),
        });
    }

    let root = parsed.tree.root_node();
    let mut bodies = vec![root];

    let query =
        Query::new(language, BODY_QUERY).map_err(|e| AnalysisError::Parser(e.to_string()))?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, root, parsed.source_bytes());

    while let Some(m) = matches.next() {
        for capture in m.captures {
            bodies.push(capture.node);
        }
    }

    let mut seen = HashSet::new();
    let mut spans: Vec<LineSpan> = bodies
        .into_iter()
        .filter(|body| seen.insert(body.id()))
        .filter_map(first_statement)
        .filter(|stmt| is_docstring(parsed, *stmt))
        .map(LineSpan::from_node)
        .collect();

    spans.sort();
    Ok(spans)
}

/// `print x` and `exec code` statements, which only Python 2 accepts.
///
/// The grammar also reads `print (x)` as a print statement; Python 3 sees
/// a call there, so a parenthesized first argument is allowed.
fn is_python2_statement(parsed: &ParsedFile, node: Node) -> bool {
    match node.kind() {
        "exec_statement" => true,
        "print_statement" => {
            let mut cursor = node.walk();
            let has_chevron = node
                .named_children(&mut cursor)
                .any(|n| n.kind() == "chevron");
            let called = node
                .child_by_field_name("argument")
                .is_some_and(|arg| parsed.node_text(arg).starts_with('('));
            has_chevron || !called
        }
        _ => false,
    }
}

/// The first statement of a body; comments are not statements.
fn first_statement(body: Node) -> Option<Node> {
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment");
    first
}

/// Whether a statement is a bare string-literal expression statement.
fn is_docstring(parsed: &ParsedFile, stmt: Node) -> bool {
    if stmt.kind() != "expression_statement" {
        return false;
    }

    let mut cursor = stmt.walk();
    let exprs: Vec<_> = stmt
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect();

    // `"a", "b"` is a tuple, not a string
    if exprs.len() != 1 {
        return false;
    }

    is_str_literal(parsed, exprs[0])
}

/// Whether an expression is a plain `str` constant.
fn is_str_literal(parsed: &ParsedFile, expr: Node) -> bool {
    match expr.kind() {
        "string" => is_plain_string(parsed, expr),
        "concatenated_string" => {
            let mut cursor = expr.walk();
            let parts: Vec<_> = expr
                .named_children(&mut cursor)
                .filter(|n| n.kind() != "comment")
                .collect();
            !parts.is_empty() && parts.iter().all(|p| is_plain_string(parsed, *p))
        }
        "parenthesized_expression" => {
            let mut cursor = expr.walk();
            let inner: Vec<_> = expr
                .named_children(&mut cursor)
                .filter(|n| n.kind() != "comment")
                .collect();
            inner.len() == 1 && is_str_literal(parsed, inner[0])
        }
        _ => false,
    }
}

/// A `string` node without an `f` (formatted) or `b` (bytes) prefix.
fn is_plain_string(parsed: &ParsedFile, node: Node) -> bool {
    if node.kind() != "string" {
        return false;
    }
    let text = parsed.node_text(node);
    let prefix: String = text.chars().take_while(|c| *c != '"' && *c != '\'').collect();
    !prefix
        .chars()
        .any(|c| matches!(c.to_ascii_lowercase(), 'f' | 'b'))
}

//! Token-level validity checks.
//!
//! tree-sitter recovers from input that Python's tokenizer rejects, and its
//! grammar still accepts a few Python 2 token forms. These checks restore
//! the tokenizer's verdict so such files fail with a lexical error.

use tree_sitter::Node;

use super::{AnalysisError, ParsedFile};

const UNTERMINATED: &str = "unterminated string literal";

/// Fail with [`AnalysisError::Lex`] at the first line Python's tokenizer
/// would reject.
///
/// Indentation is only checked on trees without syntax errors; error
/// recovery can reattach statements at arbitrary depths.
pub fn check(parsed: &ParsedFile) -> Result<(), AnalysisError> {
    let check_layout = !parsed.has_errors();
    let mut first: Option<(usize, String)> = None;

    parsed.for_each_node(|node| {
        let found = token_error(parsed, node)
            .map(|message| (node.start_position().row + 1, message))
            .or_else(|| check_layout.then(|| indentation_error(node)).flatten());

        if let Some((line, message)) = found {
            if first.as_ref().map_or(true, |(best, _)| line < *best) {
                first = Some((line, message));
            }
        }
    });

    match first {
        Some((line, message)) => Err(AnalysisError::Lex { line, message }),
        None => Ok(()),
    }
}

fn token_error(parsed: &ParsedFile, node: Node) -> Option<String> {
    match node.kind() {
        "string_end" if node.is_missing() => Some(UNTERMINATED.to_string()),
        // Python 2 repr quotes
        "string_start" if parsed.node_text(node).ends_with('`') => {
            Some("invalid character '`'".to_string())
        }
        "string_start" if !is_terminated(node) => Some(UNTERMINATED.to_string()),
        "integer" => integer_error(parsed.node_text(node)),
        _ if node.is_error() && node.child_count() == 0 => {
            Some(format!("invalid token {:?}", parsed.node_text(node)))
        }
        _ => None,
    }
}

/// Whether a string's opening delimiter is followed by a real closing one.
fn is_terminated(start: Node) -> bool {
    let mut next = start.next_sibling();
    while let Some(node) = next {
        match node.kind() {
            "string_end" => return !node.is_missing(),
            "string_start" => return false,
            _ => next = node.next_sibling(),
        }
    }
    false
}

/// Python 2 integer forms: `0777` octals and `10L` longs.
fn integer_error(text: &str) -> Option<String> {
    let digits: String = text
        .chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if digits.ends_with('l') {
        return Some(format!("invalid integer literal {:?}", text));
    }
    if digits.ends_with('j') || ["0x", "0o", "0b"].iter().any(|p| digits.starts_with(p)) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') && digits.chars().any(|c| c != '0') {
        return Some("leading zeros in decimal integer literals are not permitted".to_string());
    }
    None
}

/// Indentation problems among the statements of one module or block.
///
/// Every statement that starts a line must sit at the container's column:
/// 0 for the module, the first statement's column for a block. A block
/// with no statements is a missing indent.
fn indentation_error(node: Node) -> Option<(usize, String)> {
    let mut column = match node.kind() {
        "module" => Some(0),
        "block" => None,
        _ => return None,
    };

    let mut cursor = node.walk();
    let statements: Vec<Node> = node
        .named_children(&mut cursor)
        .filter(|n| !n.is_extra())
        .collect();

    if statements.is_empty() && node.kind() == "block" {
        return Some((
            node.start_position().row + 2,
            "expected an indented block".to_string(),
        ));
    }

    let mut prev_end_row: Option<usize> = None;
    for stmt in statements {
        let start = stmt.start_position();
        let leads_line = prev_end_row.map_or(true, |row| start.row > row);
        let expected = *column.get_or_insert(start.column);

        if leads_line && start.column != expected {
            let message = if start.column > expected {
                "unexpected indent"
            } else {
                "unindent does not match any outer indentation level"
            };
            return Some((start.row + 1, message.to_string()));
        }
        prev_end_row = Some(stmt.end_position().row);
    }
    None
}

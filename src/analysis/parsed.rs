//! Parsed source held alongside its tree-sitter tree.

use tree_sitter::Node;

/// Holds a parsed tree-sitter tree and the text it was built from.
///
/// The comment scanner and the docstring locator both read from the same
/// tree, so a file is parsed exactly once per analysis.
pub struct ParsedFile {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// The decoded source text.
    pub source: String,
}

impl ParsedFile {
    /// Get the source as bytes, for tree-sitter queries.
    pub fn source_bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }

    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// Whether the tree contains any ERROR or MISSING nodes.
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// First node in source order matching `pred`.
    pub fn find_node<F>(&self, pred: F) -> Option<Node<'_>>
    where
        F: Fn(Node) -> bool,
    {
        self.find_first(pred, |_| true)
    }

    /// Depth-first search for the first node matching `pred`, only
    /// descending into subtrees that contain errors.
    pub fn find_error_node<F>(&self, pred: F) -> Option<Node<'_>>
    where
        F: Fn(Node) -> bool,
    {
        if !self.has_errors() {
            return None;
        }
        self.find_first(pred, |n| n.has_error())
    }

    /// Visit every node in source order.
    pub fn for_each_node<F>(&self, mut visit: F)
    where
        F: FnMut(Node),
    {
        self.find_first(
            |n| {
                visit(n);
                false
            },
            |_| true,
        );
    }

    fn find_first<F, D>(&self, mut pred: F, descend: D) -> Option<Node<'_>>
    where
        F: FnMut(Node) -> bool,
        D: Fn(Node) -> bool,
    {
        let mut cursor = self.tree.root_node().walk();

        loop {
            let node = cursor.node();
            if pred(node) {
                return Some(node);
            }
            if descend(node) && cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return None;
                }
            }
        }
    }
}

//! Presentation: fold tree formatters.

use crate::error::FoldError;
use crate::tree::{FoldNode, FoldTree};

/// Indented outline, `+` for folded nodes and `-` for unfolded ones.
pub fn format_tree_text(tree: &FoldTree) -> String {
    let mut lines = Vec::new();
    for (name, child) in &tree.root().children {
        push_lines(&mut lines, name, child, 0);
    }
    lines.join("\n")
}

fn push_lines(lines: &mut Vec<String>, name: &str, node: &FoldNode, depth: usize) {
    let glyph = if node.folded { '+' } else { '-' };
    lines.push(format!("{}{} {}", "  ".repeat(depth), glyph, name));
    for (child_name, child) in &node.children {
        push_lines(lines, child_name, child, depth + 1);
    }
}

pub fn format_tree_json(tree: &FoldTree) -> Result<String, FoldError> {
    serde_json::to_string_pretty(tree)
        .map_err(|e| FoldError::Storage(crate::error::StorageError::from(e)))
}

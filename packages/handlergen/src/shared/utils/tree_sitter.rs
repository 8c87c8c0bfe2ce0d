//! Tree-sitter Utility Functions
//!
//! Common utilities for working with tree-sitter AST nodes.
//! Shared by the Go declaration extractor and the builtin formatter.

use crate::shared::models::Span;
use tree_sitter::Node;

// ═══════════════════════════════════════════════════════════════════════════
// Node Traversal Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Find a direct child node by kind
///
/// # Example
/// ```ignore
/// let name_node = find_child_by_kind(&clause, "package_identifier");
/// ```
#[inline]
pub fn find_child_by_kind<'tree>(node: &Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.kind() == kind {
                return Some(child);
            }
        }
    }
    None
}

/// All direct children, in source order
pub fn children<'tree>(node: &Node<'tree>) -> Vec<Node<'tree>> {
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .collect()
}

/// Find the first descendant (depth-first, source order) of the given kind
pub fn find_descendant_by_kind<'tree>(node: &Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    let mut stack = vec![*node];
    while let Some(current) = stack.pop() {
        if current.kind() == kind {
            return Some(current);
        }
        for i in (0..current.child_count()).rev() {
            if let Some(child) = current.child(i) {
                stack.push(child);
            }
        }
    }
    None
}

/// Find the first ERROR or MISSING node (depth-first, source order)
pub fn first_error_node<'tree>(node: &Node<'tree>) -> Option<Node<'tree>> {
    let mut stack = vec![*node];
    while let Some(current) = stack.pop() {
        if current.is_error() || current.is_missing() {
            return Some(current);
        }
        if !current.has_error() {
            continue;
        }
        for i in (0..current.child_count()).rev() {
            if let Some(child) = current.child(i) {
                stack.push(child);
            }
        }
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
// Text Extraction Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Extract text content from a node
#[inline]
pub fn extract_node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    source.get(node.byte_range()).unwrap_or("")
}

/// Extract text content from a node as owned String
#[inline]
pub fn extract_node_text_owned(node: &Node, source: &str) -> String {
    extract_node_text(node, source).to_string()
}

// ═══════════════════════════════════════════════════════════════════════════
// Comment Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Collect the doc comment group attached to `node`.
///
/// A comment belongs to the group when it is a sibling directly preceding the
/// node (or the previous comment of the group) with no blank line between them.
/// Trailing comments sharing a line with earlier code are not part of the group.
/// Comment text is returned verbatim, in source order.
pub fn preceding_comments(node: &Node, source: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut next_row = node.start_position().row;
    // Terminator tokens ("\n", ";") are anonymous siblings; only named nodes count.
    let mut current = node.prev_named_sibling();

    while let Some(sibling) = current {
        if sibling.kind() != "comment" || sibling.end_position().row + 1 != next_row {
            break;
        }
        if let Some(before) = sibling.prev_named_sibling() {
            if before.kind() != "comment" && before.end_position().row == sibling.start_position().row {
                break;
            }
        }
        lines.push(extract_node_text_owned(&sibling, source));
        next_row = sibling.start_position().row;
        current = sibling.prev_named_sibling();
    }

    lines.reverse();
    lines
}

// ═══════════════════════════════════════════════════════════════════════════
// Span Conversion Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Convert tree-sitter node to Span (1-indexed lines)
#[inline]
pub fn node_to_span(node: &Node) -> Span {
    let start_pos = node.start_position();
    let end_pos = node.end_position();

    Span::new(
        start_pos.row as u32 + 1, // 1-indexed
        start_pos.column as u32,
        end_pos.row as u32 + 1, // 1-indexed
        end_pos.column as u32,
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

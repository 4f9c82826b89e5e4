// BaseExtractor - per-file source access shared by the visitor and the evaluator

use std::path::{Path, PathBuf};
use tree_sitter::Node;

/// Source text and origin of the file currently being visited
pub struct BaseExtractor {
    pub file_path: PathBuf,
    pub content: String,
}

impl BaseExtractor {
    pub fn new(file_path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            content: content.into(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Get text from a tree-sitter node
    pub fn get_node_text(&self, node: &Node) -> String {
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        // Use byte slice but handle UTF-8 boundaries properly
        let content_bytes = self.content.as_bytes();
        if start_byte < content_bytes.len() && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }

    /// First direct child of the given kind
    #[allow(clippy::manual_find)] // Manual loop required for borrow checker
    pub fn find_child<'a>(&self, node: &Node<'a>, child_type: &str) -> Option<Node<'a>> {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == child_type {
                return Some(child);
            }
        }
        None
    }

    /// Named children, skipping comments the grammar places anywhere as extras
    pub fn named_children<'a>(&self, node: &Node<'a>) -> Vec<Node<'a>> {
        let mut cursor = node.walk();
        let children = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .collect();
        children
    }

    /// First named child that follows an anonymous `token` child (e.g. the value after `=`)
    pub fn named_child_after<'a>(&self, node: &Node<'a>, token: &str) -> Option<Node<'a>> {
        let mut cursor = node.walk();
        let mut found_token = false;

        for child in node.children(&mut cursor) {
            if found_token && child.is_named() && child.kind() != "comment" {
                return Some(child);
            }
            if !child.is_named() && child.kind() == token {
                found_token = true;
            }
        }
        None
    }

    /// Named child that precedes an anonymous `token` child (e.g. the key before `=>`)
    pub fn named_child_before<'a>(&self, node: &Node<'a>, token: &str) -> Option<Node<'a>> {
        let mut cursor = node.walk();
        let mut last_named = None;

        for child in node.children(&mut cursor) {
            if !child.is_named() && child.kind() == token {
                return last_named;
            }
            if child.is_named() && child.kind() != "comment" {
                last_named = Some(child);
            }
        }
        None
    }

    pub fn has_token(&self, node: &Node, token: &str) -> bool {
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .any(|child| !child.is_named() && child.kind() == token);
        found
    }
}

//! PHP language support - tree-sitter grammar loading and parsing
//!
//! The parser is error tolerant, so a tree that contains ERROR or MISSING
//! nodes is reported as a parse failure for the whole file.

use crate::error::{ExtractorError, Result};
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

/// File extension scanned by default.
pub const DEFAULT_EXTENSION: &str = "php";

/// Get the tree-sitter grammar for PHP (with `<?php` tag handling).
pub fn php_language() -> tree_sitter::Language {
    tree_sitter_php::LANGUAGE_PHP.into()
}

/// Create a parser configured for PHP.
pub fn php_parser() -> Result<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&php_language())
        .map_err(|e| ExtractorError::Language(e.to_string()))?;
    Ok(parser)
}

/// Parse `content`, rejecting trees that contain syntax errors.
///
/// `path` is only used for the error report.
pub fn parse_php(parser: &mut Parser, path: &Path, content: &str) -> Result<Tree> {
    let tree = parser
        .parse(content, None)
        .ok_or_else(|| ExtractorError::Parse {
            path: path.to_path_buf(),
            message: "Parser returned no syntax tree".to_string(),
            line: 1,
            column: 1,
        })?;

    let root = tree.root_node();
    if !root.has_error() {
        return Ok(tree);
    }

    let failing = first_error_node(root).unwrap_or(root);
    let position = failing.start_position();
    Err(ExtractorError::Parse {
        path: path.to_path_buf(),
        message: describe_error(failing, content),
        line: position.row + 1,
        column: position.column + 1,
    })
}

/// Depth-first search for the first ERROR or MISSING node.
fn first_error_node(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            if let Some(found) = first_error_node(child) {
                return Some(found);
            }
        }
    }
    None
}

fn describe_error(node: Node, content: &str) -> String {
    if node.is_missing() {
        return format!("Syntax error, missing '{}'", node.kind());
    }

    let text = node.utf8_text(content.as_bytes()).unwrap_or("");
    let snippet: String = text
        .lines()
        .next()
        .unwrap_or("")
        .trim()
        .chars()
        .take(32)
        .collect();

    if snippet.is_empty() {
        "Syntax error".to_string()
    } else {
        format!("Syntax error, unexpected '{}'", snippet)
    }
}

// PHP visitor - helper utilities
// Modifier parsing and declaration-name lookup

use super::ClassVisitor;
use tree_sitter::Node;

/// Modifiers written on a declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct Modifiers {
    pub public: bool,
    pub protected: bool,
    pub private: bool,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_final: bool,
}

impl Modifiers {
    /// True when no visibility keyword was written.
    pub fn has_no_visibility(&self) -> bool {
        !(self.public || self.protected || self.private)
    }

    /// Members without a visibility keyword are public.
    pub fn is_public(&self) -> bool {
        self.public || self.has_no_visibility()
    }
}

/// Extract modifiers from the direct children of a declaration node
pub(super) fn extract_modifiers(visitor: &ClassVisitor, node: &Node) -> Modifiers {
    let mut modifiers = Modifiers::default();
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        match child.kind() {
            "visibility_modifier" => {
                let text = visitor.get_base().get_node_text(&child).to_ascii_lowercase();
                // Asymmetric `private(set)` only narrows writes.
                if text.contains("(set)") {
                    continue;
                }
                match text.trim() {
                    "public" => modifiers.public = true,
                    "protected" => modifiers.protected = true,
                    "private" => modifiers.private = true,
                    _ => {}
                }
            }
            "static_modifier" => modifiers.is_static = true,
            "abstract_modifier" => modifiers.is_abstract = true,
            "final_modifier" => modifiers.is_final = true,
            _ => {}
        }
    }

    modifiers
}

/// Name of a declaration, only when it is a plain identifier
pub(super) fn declaration_name(visitor: &ClassVisitor, node: &Node) -> Option<String> {
    let name_node = node
        .child_by_field_name("name")
        .or_else(|| visitor.get_base().find_child(node, "name"))?;

    if name_node.kind() != "name" {
        return None;
    }

    let name = visitor.get_base().get_node_text(&name_node);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Body `{ ... }` of a class-like declaration
pub(super) fn declaration_body<'a>(visitor: &ClassVisitor, node: &Node<'a>) -> Option<Node<'a>> {
    node.child_by_field_name("body")
        .or_else(|| visitor.get_base().find_child(node, "declaration_list"))
}

/// First segment of a possibly qualified name: `\Foo\Bar` -> `Foo`
pub(super) fn first_name_segment(text: &str) -> &str {
    let trimmed = text.trim().trim_start_matches('\\');
    let trimmed = trimmed.strip_prefix("namespace\\").unwrap_or(trimmed);
    trimmed.split('\\').next().unwrap_or(trimmed).trim()
}

/// Namespace text without the leading separator: `\App\Models` -> `App\Models`
pub(super) fn normalize_namespace(text: &str) -> String {
    text.split('\\')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_name_segment() {
        assert_eq!(first_name_segment("FOO"), "FOO");
        assert_eq!(first_name_segment("\\PHP_EOL"), "PHP_EOL");
        assert_eq!(first_name_segment("Foo\\Bar\\BAZ"), "Foo");
        assert_eq!(first_name_segment("\\Foo\\BAZ"), "Foo");
    }

    #[test]
    fn test_normalize_namespace() {
        assert_eq!(normalize_namespace("\\App\\Models"), "App\\Models");
        assert_eq!(normalize_namespace("App \\ Models"), "App\\Models");
    }

    #[test]
    fn test_missing_visibility_is_public() {
        let modifiers = Modifiers {
            is_static: true,
            ..Modifiers::default()
        };
        assert!(modifiers.is_public());

        let private = Modifiers {
            private: true,
            ..Modifiers::default()
        };
        assert!(!private.is_public());
    }
}

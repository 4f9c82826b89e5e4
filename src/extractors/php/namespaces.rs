// PHP visitor - namespace tracking and top-level statement dispatch
//
// `namespace Foo;` applies to every following top-level statement until the
// next namespace declaration. `namespace Foo { ... }` applies to its body.
// Statements outside a named namespace are not extracted, and only immediate
// statements are dispatched (nothing nested in functions or conditionals).

use super::helpers::normalize_namespace;
use super::types::{extract_class, extract_interface, extract_trait};
use super::ClassVisitor;
use crate::extractors::declarations::Declarations;
use tree_sitter::Node;

pub(super) fn visit_program(visitor: &ClassVisitor, root: Node, declarations: &mut Declarations) {
    let mut current_namespace: Option<String> = None;
    let mut cursor = root.walk();

    for child in root.children(&mut cursor) {
        if child.kind() == "namespace_definition" {
            let name = namespace_name(visitor, &child);
            match namespace_body(visitor, &child) {
                Some(body) => {
                    if let Some(namespace) = &name {
                        visit_namespace_body(visitor, namespace, body, declarations);
                    }
                    current_namespace = None;
                }
                None => current_namespace = name,
            }
            continue;
        }

        if let Some(namespace) = &current_namespace {
            dispatch_statement(visitor, namespace, child, declarations);
        }
    }
}

fn visit_namespace_body(
    visitor: &ClassVisitor,
    namespace: &str,
    body: Node,
    declarations: &mut Declarations,
) {
    let mut cursor = body.walk();
    for statement in body.children(&mut cursor) {
        dispatch_statement(visitor, namespace, statement, declarations);
    }
}

/// Build a model for a class-like declaration; anything else is ignored.
fn dispatch_statement(
    visitor: &ClassVisitor,
    namespace: &str,
    statement: Node,
    declarations: &mut Declarations,
) {
    match statement.kind() {
        "class_declaration" => {
            if let Some(class) = extract_class(visitor, namespace, statement) {
                declarations.classes.push(class);
            }
        }
        "interface_declaration" => {
            if let Some(interface) = extract_interface(visitor, namespace, statement) {
                declarations.interfaces.push(interface);
            }
        }
        "trait_declaration" => {
            if let Some(trait_model) = extract_trait(visitor, namespace, statement) {
                declarations.traits.push(trait_model);
            }
        }
        _ => {}
    }
}

fn namespace_name(visitor: &ClassVisitor, node: &Node) -> Option<String> {
    let name_node = node
        .child_by_field_name("name")
        .or_else(|| visitor.get_base().find_child(node, "namespace_name"))?;

    let name = normalize_namespace(&visitor.get_base().get_node_text(&name_node));
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn namespace_body<'a>(visitor: &ClassVisitor, node: &Node<'a>) -> Option<Node<'a>> {
    node.child_by_field_name("body")
        .or_else(|| visitor.get_base().find_child(node, "compound_statement"))
}

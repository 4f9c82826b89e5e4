// PHP visitor - type extraction (classes, interfaces, traits)

use super::helpers::{declaration_body, declaration_name, extract_modifiers};
use super::members::{extract_constant, extract_method, extract_property};
use super::ClassVisitor;
use crate::model::{ClassFlags, ClassModel, InterfaceModel, TraitModel};
use tree_sitter::Node;

/// Extract a class declaration with its constants, properties and methods
pub(super) fn extract_class(
    visitor: &ClassVisitor,
    namespace: &str,
    node: Node,
) -> Option<ClassModel> {
    let name = declaration_name(visitor, &node)?;
    let modifiers = extract_modifiers(visitor, &node);
    // `new class {}` is an expression and is never dispatched here
    let is_anonymous = node.kind() == "anonymous_class";

    let mut class = ClassModel::new(
        namespace,
        name,
        ClassFlags::build(modifiers.is_abstract, modifiers.is_final, is_anonymous),
    );

    if let Some(body) = declaration_body(visitor, &node) {
        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            match child.kind() {
                "const_declaration" => {
                    if let Some(constant) = extract_constant(visitor, child) {
                        class.add_constant(constant);
                    }
                }
                "property_declaration" => {
                    if let Some(property) = extract_property(visitor, child) {
                        class.add_property(property);
                    }
                }
                "method_declaration" => {
                    if let Some(method) = extract_method(visitor, child) {
                        class.add_method(method);
                    }
                }
                _ => {}
            }
        }
    }

    Some(class)
}

/// Extract an interface declaration: constants and methods only
pub(super) fn extract_interface(
    visitor: &ClassVisitor,
    namespace: &str,
    node: Node,
) -> Option<InterfaceModel> {
    let name = declaration_name(visitor, &node)?;
    let mut interface = InterfaceModel::new(namespace, name);

    if let Some(body) = declaration_body(visitor, &node) {
        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            match child.kind() {
                "const_declaration" => {
                    if let Some(constant) = extract_constant(visitor, child) {
                        interface.add_constant(constant);
                    }
                }
                "method_declaration" => {
                    if let Some(method) = extract_method(visitor, child) {
                        interface.add_method(method);
                    }
                }
                _ => {}
            }
        }
    }

    Some(interface)
}

/// Extract a trait declaration: properties and methods only
pub(super) fn extract_trait(
    visitor: &ClassVisitor,
    namespace: &str,
    node: Node,
) -> Option<TraitModel> {
    let name = declaration_name(visitor, &node)?;
    let mut trait_model = TraitModel::new(namespace, name);

    if let Some(body) = declaration_body(visitor, &node) {
        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            match child.kind() {
                "property_declaration" => {
                    if let Some(property) = extract_property(visitor, child) {
                        trait_model.add_property(property);
                    }
                }
                "method_declaration" => {
                    if let Some(method) = extract_method(visitor, child) {
                        trait_model.add_method(method);
                    }
                }
                _ => {}
            }
        }
    }

    Some(trait_model)
}

#[cfg(test)]
mod tests {
    use crate::extractors::php::test_support::visit_source;
    use crate::model::{ResolvedValue, TypeModel};

    #[test]
    fn test_class_modifiers() {
        let declarations = visit_source(
            r#"<?php
namespace App;
abstract class Base {}
final class Leaf {}
class Plain {}
"#,
        );

        let base = &declarations.classes[0];
        assert!(base.is_abstract());
        assert!(!base.is_final());
        assert!(!base.is_anonymous());

        let leaf = &declarations.classes[1];
        assert!(leaf.is_final());
        assert!(!leaf.is_abstract());

        assert!(declarations.classes[2].flags().is_empty());
    }

    #[test]
    fn test_interface_members() {
        let declarations = visit_source(
            r#"<?php
namespace App\Contracts;
interface Repository
{
    const PAGE_SIZE = 25;
    public function find(int $id);
    public static function create(): self;
}
"#,
        );

        let interface = &declarations.interfaces[0];
        assert_eq!(interface.fully_qualified_name(), "App\\Contracts\\Repository");
        assert_eq!(interface.constants().len(), 1);
        assert_eq!(interface.constants()[0].value(), &ResolvedValue::Int(25));

        let methods = interface.methods();
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].name(), "find");
        assert!(methods[0].is_public());
        assert!(!methods[0].is_abstract());
        assert!(methods[1].is_static());
    }

    #[test]
    fn test_trait_members() {
        let declarations = visit_source(
            r#"<?php
namespace App\Concerns;
trait Loggable
{
    protected $logger = null;
    private static $channels = ['app'];

    public function log(string $message): void {}
}
"#,
        );

        let trait_model = &declarations.traits[0];
        assert_eq!(trait_model.short_name(), "Loggable");

        let properties = trait_model.properties();
        assert_eq!(properties.len(), 2);
        assert_eq!(properties[0].name(), "logger");
        assert!(properties[0].is_protected());
        assert_eq!(properties[0].default_value(), &ResolvedValue::Null);
        assert!(properties[1].is_private());
        assert!(properties[1].is_static());

        assert_eq!(trait_model.methods()[0].name(), "log");
    }

    #[test]
    fn test_class_with_uses_and_comments_in_body() {
        let declarations = visit_source(
            r#"<?php
namespace App;
class Service
{
    use Loggable;

    // The default timeout.
    const TIMEOUT = 30;

    /** @var string */
    public $name = 'service';
}
"#,
        );

        let class = &declarations.classes[0];
        assert_eq!(class.constants().len(), 1);
        assert_eq!(class.properties().len(), 1);
        assert_eq!(
            class.properties()[0].default_value(),
            &ResolvedValue::String("service".to_string())
        );
    }
}

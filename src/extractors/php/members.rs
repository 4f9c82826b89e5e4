// PHP visitor - constant, property and method extraction

use super::helpers::extract_modifiers;
use super::ClassVisitor;
use crate::model::{
    ConstantModel, MethodFlags, MethodModel, PropertyFlags, PropertyModel, ResolvedValue,
};
use tree_sitter::Node;

/// Method names PHP treats as magic (compared lowercased).
pub const MAGIC_METHODS: &[&str] = &[
    "__construct",
    "__destruct",
    "__call",
    "__callstatic",
    "__get",
    "__set",
    "__isset",
    "__unset",
    "__sleep",
    "__wakeup",
    "__serialize",
    "__unserialize",
    "__tostring",
    "__set_state",
    "__clone",
    "__invoke",
    "__debuginfo",
];

/// A method's final flag is computed from its abstract modifier, not from
/// `final`.
pub const METHOD_FINAL_MIRRORS_ABSTRACT: bool = true;

/// Extract a `const` statement.
///
/// Only the first element of `const A = 1, B = 2;` is recorded.
pub(super) fn extract_constant(visitor: &ClassVisitor, node: Node) -> Option<ConstantModel> {
    let base = visitor.get_base();
    let element = base.find_child(&node, "const_element")?;
    let name_node = base.find_child(&element, "name")?;
    let name = base.get_node_text(&name_node);
    if name.is_empty() {
        return None;
    }

    let value = base
        .named_child_after(&element, "=")
        .map(|value| visitor.evaluate(value))
        .unwrap_or(ResolvedValue::Null);

    Some(ConstantModel::new(name, value))
}

/// Extract a property statement.
///
/// Only the first element of `public $a = 1, $b = 2;` is recorded.
pub(super) fn extract_property(visitor: &ClassVisitor, node: Node) -> Option<PropertyModel> {
    let base = visitor.get_base();
    let element = base.find_child(&node, "property_element")?;
    let name_node = element
        .child_by_field_name("name")
        .or_else(|| base.find_child(&element, "variable_name"))?;
    let name = base.get_node_text(&name_node).replace('$', "");
    if name.is_empty() {
        return None;
    }

    let modifiers = extract_modifiers(visitor, &node);
    let flags = PropertyFlags::build(
        modifiers.is_public(),
        modifiers.protected,
        modifiers.private,
        modifiers.is_static,
    );

    let default_value = property_default(visitor, &element)
        .map(|value| visitor.evaluate(value))
        .unwrap_or(ResolvedValue::Null);

    Some(PropertyModel::new(name, flags, default_value))
}

/// Extract a method declaration with its modifier and magic flags
pub(super) fn extract_method(visitor: &ClassVisitor, node: Node) -> Option<MethodModel> {
    let base = visitor.get_base();
    let name_node = node
        .child_by_field_name("name")
        .or_else(|| base.find_child(&node, "name"))?;
    let name = base.get_node_text(&name_node);
    if name.is_empty() {
        return None;
    }

    let modifiers = extract_modifiers(visitor, &node);
    let is_final = if METHOD_FINAL_MIRRORS_ABSTRACT {
        modifiers.is_abstract
    } else {
        modifiers.is_final
    };

    let flags = MethodFlags::build(
        modifiers.is_public(),
        modifiers.protected,
        modifiers.private,
        modifiers.is_static,
        modifiers.is_abstract,
        is_final,
        is_magic_method(&name),
    );

    Some(MethodModel::new(name, flags))
}

fn is_magic_method(name: &str) -> bool {
    let lowered = name.to_ascii_lowercase();
    MAGIC_METHODS.contains(&lowered.as_str())
}

/// Default value node of a property element, for both grammar shapes
/// (`= expr` directly, or wrapped in `property_initializer`).
fn property_default<'a>(visitor: &ClassVisitor, element: &Node<'a>) -> Option<Node<'a>> {
    let base = visitor.get_base();
    if let Some(value) = element.child_by_field_name("default_value") {
        if value.kind() != "property_initializer" {
            return Some(value);
        }
    }
    if let Some(initializer) = base.find_child(element, "property_initializer") {
        return base.named_child_after(&initializer, "=");
    }
    base.named_child_after(element, "=")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::php::test_support::visit_source;
    use crate::model::{PhpArray, TypeModel};

    const SHAPE_SOURCE: &str = r#"<?php
namespace App;

class Foo
{
    const X = 1;
    public static $y = "a";
    abstract protected function bar();
}
"#;

    #[test]
    fn test_static_property_and_abstract_method() {
        let declarations = visit_source(SHAPE_SOURCE);
        assert_eq!(declarations.classes.len(), 1);

        let class = &declarations.classes[0];
        assert_eq!(class.fully_qualified_name(), "App\\Foo");
        assert!(class.flags().is_empty());

        assert_eq!(class.constants().len(), 1);
        assert_eq!(class.constants()[0].name(), "X");
        assert_eq!(class.constants()[0].value(), &ResolvedValue::Int(1));

        let property = &class.properties()[0];
        assert_eq!(property.name(), "y");
        assert_eq!(property.default_value(), &ResolvedValue::from("a"));
        assert!(property.is_public());
        assert!(property.is_static());
        assert!(!property.is_protected());
        assert!(!property.is_private());

        let method = &class.methods()[0];
        assert_eq!(method.name(), "bar");
        assert!(method.is_protected());
        assert!(method.is_abstract());
        assert!(!method.is_public());
        assert!(!method.is_static());
        assert!(!method.is_magic());
    }

    #[test]
    fn test_method_final_mirrors_abstract() {
        let declarations = visit_source(
            r#"<?php
namespace App;
abstract class Shape
{
    abstract public function area();
    final public function describe() {}
}
"#,
        );

        let methods = declarations.classes[0].methods();
        // abstract -> final reported
        assert!(methods[0].is_abstract());
        assert_eq!(methods[0].is_final(), METHOD_FINAL_MIRRORS_ABSTRACT);
        // explicit final without abstract -> not reported
        assert!(!methods[1].is_abstract());
        assert_eq!(methods[1].is_final(), !METHOD_FINAL_MIRRORS_ABSTRACT);
    }

    #[test]
    fn test_only_first_element_is_recorded() {
        let declarations = visit_source(
            r#"<?php
namespace App;
class Multi
{
    const A = 1, B = 2;
    public $first = 'x', $second = 'y';
}
"#,
        );

        let class = &declarations.classes[0];
        assert_eq!(class.constants().len(), 1);
        assert_eq!(class.constants()[0].name(), "A");
        assert_eq!(class.properties().len(), 1);
        assert_eq!(class.properties()[0].name(), "first");
    }

    #[test]
    fn test_missing_visibility_is_public() {
        let declarations = visit_source(
            r#"<?php
namespace App;
class Legacy
{
    var $old;
    static $counter = 0;
    function run() {}
    private function hidden() {}
}
"#,
        );

        let class = &declarations.classes[0];
        assert!(class.properties()[0].is_public());
        assert_eq!(class.properties()[0].default_value(), &ResolvedValue::Null);
        assert!(class.properties()[1].is_public());
        assert!(class.properties()[1].is_static());
        assert!(class.methods()[0].is_public());
        assert!(!class.methods()[1].is_public());
        assert!(class.methods()[1].is_private());
    }

    #[test]
    fn test_magic_methods_case_insensitive() {
        let declarations = visit_source(
            r#"<?php
namespace App;
class Magic
{
    public function __construct() {}
    public function __toString(): string { return ''; }
    public function __CallStatic($name, $args) {}
    public function __custom() {}
}
"#,
        );

        let magic: Vec<bool> = declarations.classes[0]
            .methods()
            .iter()
            .map(|m| m.is_magic())
            .collect();
        assert_eq!(magic, vec![true, true, true, false]);
    }

    #[test]
    fn test_typed_property_with_array_default() {
        let declarations = visit_source(
            r#"<?php
namespace App;
class Config
{
    protected array $options = ['debug' => false];
    private ?int $limit;
}
"#,
        );

        let properties = declarations.classes[0].properties();
        let mut expected = PhpArray::new();
        expected.insert(
            crate::model::ArrayKey::Str("debug".to_string()),
            ResolvedValue::from("false"),
        );
        assert_eq!(properties[0].name(), "options");
        assert_eq!(properties[0].default_value(), &ResolvedValue::Array(expected));
        assert_eq!(properties[1].name(), "limit");
        assert_eq!(properties[1].default_value(), &ResolvedValue::Null);
    }
}

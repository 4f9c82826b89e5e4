// Container models: classes, interfaces and traits

use super::flags::{Flag, FlagSet};
use super::information::{ClassInformation, InterfaceInformation, TraitInformation};
use super::members::{ConstantModel, MethodModel, PropertyModel};

/// Separator between namespace segments and the short name.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Join a namespace and a short name into a fully-qualified name.
pub fn qualify(namespace: &str, short_name: &str) -> String {
    format!("{namespace}{NAMESPACE_SEPARATOR}{short_name}")
}

/// Behaviour shared by every declared type.
pub trait TypeModel {
    fn namespace(&self) -> &str;
    fn short_name(&self) -> &str;
    fn methods(&self) -> &[MethodModel];

    fn fully_qualified_name(&self) -> String {
        qualify(self.namespace(), self.short_name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassModel {
    namespace: String,
    short_name: String,
    flags: FlagSet,
    constants: Vec<ConstantModel>,
    properties: Vec<PropertyModel>,
    methods: Vec<MethodModel>,
}

impl ClassModel {
    pub fn new(namespace: impl Into<String>, short_name: impl Into<String>, flags: FlagSet) -> Self {
        Self {
            namespace: namespace.into(),
            short_name: short_name.into(),
            flags,
            constants: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn flags(&self) -> FlagSet {
        self.flags
    }

    pub fn constants(&self) -> &[ConstantModel] {
        &self.constants
    }

    pub fn properties(&self) -> &[PropertyModel] {
        &self.properties
    }

    pub fn add_constant(&mut self, constant: ConstantModel) {
        self.constants.push(constant);
    }

    pub fn add_property(&mut self, property: PropertyModel) {
        self.properties.push(property);
    }

    pub fn add_method(&mut self, method: MethodModel) {
        self.methods.push(method);
    }

    pub fn is_abstract(&self) -> bool {
        self.flags.check(Flag::Abstract)
    }

    pub fn is_final(&self) -> bool {
        self.flags.check(Flag::Final)
    }

    pub fn is_anonymous(&self) -> bool {
        self.flags.check(Flag::Anonymous)
    }

    pub fn information(&self) -> ClassInformation {
        ClassInformation {
            namespace: self.namespace.clone(),
            name: self.short_name.clone(),
            fully_namespace: self.fully_qualified_name(),
            constants: self.constants.iter().map(ConstantModel::information).collect(),
            properties: self.properties.iter().map(PropertyModel::information).collect(),
            methods: self.methods.iter().map(MethodModel::information).collect(),
            is_abstract: self.is_abstract(),
            is_final: self.is_final(),
            anonymous: self.is_anonymous(),
        }
    }
}

impl TypeModel for ClassModel {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn short_name(&self) -> &str {
        &self.short_name
    }

    fn methods(&self) -> &[MethodModel] {
        &self.methods
    }
}

/// Interfaces hold constants and methods only.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceModel {
    namespace: String,
    short_name: String,
    constants: Vec<ConstantModel>,
    methods: Vec<MethodModel>,
}

impl InterfaceModel {
    pub fn new(namespace: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            short_name: short_name.into(),
            constants: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn constants(&self) -> &[ConstantModel] {
        &self.constants
    }

    pub fn add_constant(&mut self, constant: ConstantModel) {
        self.constants.push(constant);
    }

    pub fn add_method(&mut self, method: MethodModel) {
        self.methods.push(method);
    }

    pub fn information(&self) -> InterfaceInformation {
        InterfaceInformation {
            namespace: self.namespace.clone(),
            name: self.short_name.clone(),
            fully_namespace: self.fully_qualified_name(),
            constants: self.constants.iter().map(ConstantModel::information).collect(),
            methods: self.methods.iter().map(MethodModel::information).collect(),
        }
    }
}

impl TypeModel for InterfaceModel {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn short_name(&self) -> &str {
        &self.short_name
    }

    fn methods(&self) -> &[MethodModel] {
        &self.methods
    }
}

/// Traits hold properties and methods only.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitModel {
    namespace: String,
    short_name: String,
    properties: Vec<PropertyModel>,
    methods: Vec<MethodModel>,
}

impl TraitModel {
    pub fn new(namespace: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            short_name: short_name.into(),
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn properties(&self) -> &[PropertyModel] {
        &self.properties
    }

    pub fn add_property(&mut self, property: PropertyModel) {
        self.properties.push(property);
    }

    pub fn add_method(&mut self, method: MethodModel) {
        self.methods.push(method);
    }

    pub fn information(&self) -> TraitInformation {
        TraitInformation {
            namespace: self.namespace.clone(),
            name: self.short_name.clone(),
            fully_namespace: self.fully_qualified_name(),
            properties: self.properties.iter().map(PropertyModel::information).collect(),
            methods: self.methods.iter().map(MethodModel::information).collect(),
        }
    }
}

impl TypeModel for TraitModel {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn short_name(&self) -> &str {
        &self.short_name
    }

    fn methods(&self) -> &[MethodModel] {
        &self.methods
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::flags::ClassFlags;
    use crate::model::value::ResolvedValue;

    #[test]
    fn test_fully_qualified_name() {
        let class = ClassModel::new("App\\Models", "User", FlagSet::EMPTY);
        assert_eq!(class.fully_qualified_name(), "App\\Models\\User");
    }

    #[test]
    fn test_class_information_keeps_member_order() {
        let mut class = ClassModel::new("App", "Foo", ClassFlags::build(true, false, false));
        class.add_constant(ConstantModel::new("A", ResolvedValue::Int(1)));
        class.add_constant(ConstantModel::new("B", ResolvedValue::Int(2)));
        class.add_method(MethodModel::new("run", FlagSet::EMPTY));

        let info = class.information();
        assert_eq!(info.fully_namespace, "App\\Foo");
        assert!(info.is_abstract);
        assert!(!info.is_final);
        let names: Vec<_> = info.constants.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(info.methods.len(), 1);
    }

    #[test]
    fn test_trait_information_has_no_constants() {
        let trait_model = TraitModel::new("App", "Loggable");
        let json = serde_json::to_value(trait_model.information()).unwrap();
        assert!(json.get("constants").is_none());
        assert_eq!(json["fully_namespace"], "App\\Loggable");
    }
}

// Member models: constants, properties and methods

use super::flags::{ConstantFlags, Flag, FlagSet};
use super::information::{ConstantInformation, MethodInformation, PropertyInformation};
use super::value::ResolvedValue;

/// A `const` declared in a class or interface body.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantModel {
    name: String,
    value: ResolvedValue,
}

impl ConstantModel {
    pub fn new(name: impl Into<String>, value: ResolvedValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ResolvedValue {
        &self.value
    }

    pub fn flags(&self) -> FlagSet {
        ConstantFlags::build()
    }

    pub fn information(&self) -> ConstantInformation {
        ConstantInformation {
            name: self.name.clone(),
            value: self.value.clone(),
        }
    }
}

/// A property declared in a class or trait body. `name` has no leading `$`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyModel {
    name: String,
    flags: FlagSet,
    default_value: ResolvedValue,
}

impl PropertyModel {
    pub fn new(name: impl Into<String>, flags: FlagSet, default_value: ResolvedValue) -> Self {
        Self {
            name: name.into(),
            flags,
            default_value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flags(&self) -> FlagSet {
        self.flags
    }

    pub fn default_value(&self) -> &ResolvedValue {
        &self.default_value
    }

    pub fn is_public(&self) -> bool {
        self.flags.check(Flag::Public)
    }

    pub fn is_protected(&self) -> bool {
        self.flags.check(Flag::Protected)
    }

    pub fn is_private(&self) -> bool {
        self.flags.check(Flag::Private)
    }

    pub fn is_static(&self) -> bool {
        self.flags.check(Flag::Static)
    }

    pub fn information(&self) -> PropertyInformation {
        PropertyInformation {
            name: self.name.clone(),
            default_value: self.default_value.clone(),
            public: self.is_public(),
            protected: self.is_protected(),
            private: self.is_private(),
            is_static: self.is_static(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodModel {
    name: String,
    flags: FlagSet,
}

impl MethodModel {
    pub fn new(name: impl Into<String>, flags: FlagSet) -> Self {
        Self {
            name: name.into(),
            flags,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flags(&self) -> FlagSet {
        self.flags
    }

    pub fn is_public(&self) -> bool {
        self.flags.check(Flag::Public)
    }

    pub fn is_protected(&self) -> bool {
        self.flags.check(Flag::Protected)
    }

    pub fn is_private(&self) -> bool {
        self.flags.check(Flag::Private)
    }

    pub fn is_static(&self) -> bool {
        self.flags.check(Flag::Static)
    }

    pub fn is_abstract(&self) -> bool {
        self.flags.check(Flag::Abstract)
    }

    pub fn is_final(&self) -> bool {
        self.flags.check(Flag::Final)
    }

    pub fn is_magic(&self) -> bool {
        self.flags.check(Flag::Magic)
    }

    pub fn information(&self) -> MethodInformation {
        MethodInformation {
            name: self.name.clone(),
            magic: self.is_magic(),
            public: self.is_public(),
            protected: self.is_protected(),
            private: self.is_private(),
            is_static: self.is_static(),
            is_abstract: self.is_abstract(),
            is_final: self.is_final(),
        }
    }
}

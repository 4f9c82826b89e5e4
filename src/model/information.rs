// Information tree
//
// Flattened, serializable view of the extracted models. Field order here is the
// key order of every output format.

use super::value::ResolvedValue;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstantInformation {
    pub name: String,
    pub value: ResolvedValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyInformation {
    pub name: String,
    pub default_value: ResolvedValue,
    pub public: bool,
    pub protected: bool,
    pub private: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodInformation {
    pub name: String,
    pub magic: bool,
    pub public: bool,
    pub protected: bool,
    pub private: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    #[serde(rename = "final")]
    pub is_final: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassInformation {
    pub namespace: String,
    pub name: String,
    pub fully_namespace: String,
    pub constants: Vec<ConstantInformation>,
    pub properties: Vec<PropertyInformation>,
    pub methods: Vec<MethodInformation>,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    #[serde(rename = "final")]
    pub is_final: bool,
    pub anonymous: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceInformation {
    pub namespace: String,
    pub name: String,
    pub fully_namespace: String,
    pub constants: Vec<ConstantInformation>,
    pub methods: Vec<MethodInformation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraitInformation {
    pub namespace: String,
    pub name: String,
    pub fully_namespace: String,
    pub properties: Vec<PropertyInformation>,
    pub methods: Vec<MethodInformation>,
}

/// Every extracted type, keyed by fully-qualified name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Information {
    pub classes: BTreeMap<String, ClassInformation>,
    pub interfaces: BTreeMap<String, InterfaceInformation>,
    pub traits: BTreeMap<String, TraitInformation>,
}

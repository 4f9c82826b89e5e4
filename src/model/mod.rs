// Extraction models
//
// - flags.rs: modifier bitmask shared by every entity kind
// - value.rs: statically resolved constant/default values
// - members.rs: constants, properties, methods
// - types.rs: classes, interfaces, traits
// - information.rs: serializable information tree

pub mod flags;
pub mod information;
pub mod members;
pub mod types;
pub mod value;

pub use flags::{ClassFlags, ConstantFlags, Flag, FlagSet, MethodFlags, PropertyFlags};
pub use information::{
    ClassInformation, ConstantInformation, Information, InterfaceInformation, MethodInformation,
    PropertyInformation, TraitInformation,
};
pub use members::{ConstantModel, MethodModel, PropertyModel};
pub use types::{qualify, ClassModel, InterfaceModel, TraitModel, TypeModel, NAMESPACE_SEPARATOR};
pub use value::{ArrayKey, KeySlot, PhpArray, ResolvedValue};

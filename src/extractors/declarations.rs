// Declarations - accumulator of the types found in one or more files

use crate::model::{ClassModel, InterfaceModel, TraitModel};

/// Types declared by the visited files, in visit order.
///
/// A visitor returns one of these per file; the engine merges them. Merging is
/// purely additive: nothing already collected is removed or changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations {
    pub classes: Vec<ClassModel>,
    pub interfaces: Vec<InterfaceModel>,
    pub traits: Vec<TraitModel>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.interfaces.is_empty() && self.traits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.classes.len() + self.interfaces.len() + self.traits.len()
    }

    /// Append everything from `other` after what is already collected.
    pub fn merge(&mut self, other: Declarations) {
        self.classes.extend(other.classes);
        self.interfaces.extend(other.interfaces);
        self.traits.extend(other.traits);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FlagSet;

    #[test]
    fn test_merge_appends_in_order() {
        let mut first = Declarations::new();
        first.classes.push(ClassModel::new("A", "One", FlagSet::EMPTY));

        let mut second = Declarations::new();
        second.classes.push(ClassModel::new("A", "Two", FlagSet::EMPTY));
        second.traits.push(TraitModel::new("A", "T"));

        first.merge(second);
        let names: Vec<_> = first
            .classes
            .iter()
            .map(|c| crate::model::TypeModel::short_name(c).to_string())
            .collect();
        assert_eq!(names, vec!["One", "Two"]);
        assert_eq!(first.len(), 3);
    }
}

// Modifier flag model
//
// Every entity stores its modifiers in a single `FlagSet` bitmask. Bit positions
// are shared by all entity kinds; each kind only ever sets the subset listed in
// its bit table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named modifier bits. The discriminant is the bit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Flag {
    Public = 0,
    Protected = 1,
    Private = 2,
    Static = 3,
    Abstract = 4,
    Final = 5,
    Magic = 6,
    Anonymous = 7,
}

impl Flag {
    pub const ALL: [Flag; 8] = [
        Flag::Public,
        Flag::Protected,
        Flag::Private,
        Flag::Static,
        Flag::Abstract,
        Flag::Final,
        Flag::Magic,
        Flag::Anonymous,
    ];

    pub fn bit(self) -> u8 {
        self as u8
    }

    pub fn mask(self) -> u32 {
        1 << self.bit()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Flag::Public => "public",
            Flag::Protected => "protected",
            Flag::Private => "private",
            Flag::Static => "static",
            Flag::Abstract => "abstract",
            Flag::Final => "final",
            Flag::Magic => "magic",
            Flag::Anonymous => "anonymous",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integer bitmask of [`Flag`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagSet(u32);

impl FlagSet {
    pub const EMPTY: FlagSet = FlagSet(0);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn check(self, flag: Flag) -> bool {
        self.0 & flag.mask() != 0
    }

    /// Set `flag`. Setting an already-set bit leaves the mask unchanged.
    #[must_use]
    pub fn with_flag(self, flag: Flag) -> Self {
        FlagSet(self.0 | flag.mask())
    }

    #[must_use]
    pub fn without_flag(self, flag: Flag) -> Self {
        FlagSet(self.0 & !flag.mask())
    }

    /// Set `flag` only when `enabled` is true.
    #[must_use]
    pub fn with_flag_if(self, flag: Flag, enabled: bool) -> Self {
        if enabled {
            self.with_flag(flag)
        } else {
            self
        }
    }

    /// Flip `flag` only when its current state differs from `desired`.
    #[must_use]
    pub fn toggle(self, flag: Flag, desired: bool) -> Self {
        if desired {
            self.with_flag(flag)
        } else {
            self.without_flag(flag)
        }
    }

    /// Unconditional XOR of `flag`.
    #[must_use]
    pub fn flip(self, flag: Flag) -> Self {
        FlagSet(self.0 ^ flag.mask())
    }

    /// Flags set in this mask, in bit order.
    pub fn iter(self) -> impl Iterator<Item = Flag> {
        Flag::ALL.into_iter().filter(move |flag| self.check(*flag))
    }
}

/// Compose a mask from a kind's bit table and a parallel slice of booleans.
///
/// Only bits listed in `table` can end up in the mask; `values` beyond the
/// table length are ignored.
pub fn build(table: &[Flag], values: &[bool]) -> FlagSet {
    table
        .iter()
        .zip(values)
        .fold(FlagSet::EMPTY, |mask, (flag, enabled)| {
            mask.with_flag_if(*flag, *enabled)
        })
}

pub fn check(mask: FlagSet, flag: Flag) -> bool {
    mask.check(flag)
}

pub fn toggle(mask: FlagSet, flag: Flag, desired: bool) -> FlagSet {
    mask.toggle(flag, desired)
}

/// Constants carry no modifier bits.
pub struct ConstantFlags;

impl ConstantFlags {
    pub const TABLE: &'static [Flag] = &[];

    pub fn build() -> FlagSet {
        build(Self::TABLE, &[])
    }
}

pub struct PropertyFlags;

impl PropertyFlags {
    pub const TABLE: &'static [Flag] = &[Flag::Public, Flag::Protected, Flag::Private, Flag::Static];

    pub fn build(public: bool, protected: bool, private: bool, is_static: bool) -> FlagSet {
        build(Self::TABLE, &[public, protected, private, is_static])
    }
}

pub struct MethodFlags;

impl MethodFlags {
    pub const TABLE: &'static [Flag] = &[
        Flag::Public,
        Flag::Protected,
        Flag::Private,
        Flag::Static,
        Flag::Abstract,
        Flag::Final,
        Flag::Magic,
    ];

    pub fn build(
        public: bool,
        protected: bool,
        private: bool,
        is_static: bool,
        is_abstract: bool,
        is_final: bool,
        is_magic: bool,
    ) -> FlagSet {
        build(
            Self::TABLE,
            &[
                public,
                protected,
                private,
                is_static,
                is_abstract,
                is_final,
                is_magic,
            ],
        )
    }
}

pub struct ClassFlags;

impl ClassFlags {
    pub const TABLE: &'static [Flag] = &[Flag::Abstract, Flag::Final, Flag::Anonymous];

    pub fn build(is_abstract: bool, is_final: bool, is_anonymous: bool) -> FlagSet {
        build(Self::TABLE, &[is_abstract, is_final, is_anonymous])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_flags_round_trip() {
        let mask = PropertyFlags::build(true, false, false, true);
        assert!(check(mask, Flag::Public));
        assert!(check(mask, Flag::Static));
        assert!(!check(mask, Flag::Abstract));
        assert!(!check(mask, Flag::Protected));
        assert_eq!(mask.bits(), 0b1001);
    }

    #[test]
    fn test_every_method_flag_combination_round_trips() {
        for bits in 0u32..(1 << MethodFlags::TABLE.len()) {
            let values: Vec<bool> = (0..MethodFlags::TABLE.len())
                .map(|i| bits & (1 << i) != 0)
                .collect();
            let mask = MethodFlags::build(
                values[0], values[1], values[2], values[3], values[4], values[5], values[6],
            );
            for (flag, expected) in MethodFlags::TABLE.iter().zip(&values) {
                assert_eq!(mask.check(*flag), *expected, "bits={bits:#b} flag={flag}");
            }
            assert!(!mask.check(Flag::Anonymous));
        }
    }

    #[test]
    fn test_class_flags_only_use_class_bits() {
        let mask = ClassFlags::build(true, true, true);
        assert_eq!(
            mask.iter().collect::<Vec<_>>(),
            vec![Flag::Abstract, Flag::Final, Flag::Anonymous]
        );
        assert!(!mask.check(Flag::Public));
    }

    #[test]
    fn test_constant_flags_are_empty() {
        assert!(ConstantFlags::build().is_empty());
    }

    #[test]
    fn test_with_flag_is_idempotent() {
        let once = FlagSet::EMPTY.with_flag(Flag::Static);
        let twice = once.with_flag(Flag::Static);
        assert_eq!(once, twice);
        assert!(twice.check(Flag::Static));
    }

    #[test]
    fn test_toggle_only_flips_when_state_differs() {
        let mask = FlagSet::EMPTY.with_flag(Flag::Final);
        assert_eq!(toggle(mask, Flag::Final, true), mask);
        assert!(!toggle(mask, Flag::Final, false).check(Flag::Final));
        assert!(toggle(mask, Flag::Magic, true).check(Flag::Magic));
        assert_eq!(toggle(mask, Flag::Magic, false), mask);
        assert_eq!(mask.without_flag(Flag::Final), FlagSet::EMPTY);
    }

    #[test]
    fn test_flip_is_explicit_xor() {
        let mask = FlagSet::EMPTY.flip(Flag::Private);
        assert!(mask.check(Flag::Private));
        assert!(!mask.flip(Flag::Private).check(Flag::Private));
    }

    #[test]
    fn test_build_ignores_values_beyond_table() {
        let mask = build(&[Flag::Public], &[true, true, true]);
        assert_eq!(mask, FlagSet::EMPTY.with_flag(Flag::Public));
    }
}

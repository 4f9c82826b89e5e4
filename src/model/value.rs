// Resolved values for constant and default-value expressions
//
// The evaluator never executes code, so a value is either a literal it could
// fold, or `Unresolved` holding the source text it gave up on.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

/// Result of statically evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(PhpArray),
    /// Expression outside the supported literal grammar, kept as source text.
    Unresolved(String),
}

impl ResolvedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ResolvedValue::Null)
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, ResolvedValue::Unresolved(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResolvedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&PhpArray> {
        match self {
            ResolvedValue::Array(array) => Some(array),
            _ => None,
        }
    }

    /// String conversion as PHP performs it when concatenating.
    ///
    /// `Unresolved` converts like `null`, to an empty string.
    pub fn to_php_string(&self) -> String {
        match self {
            ResolvedValue::Null | ResolvedValue::Unresolved(_) => String::new(),
            ResolvedValue::Bool(true) => "1".to_string(),
            ResolvedValue::Bool(false) => String::new(),
            ResolvedValue::Int(i) => i.to_string(),
            ResolvedValue::Float(f) => php_float_to_string(*f),
            ResolvedValue::String(s) => s.clone(),
            ResolvedValue::Array(_) => "Array".to_string(),
        }
    }
}

impl From<&str> for ResolvedValue {
    fn from(value: &str) -> Self {
        ResolvedValue::String(value.to_string())
    }
}

impl From<i64> for ResolvedValue {
    fn from(value: i64) -> Self {
        ResolvedValue::Int(value)
    }
}

impl From<PhpArray> for ResolvedValue {
    fn from(value: PhpArray) -> Self {
        ResolvedValue::Array(value)
    }
}

impl Serialize for ResolvedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResolvedValue::Null | ResolvedValue::Unresolved(_) => serializer.serialize_unit(),
            ResolvedValue::Bool(b) => serializer.serialize_bool(*b),
            ResolvedValue::Int(i) => serializer.serialize_i64(*i),
            ResolvedValue::Float(f) => serializer.serialize_f64(*f),
            ResolvedValue::String(s) => serializer.serialize_str(s),
            ResolvedValue::Array(array) => array.serialize(serializer),
        }
    }
}

/// Array key after PHP's key normalisation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArrayKey {
    Int(i64),
    Str(String),
}

impl ArrayKey {
    /// Normalise a string key: canonical decimal integers become integer keys.
    pub fn from_string(key: &str) -> Self {
        match canonical_int(key) {
            Some(i) => ArrayKey::Int(i),
            None => ArrayKey::Str(key.to_string()),
        }
    }
}

impl fmt::Display for ArrayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayKey::Int(i) => write!(f, "{i}"),
            ArrayKey::Str(s) => f.write_str(s),
        }
    }
}

/// How an evaluated key expression places its entry.
#[derive(Debug, Clone, PartialEq)]
pub enum KeySlot {
    Append,
    Key(ArrayKey),
    /// Arrays cannot be used as keys; the entry is dropped.
    Illegal,
}

impl KeySlot {
    pub fn from_value(key: &ResolvedValue) -> Self {
        match key {
            ResolvedValue::Null | ResolvedValue::Unresolved(_) => KeySlot::Append,
            ResolvedValue::String(s) if s.is_empty() => KeySlot::Append,
            ResolvedValue::String(s) => KeySlot::Key(ArrayKey::from_string(s)),
            ResolvedValue::Int(i) => KeySlot::Key(ArrayKey::Int(*i)),
            ResolvedValue::Bool(b) => KeySlot::Key(ArrayKey::Int(i64::from(*b))),
            ResolvedValue::Float(f) => KeySlot::Key(ArrayKey::Int(f.trunc() as i64)),
            ResolvedValue::Array(_) => KeySlot::Illegal,
        }
    }
}

/// Ordered PHP array: mixed integer and string keys in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhpArray {
    entries: Vec<(ArrayKey, ResolvedValue)>,
    next_index: i64,
}

impl PhpArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append under the next free integer index.
    pub fn push(&mut self, value: ResolvedValue) {
        let key = ArrayKey::Int(self.next_index);
        self.insert(key, value);
    }

    /// Insert under `key`; an existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: ArrayKey, value: ResolvedValue) {
        if let ArrayKey::Int(i) = key {
            if i >= self.next_index {
                self.next_index = i.saturating_add(1);
            }
        }

        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &ArrayKey) -> Option<&ResolvedValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ArrayKey, &ResolvedValue)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    /// True when keys are exactly `0..len` in order, which JSON renders as a list.
    pub fn is_list(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(index, (key, _))| *key == ArrayKey::Int(index as i64))
    }
}

impl Serialize for PhpArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_list() {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for (_, value) in &self.entries {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in &self.entries {
                map.serialize_entry(&key.to_string(), value)?;
            }
            map.end()
        }
    }
}

/// Parse a string PHP would treat as an integer array key.
pub(crate) fn canonical_int(text: &str) -> Option<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    if text == "-0" {
        return None;
    }
    text.parse().ok()
}

/// PHP's float-to-string conversion (14 significant digits).
pub(crate) fn php_float_to_string(value: f64) -> String {
    const PRECISION: usize = 14;
    let scientific = format!("{:.*e}", PRECISION - 1, value.abs());
    layout_php_float(value, &scientific, PRECISION as i32)
}

/// Shortest round-trip form, as PHP writes floats with `serialize_precision = -1`.
pub(crate) fn php_float_to_shortest_string(value: f64) -> String {
    let scientific = format!("{:e}", value.abs());
    layout_php_float(value, &scientific, 17)
}

/// Lay out the digits of `scientific` (`d.ddde±x`) the way PHP's `%G`
/// conversion does: exponent form below `1e-4` or from `1e{exponent_limit}` up.
fn layout_php_float(value: f64, scientific: &str, exponent_limit: i32) -> String {
    if value.is_nan() {
        return "NAN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };
    let sign = if value < 0.0 { "-" } else { "" };

    if exponent < -4 || exponent >= exponent_limit {
        let (first, rest) = digits.split_at(1);
        let rest = if rest.is_empty() { "0" } else { rest };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{sign}{first}.{rest}E{exp_sign}{}", exponent.abs());
    }

    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        return format!("{sign}0.{zeros}{digits}");
    }

    let int_len = exponent as usize + 1;
    if digits.len() <= int_len {
        format!("{sign}{digits}{}", "0".repeat(int_len - digits.len()))
    } else {
        let (int_part, frac_part) = digits.split_at(int_len);
        format!("{sign}{int_part}.{frac_part}")
    }
}

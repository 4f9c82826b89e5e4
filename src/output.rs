//! Output formats
//!
//! Everything is rendered from a `serde_json::Value`, so any serializable
//! information tree can be written as JSON, as a PHP `var_export` file or as
//! PHP `serialize()` text.

use crate::error::{ExtractorError, Result};
use crate::model::value::{canonical_int, php_float_to_shortest_string};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::fmt;
use std::str::FromStr;

/// Matches the `N =>` prefix `var_export` writes for list entries
static NUMERIC_KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+ =>").unwrap());

/// Matches runs of blank lines (and leading newlines)
static BLANK_LINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^[\r\n]*|[\r\n]+)[ \t\f\v]*[\r\n]+").unwrap());

const PHP_FILE_HEADER: &str = "<?php\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Php,
    Serialize,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Json,
        OutputFormat::Php,
        OutputFormat::Serialize,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Php => "php",
            OutputFormat::Serialize => "serialize",
        }
    }

    /// Render `value` in this format.
    pub fn render<T: Serialize + ?Sized>(self, value: &T) -> Result<String> {
        let value = serde_json::to_value(value)?;
        Ok(match self {
            OutputFormat::Json => serde_json::to_string(&value)?,
            OutputFormat::Php => format!("{PHP_FILE_HEADER}{};", var_export(&value)),
            OutputFormat::Serialize => php_serialize(&value),
        })
    }

    /// Render a flat list; the PHP form drops the index keys and blank lines.
    pub fn render_list<T: Serialize>(self, items: &[T]) -> Result<String> {
        match self {
            OutputFormat::Php => {
                let value = serde_json::to_value(items)?;
                let exported = strip_blank_lines(&strip_numeric_keys(&var_export(&value)));
                Ok(format!("{PHP_FILE_HEADER}{exported};"))
            }
            _ => self.render(items),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ExtractorError;

    fn from_str(s: &str) -> Result<Self> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ExtractorError::UnsupportedFormat(s.to_string()))
    }
}

/// Remove the `N =>` index prefixes from `var_export` output.
pub fn strip_numeric_keys(input: &str) -> String {
    NUMERIC_KEY_RE.replace_all(input, "").into_owned()
}

/// Collapse blank lines into single newlines.
pub fn strip_blank_lines(input: &str) -> String {
    BLANK_LINES_RE.replace_all(input, "\n").into_owned()
}

/// PHP `var_export` rendering of a JSON value (objects and lists become arrays).
pub fn var_export(value: &Value) -> String {
    let mut out = String::new();
    export_value(value, 0, &mut out);
    out
}

fn export_value(value: &Value, indent: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("NULL"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&export_number(n)),
        Value::String(s) => export_string(s, out),
        Value::Array(items) => {
            let entries = items
                .iter()
                .enumerate()
                .map(|(index, item)| (ExportKey::Int(index as i64), item));
            export_array(entries, indent, out);
        }
        Value::Object(map) => export_array(object_entries(map), indent, out),
    }
}

fn export_array<'a>(
    entries: impl Iterator<Item = (ExportKey<'a>, &'a Value)>,
    indent: usize,
    out: &mut String,
) {
    let padding = " ".repeat(indent);
    out.push_str("array (\n");

    for (key, item) in entries {
        out.push_str(&padding);
        out.push_str("  ");
        match key {
            ExportKey::Int(i) => out.push_str(&i.to_string()),
            ExportKey::Str(s) => export_string(s, out),
        }
        out.push_str(" => ");
        if matches!(item, Value::Array(_) | Value::Object(_)) {
            out.push('\n');
            out.push_str(&padding);
            out.push_str("  ");
        }
        export_value(item, indent + 2, out);
        out.push_str(",\n");
    }

    out.push_str(&padding);
    out.push(')');
}

fn export_string(s: &str, out: &mut String) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            _ => out.push(c),
        }
    }
    out.push('\'');
}

fn export_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    let f = n.as_f64().unwrap_or(0.0);
    let text = f.to_string();
    if text.contains(['.', 'e', 'E']) || !f.is_finite() {
        text
    } else {
        format!("{text}.0")
    }
}

/// PHP `serialize()` rendering of a JSON value.
pub fn php_serialize(value: &Value) -> String {
    let mut out = String::new();
    serialize_value(value, &mut out);
    out
}

fn serialize_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("N;"),
        Value::Bool(b) => out.push_str(if *b { "b:1;" } else { "b:0;" }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                out.push_str(&format!("i:{i};"));
            } else {
                let f = n.as_f64().unwrap_or(0.0);
                out.push_str(&format!("d:{};", php_float_to_shortest_string(f)));
            }
        }
        Value::String(s) => serialize_string(s, out),
        Value::Array(items) => {
            out.push_str(&format!("a:{}:{{", items.len()));
            for (index, item) in items.iter().enumerate() {
                out.push_str(&format!("i:{index};"));
                serialize_value(item, out);
            }
            out.push('}');
        }
        Value::Object(map) => {
            out.push_str(&format!("a:{}:{{", map.len()));
            for (key, item) in object_entries(map) {
                match key {
                    ExportKey::Int(i) => out.push_str(&format!("i:{i};")),
                    ExportKey::Str(s) => serialize_string(s, out),
                }
                serialize_value(item, out);
            }
            out.push('}');
        }
    }
}

fn serialize_string(s: &str, out: &mut String) {
    out.push_str(&format!("s:{}:\"{}\";", s.len(), s));
}

/// Array key as PHP stores it: numeric strings become integers.
enum ExportKey<'a> {
    Int(i64),
    Str(&'a str),
}

fn object_entries(map: &Map<String, Value>) -> impl Iterator<Item = (ExportKey<'_>, &Value)> {
    map.iter().map(|(key, value)| {
        let key = match canonical_int(key) {
            Some(i) => ExportKey::Int(i),
            None => ExportKey::Str(key.as_str()),
        };
        (key, value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("PHP".parse::<OutputFormat>().unwrap(), OutputFormat::Php);
        assert_eq!(
            "Serialize".parse::<OutputFormat>().unwrap(),
            OutputFormat::Serialize
        );
        assert!(matches!(
            "yaml".parse::<OutputFormat>(),
            Err(ExtractorError::UnsupportedFormat(name)) if name == "yaml"
        ));
    }

    #[test]
    fn test_var_export_nested() {
        let value = json!({
            "App\\Foo": {
                "name": "Foo",
                "constants": [{"name": "X", "value": 1}],
                "abstract": false,
                "value": null
            }
        });

        let expected = "array (\n  'App\\\\Foo' => \n  array (\n    'name' => 'Foo',\n    'constants' => \n    array (\n      0 => \n      array (\n        'name' => 'X',\n        'value' => 1,\n      ),\n    ),\n    'abstract' => false,\n    'value' => NULL,\n  ),\n)";
        assert_eq!(var_export(&value), expected);
    }

    #[test]
    fn test_var_export_scalars() {
        assert_eq!(var_export(&json!("it's")), "'it\\'s'");
        assert_eq!(var_export(&json!(1.0)), "1.0");
        assert_eq!(var_export(&json!(2.5)), "2.5");
        assert_eq!(var_export(&json!({"5": "a"})), "array (\n  5 => 'a',\n)");
    }

    #[test]
    fn test_php_serialize() {
        let value = json!({"name": "Foo", "list": [true, null, 2, 1.5], "7": "é"});
        assert_eq!(
            php_serialize(&value),
            "a:3:{s:4:\"name\";s:3:\"Foo\";s:4:\"list\";a:4:{i:0;b:1;i:1;N;i:2;i:2;i:3;d:1.5;}i:7;s:2:\"é\";}"
        );
    }

    #[test]
    fn test_php_serialize_floats_round_trip() {
        assert_eq!(php_serialize(&json!(0.1 + 0.2)), "d:0.30000000000000004;");
        assert_eq!(php_serialize(&json!([2.0, 1e20])), "a:2:{i:0;d:2;i:1;d:1.0E+20;}");
    }

    #[test]
    fn test_render_formats() {
        let value = json!({"a": [1, 2]});
        assert_eq!(OutputFormat::Json.render(&value).unwrap(), r#"{"a":[1,2]}"#);
        assert_eq!(
            OutputFormat::Php.render(&value).unwrap(),
            "<?php\n\narray (\n  'a' => \n  array (\n    0 => 1,\n    1 => 2,\n  ),\n);"
        );
        assert_eq!(
            OutputFormat::Serialize.render(&value).unwrap(),
            "a:1:{s:1:\"a\";a:2:{i:0;i:1;i:1;i:2;}}"
        );
    }

    #[test]
    fn test_render_list_strips_keys_in_php() {
        let names = vec!["createdAt", "name"];
        assert_eq!(
            OutputFormat::Php.render_list(&names).unwrap(),
            "<?php\n\narray (\n   'createdAt',\n   'name',\n);"
        );
        assert_eq!(
            OutputFormat::Json.render_list(&names).unwrap(),
            r#"["createdAt","name"]"#
        );
    }

    #[test]
    fn test_strip_helpers() {
        assert_eq!(strip_numeric_keys("  0 => 'a',\n  12 => 'b',"), "   'a',\n   'b',");
        assert_eq!(strip_blank_lines("a\n\n\nb\n  \nc"), "a\nb\nc");
        assert_eq!(strip_blank_lines("\n\nstart"), "\nstart");
    }
}

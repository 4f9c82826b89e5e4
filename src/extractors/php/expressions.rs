// PHP visitor - static evaluation of constant and default-value expressions
//
// Only literal forms are folded: scalars, strings without interpolation,
// arrays, constant names, class constants and `|`. Everything else becomes
// `ResolvedValue::Unresolved` with the expression's source text.

use super::helpers::first_name_segment;
use super::ClassVisitor;
use crate::model::{KeySlot, PhpArray, ResolvedValue};
use tree_sitter::Node;

pub(super) fn evaluate(visitor: &ClassVisitor, node: Node) -> ResolvedValue {
    let base = visitor.get_base();
    let text = base.get_node_text(&node);

    match node.kind() {
        "integer" => parse_integer(&text).unwrap_or(ResolvedValue::Unresolved(text)),
        "float" => parse_float(&text).unwrap_or(ResolvedValue::Unresolved(text)),
        "string" => match single_quoted_body(&text) {
            Some(body) => ResolvedValue::String(unescape_single_quoted(body)),
            None => ResolvedValue::Unresolved(text),
        },
        "encapsed_string" => {
            if has_interpolation(&node) {
                return ResolvedValue::Unresolved(text);
            }
            match double_quoted_body(&text) {
                Some(body) => ResolvedValue::String(unescape_double_quoted(body, true)),
                None => ResolvedValue::Unresolved(text),
            }
        }
        "heredoc" => {
            if has_interpolation(&node) {
                return ResolvedValue::Unresolved(text);
            }
            match heredoc_body(&text) {
                Some(body) => ResolvedValue::String(unescape_double_quoted(&body, false)),
                None => ResolvedValue::Unresolved(text),
            }
        }
        "nowdoc" => match heredoc_body(&text) {
            Some(body) => ResolvedValue::String(body),
            None => ResolvedValue::Unresolved(text),
        },
        // `null` folds to null only in exactly this spelling; `NULL`, `true`
        // and `false` are kept as the constant's name.
        "null" | "boolean" | "name" | "qualified_name" => {
            let name = first_name_segment(&text);
            if name == "null" {
                ResolvedValue::Null
            } else {
                ResolvedValue::String(name.to_string())
            }
        }
        "class_constant_access_expression" => evaluate_class_constant(visitor, node, text),
        "binary_expression" => evaluate_binary(visitor, node, text),
        "parenthesized_expression" => match base.named_children(&node).into_iter().next() {
            Some(inner) => evaluate(visitor, inner),
            None => ResolvedValue::Unresolved(text),
        },
        "array_creation_expression" => ResolvedValue::Array(evaluate_array(visitor, node)),
        _ => ResolvedValue::Unresolved(text),
    }
}

/// `Foo::BAR` -> "Foo::BAR"; a scope that is not a plain name is unresolved.
fn evaluate_class_constant(visitor: &ClassVisitor, node: Node, text: String) -> ResolvedValue {
    let base = visitor.get_base();
    let children = base.named_children(&node);
    let (Some(scope), Some(constant)) = (children.first(), children.last()) else {
        return ResolvedValue::Unresolved(text);
    };
    if children.len() < 2 {
        return ResolvedValue::Unresolved(text);
    }

    match scope.kind() {
        "name" | "qualified_name" | "relative_scope" => {
            let scope_text = base.get_node_text(scope);
            let constant_text = base.get_node_text(constant);
            ResolvedValue::String(format!(
                "{}::{}",
                first_name_segment(&scope_text),
                constant_text.trim()
            ))
        }
        _ => ResolvedValue::Unresolved(text),
    }
}

/// `a | b` concatenates the string forms of both sides with a `|` between.
fn evaluate_binary(visitor: &ClassVisitor, node: Node, text: String) -> ResolvedValue {
    let base = visitor.get_base();
    let operator = node
        .child_by_field_name("operator")
        .map(|op| base.get_node_text(&op));
    if operator.as_deref() != Some("|") {
        return ResolvedValue::Unresolved(text);
    }

    let (Some(left), Some(right)) = (
        node.child_by_field_name("left"),
        node.child_by_field_name("right"),
    ) else {
        return ResolvedValue::Unresolved(text);
    };

    let left = evaluate(visitor, left).to_php_string();
    let right = evaluate(visitor, right).to_php_string();
    ResolvedValue::String(format!("{left}|{right}"))
}

/// Fold `[...]` / `array(...)` following PHP's key rules.
fn evaluate_array(visitor: &ClassVisitor, node: Node) -> PhpArray {
    let base = visitor.get_base();
    let mut array = PhpArray::new();

    for element in base.named_children(&node) {
        if element.kind() != "array_element_initializer" {
            continue;
        }

        if base.has_token(&element, "=>") {
            let Some(value_node) = base.named_child_after(&element, "=>") else {
                continue;
            };
            let key = base
                .named_child_before(&element, "=>")
                .map(|key| evaluate(visitor, key))
                .unwrap_or(ResolvedValue::Null);
            let value = evaluate(visitor, value_node);

            match KeySlot::from_value(&key) {
                KeySlot::Append => array.push(value),
                KeySlot::Key(key) => array.insert(key, value),
                KeySlot::Illegal => {
                    tracing::debug!(
                        "Skipping array entry with array key in {}",
                        base.file_path().display()
                    );
                }
            }
        } else {
            // Spread (`...$x`) and by-reference entries fall through to Unresolved.
            let value = match base.named_children(&element).as_slice() {
                [single] => evaluate(visitor, *single),
                _ => ResolvedValue::Unresolved(base.get_node_text(&element)),
            };
            array.push(value);
        }
    }

    array
}

fn has_interpolation(node: &Node) -> bool {
    if matches!(node.kind(), "variable_name" | "dynamic_variable_name") {
        return true;
    }
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| has_interpolation(&child));
    found
}

/// Parse a PHP integer literal; values that overflow become floats.
fn parse_integer(text: &str) -> Option<ResolvedValue> {
    let cleaned: String = text.trim().chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();

    let (digits, radix) = if let Some(hex) = lower.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(binary) = lower.strip_prefix("0b") {
        (binary, 2)
    } else if let Some(octal) = lower.strip_prefix("0o") {
        (octal, 8)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (&lower[1..], 8)
    } else {
        (lower.as_str(), 10)
    };

    if digits.is_empty() {
        return None;
    }

    match i64::from_str_radix(digits, radix) {
        Ok(value) => Some(ResolvedValue::Int(value)),
        Err(_) => {
            let mut value = 0f64;
            for c in digits.chars() {
                value = value * f64::from(radix) + f64::from(c.to_digit(radix)?);
            }
            Some(ResolvedValue::Float(value))
        }
    }
}

fn parse_float(text: &str) -> Option<ResolvedValue> {
    let cleaned: String = text.trim().chars().filter(|c| *c != '_').collect();
    cleaned.parse::<f64>().ok().map(ResolvedValue::Float)
}

fn strip_binary_prefix(text: &str) -> &str {
    text.strip_prefix(['b', 'B']).unwrap_or(text)
}

fn single_quoted_body(text: &str) -> Option<&str> {
    strip_binary_prefix(text)
        .strip_prefix('\'')?
        .strip_suffix('\'')
}

fn double_quoted_body(text: &str) -> Option<&str> {
    strip_binary_prefix(text)
        .strip_prefix('"')?
        .strip_suffix('"')
}

fn unescape_single_quoted(body: &str) -> String {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == '\\' || next == '\'' {
                    result.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        result.push(c);
    }
    result
}

/// Decode double-quoted escapes. Heredocs do not treat `\"` as an escape.
fn unescape_double_quoted(body: &str, quoted: bool) -> String {
    let mut result = String::with_capacity(body.len());
    let chars: Vec<char> = body.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c != '\\' || i + 1 >= chars.len() {
            result.push(c);
            i += 1;
            continue;
        }

        let next = chars[i + 1];
        i += 2;
        match next {
            'n' => result.push('\n'),
            't' => result.push('\t'),
            'r' => result.push('\r'),
            'v' => result.push('\u{0B}'),
            'e' => result.push('\u{1B}'),
            'f' => result.push('\u{0C}'),
            '\\' => result.push('\\'),
            '$' => result.push('$'),
            '"' if quoted => result.push('"'),
            '0'..='7' => {
                let mut value = next.to_digit(8).unwrap_or(0);
                let mut taken = 1;
                while taken < 3 && i < chars.len() {
                    match chars[i].to_digit(8) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            i += 1;
                            taken += 1;
                        }
                        None => break,
                    }
                }
                push_byte_char(&mut result, value & 0xFF);
            }
            'x' if i < chars.len() && chars[i].is_ascii_hexdigit() => {
                let mut value = 0;
                let mut taken = 0;
                while taken < 2 && i < chars.len() {
                    match chars[i].to_digit(16) {
                        Some(digit) => {
                            value = value * 16 + digit;
                            i += 1;
                            taken += 1;
                        }
                        None => break,
                    }
                }
                push_byte_char(&mut result, value);
            }
            'u' if i < chars.len() && chars[i] == '{' => {
                let close = chars[i..].iter().position(|c| *c == '}');
                let decoded = close.and_then(|offset| {
                    let hex: String = chars[i + 1..i + offset].iter().collect();
                    u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32).map(|ch| (ch, offset))
                });
                match decoded {
                    Some((ch, offset)) => {
                        result.push(ch);
                        i += offset + 1;
                    }
                    None => {
                        result.push('\\');
                        result.push('u');
                    }
                }
            }
            other => {
                result.push('\\');
                result.push(other);
            }
        }
    }
    result
}

fn push_byte_char(result: &mut String, value: u32) {
    if let Some(ch) = char::from_u32(value) {
        result.push(ch);
    }
}

/// Body of a heredoc/nowdoc with the closing marker's indentation removed.
fn heredoc_body(text: &str) -> Option<String> {
    let text = strip_binary_prefix(text.trim_end());
    let rest = text.strip_prefix("<<<")?;
    let (opening, remainder) = rest.split_once('\n')?;
    let marker = opening.trim().trim_matches(|c| c == '"' || c == '\'');
    if marker.is_empty() {
        return None;
    }

    let lines: Vec<&str> = remainder.split('\n').collect();
    let (closing, body_lines) = lines.split_last()?;
    let closing = closing.trim_end_matches('\r');
    let indentation = closing.strip_suffix(marker)?;
    if !indentation.chars().all(|c| c == ' ' || c == '\t') {
        return None;
    }

    let body: Vec<&str> = body_lines
        .iter()
        .map(|line| line.strip_prefix(indentation).unwrap_or(line.trim_start()))
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    Some(body.join("\n"))
}

//! Flatten a values tree into Helm `--set` expressions.
//!
//! Pure functions only: no I/O, no async.

use serde_yaml::{Mapping, Number, Value};

/// Characters that make Helm's `--set` parser split or reinterpret a value.
const QUOTE_TRIGGERS: [char; 9] = [' ', '=', ':', '{', '}', '[', ']', '"', '\''];

/// Escape a string value for `--set`.
///
/// Commas are backslash-escaped first; the result is then wrapped in double
/// quotes if it contains any of [`QUOTE_TRIGGERS`] and is not already quoted.
/// The order matters: quoting first would hide commas from the escape.
#[must_use]
pub fn escape_value(value: &str) -> String {
    let escaped = value.replace(',', r"\,");
    let needs_quotes = escaped.contains(QUOTE_TRIGGERS);
    if needs_quotes && !(escaped.starts_with('"') && escaped.ends_with('"')) {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}

/// Render a YAML number.
///
/// Floats always keep a fractional part (`1.0`, not `1`) so Helm does not
/// read them back as integers. Non-finite floats render as `nan`, `inf` and
/// `-inf`, which Helm keeps as strings.
#[must_use]
pub fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(f) if number.is_f64() => {
            if f.is_nan() {
                "nan".to_string()
            } else if f.is_infinite() && f.is_sign_negative() {
                "-inf".to_string()
            } else if f.is_infinite() {
                "inf".to_string()
            } else {
                format!("{f:?}")
            }
        }
        _ => number.to_string(),
    }
}

/// Render one value in `--set` syntax.
///
/// Sequences become `{a,b}` and maps `{k:v}`; their elements lose any
/// wrapping quotes. YAML tags are dropped.
#[must_use]
pub fn to_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => escape_value(s),
        Value::Sequence(items) => {
            let inner: Vec<String> = items.iter().map(inline_element).collect();
            format!("{{{}}}", inner.join(","))
        }
        Value::Mapping(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}:{}", key_text(k), inline_element(v)))
                .collect();
            format!("{{{}}}", inner.join(","))
        }
        Value::Tagged(tagged) => to_scalar(&tagged.value),
    }
}

fn inline_element(value: &Value) -> String {
    to_scalar(value).trim_matches('"').to_string()
}

/// Keys such as `1:` or `true:` are written in their plain scalar form.
fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => to_scalar(other),
    }
}

/// Flatten `values` depth-first into `a.b.c=value` expressions, in the map's
/// insertion order.
///
/// Non-empty maps are walked; every other value (including an empty map,
/// rendered `{}`) becomes one expression.
#[must_use]
pub fn flatten_to_set_expressions(values: &Mapping) -> Vec<String> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    walk(values, &mut path, &mut out);
    out
}

fn walk(map: &Mapping, path: &mut Vec<String>, out: &mut Vec<String>) {
    for (key, value) in map {
        path.push(key_text(key));
        match value {
            Value::Mapping(nested) if !nested.is_empty() => walk(nested, path, out),
            leaf => out.push(format!("{}={}", path.join("."), to_scalar(leaf))),
        }
        path.pop();
    }
}

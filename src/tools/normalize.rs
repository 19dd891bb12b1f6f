//! Lenient field accessors used by the tool normalizers.
//!
//! Every accessor is total: a missing key, `null`, an empty string or a value of
//! the wrong type yields the supplied default. Indexing a non-object `Value`
//! with a key yields `Null`, so nested lookups never fail either.

use serde_json::Value;

pub fn text(value: &Value, key: &str, default: &str) -> String {
    match &value[key] {
        Value::String(s) if !s.is_empty() => s.clone(),
        _ => default.to_string(),
    }
}

/// Numbers, or strings holding a number. Zero counts as absent.
pub fn number(value: &Value, key: &str, default: f64) -> f64 {
    let parsed = match &value[key] {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() && n != 0.0 => n,
        _ => default,
    }
}

/// Like [`number`], but only accepts JSON numbers
pub fn strict_number(value: &Value, key: &str, default: f64) -> f64 {
    value[key]
        .as_f64()
        .filter(|n| n.is_finite())
        .unwrap_or(default)
}

/// Maps every element of an array field; anything that is not an array is empty
pub fn list<T>(value: &Value, key: &str, item: impl Fn(&Value) -> T) -> Vec<T> {
    value[key]
        .as_array()
        .map(|items| items.iter().map(item).collect())
        .unwrap_or_default()
}

/// String elements of an array field; other elements are dropped
pub fn text_list(value: &Value, key: &str) -> Vec<String> {
    value[key]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Parses an enum-like string field, falling back to `default` on unknown values
pub fn variant<T>(value: &Value, key: &str, parse: fn(&str) -> Option<T>, default: T) -> T {
    value[key].as_str().and_then(parse).unwrap_or(default)
}

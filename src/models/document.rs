//! Helpers for reading loosely-typed documents.
//!
//! Trip and user documents have drifted across several product versions, so
//! nothing here assumes a field exists or has the expected type. Every helper
//! answers `None`/`false`/`0` instead of failing.

use serde_json::{Map, Value};

/// Returns the first key in `keys` that is present and not `null`.
pub fn first_present<'a>(object: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let map = object.as_object()?;
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|value| !value.is_null())
}

pub fn first_array<'a>(object: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    let map = object.as_object()?;
    keys.iter().find_map(|key| map.get(*key).and_then(Value::as_array))
}

pub fn first_object<'a>(object: &'a Value, keys: &[&str]) -> Option<&'a Map<String, Value>> {
    let map = object.as_object()?;
    keys.iter().find_map(|key| map.get(*key).and_then(Value::as_object))
}

/// Reads a number, accepting strings that parse fully as a number.
///
/// `"5"` and `" 12.5 "` are numbers, `"5 days"` is not. Non-finite values are
/// rejected.
pub fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    number.is_finite().then_some(number)
}

/// Reads a non-blank string, trimmed.
pub fn as_text(value: &Value) -> Option<&str> {
    value
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// `true` only for the JSON boolean `true` or the string `"true"`.
pub fn as_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// An object or array with at least one entry, or a non-blank string.
pub fn is_non_empty(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.trim().is_empty(),
        Value::Null => false,
        _ => true,
    }
}

/// Lowercases and drops every non-alphanumeric character, so `"Budget-Friendly"`,
/// `"budget friendly"` and `"BUDGET_FRIENDLY"` all read as `"budgetfriendly"`.
pub fn normalize_key(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

//! Conversions between API structs and framework values
//!
//! API structs serialize with the dashboard's camelCase field names;
//! Terraform state uses snake_case attribute names. These helpers cross
//! that boundary while preserving the null-vs-absent distinction: an
//! absent optional never materializes as a state attribute, a null stays
//! null.

use serde::Serialize;
use serde_json::Value;
use tfcore::types::{AttributePath, Dynamic, DynamicValue};

/// camelCase → snake_case for state attribute names.
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Convert a JSON value to a [`Dynamic`], renaming object keys to
/// snake_case on the way.
pub fn json_to_dynamic(value: &Value) -> Dynamic {
    match value {
        Value::Null => Dynamic::Null,
        Value::Bool(b) => Dynamic::Bool(*b),
        Value::Number(n) => Dynamic::Number(n.as_f64().unwrap_or_default()),
        Value::String(s) => Dynamic::String(s.clone()),
        Value::Array(items) => Dynamic::List(items.iter().map(json_to_dynamic).collect()),
        Value::Object(entries) => Dynamic::Map(
            entries
                .iter()
                .map(|(key, item)| (snake_case(key), json_to_dynamic(item)))
                .collect(),
        ),
    }
}

/// Serialize an API struct (or list of them) straight into a state value.
pub fn to_state_dynamic<T: Serialize>(value: &T) -> Result<Dynamic, serde_json::Error> {
    Ok(json_to_dynamic(&serde_json::to_value(value)?))
}

/// A list of strings as a state value.
pub fn string_list(values: &[String]) -> Dynamic {
    Dynamic::List(
        values
            .iter()
            .map(|s| Dynamic::String(s.clone()))
            .collect(),
    )
}

/// Optional typed reads from config/state; absent, null and mistyped all
/// collapse to `None`, matching how optional attributes are consumed.
pub fn opt_string(value: &DynamicValue, name: &str) -> Option<String> {
    value.get_string(&AttributePath::new(name)).ok()
}

pub fn opt_bool(value: &DynamicValue, name: &str) -> Option<bool> {
    value.get_bool(&AttributePath::new(name)).ok()
}

pub fn opt_number(value: &DynamicValue, name: &str) -> Option<f64> {
    value.get_number(&AttributePath::new(name)).ok()
}

pub fn opt_u32(value: &DynamicValue, name: &str) -> Option<u32> {
    opt_number(value, name).map(|n| n as u32)
}

pub fn opt_string_list(value: &DynamicValue, name: &str) -> Option<Vec<String>> {
    let items = value.get_list(&AttributePath::new(name)).ok()?;
    Some(
        items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
    )
}

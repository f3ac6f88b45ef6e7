//! Core value types shared by providers, resources and data sources
//!
//! Configuration and state travel through the framework as [`Dynamic`]
//! values. A `Dynamic` distinguishes an explicit null from an absent map
//! key and from a value that is not yet known during planning; conversion
//! code must preserve those distinctions when crossing into API structs.

use crate::error::{FrameworkError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A Terraform-shaped value of any type.
#[derive(Debug, Clone, PartialEq)]
pub enum Dynamic {
    /// Explicit null
    Null,
    Bool(bool),
    /// All numbers are f64, matching Terraform's number representation
    Number(f64),
    String(String),
    /// Ordered, duplicates allowed
    List(Vec<Dynamic>),
    /// Objects and maps are both represented as string-keyed maps
    Map(HashMap<String, Dynamic>),
    /// Not yet known during planning
    Unknown,
}

/// Sentinel used to round-trip `Unknown` through serde encodings.
const UNKNOWN_SENTINEL: &str = "\u{1}unknown";

impl Dynamic {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Dynamic::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Dynamic::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Dynamic::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Dynamic]> {
        match self {
            Dynamic::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, Dynamic>> {
        match self {
            Dynamic::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Dynamic::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Dynamic::Unknown)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Dynamic::Null => "null",
            Dynamic::Bool(_) => "bool",
            Dynamic::Number(_) => "number",
            Dynamic::String(_) => "string",
            Dynamic::List(_) => "list",
            Dynamic::Map(_) => "map",
            Dynamic::Unknown => "unknown",
        }
    }
}

impl Serialize for Dynamic {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Dynamic::Null => serializer.serialize_unit(),
            Dynamic::Bool(b) => serializer.serialize_bool(*b),
            Dynamic::Number(n) => serializer.serialize_f64(*n),
            Dynamic::String(s) => serializer.serialize_str(s),
            Dynamic::List(items) => items.serialize(serializer),
            Dynamic::Map(entries) => entries.serialize(serializer),
            Dynamic::Unknown => serializer.serialize_str(UNKNOWN_SENTINEL),
        }
    }
}

impl<'de> Deserialize<'de> for Dynamic {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct DynamicVisitor;

        impl<'de> Visitor<'de> for DynamicVisitor {
            type Value = Dynamic;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a null, bool, number, string, sequence or map")
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Null)
            }

            fn visit_none<E: de::Error>(self) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Dynamic, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Dynamic::deserialize(deserializer)
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Bool(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Number(value as f64))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Number(value as f64))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Number(value))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Dynamic, E> {
                if value == UNKNOWN_SENTINEL {
                    Ok(Dynamic::Unknown)
                } else {
                    Ok(Dynamic::String(value.to_string()))
                }
            }

            fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<Dynamic, E> {
                if value == UNKNOWN_SENTINEL {
                    Ok(Dynamic::Unknown)
                } else {
                    Ok(Dynamic::String(value))
                }
            }

            fn visit_seq<V>(self, mut seq: V) -> std::result::Result<Dynamic, V::Error>
            where
                V: de::SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Dynamic::List(items))
            }

            fn visit_map<V>(self, mut map: V) -> std::result::Result<Dynamic, V::Error>
            where
                V: de::MapAccess<'de>,
            {
                let mut entries = HashMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    entries.insert(key, value);
                }
                Ok(Dynamic::Map(entries))
            }
        }

        deserializer.deserialize_any(DynamicVisitor)
    }
}

/// AttributePath addresses a value nested inside a [`DynamicValue`].
#[derive(Debug, Clone, PartialEq)]
pub struct AttributePath {
    pub steps: Vec<AttributePathStep>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributePathStep {
    /// Attribute access by name in an object or map
    AttributeName(String),
    /// Element access by string key in a map
    ElementKeyString(String),
    /// Element access by integer index in a list
    ElementKeyInt(usize),
}

impl AttributePath {
    pub fn new(name: &str) -> Self {
        Self {
            steps: vec![AttributePathStep::AttributeName(name.to_string())],
        }
    }

    pub fn root() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn attribute(mut self, name: &str) -> Self {
        self.steps
            .push(AttributePathStep::AttributeName(name.to_string()));
        self
    }

    pub fn index(mut self, idx: usize) -> Self {
        self.steps.push(AttributePathStep::ElementKeyInt(idx));
        self
    }

    pub fn key(mut self, key: &str) -> Self {
        self.steps
            .push(AttributePathStep::ElementKeyString(key.to_string()));
        self
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, step) in self.steps.iter().enumerate() {
            match step {
                AttributePathStep::AttributeName(name) => {
                    if idx > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                AttributePathStep::ElementKeyString(key) => write!(f, "[\"{}\"]", key)?,
                AttributePathStep::ElementKeyInt(i) => write!(f, "[{}]", i)?,
            }
        }
        Ok(())
    }
}

/// DynamicValue is the unit of configuration and state exchanged with the
/// plugin host. It wraps a [`Dynamic`] and provides typed path accessors and
/// the msgpack/JSON codecs the wire layer expects.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicValue {
    pub value: Dynamic,
}

impl DynamicValue {
    pub fn new(value: Dynamic) -> Self {
        Self { value }
    }

    pub fn null() -> Self {
        Self {
            value: Dynamic::Null,
        }
    }

    pub fn empty_object() -> Self {
        Self {
            value: Dynamic::Map(HashMap::new()),
        }
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    pub fn is_unknown(&self) -> bool {
        self.value.is_unknown()
    }

    /// Terraform encodes state and config as msgpack; a null value is the
    /// empty payload.
    pub fn encode_msgpack(&self) -> Result<Vec<u8>> {
        if self.value.is_null() {
            return Ok(Vec::new());
        }
        rmp_serde::encode::to_vec(&self.value)
            .map_err(|e| FrameworkError::EncodingError(format!("msgpack encoding failed: {}", e)))
    }

    pub fn decode_msgpack(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Ok(Self::null());
        }
        let value = rmp_serde::decode::from_slice(data)
            .map_err(|e| FrameworkError::DecodingError(format!("msgpack decoding failed: {}", e)))?;
        Ok(Self { value })
    }

    pub fn encode_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.value)
            .map_err(|e| FrameworkError::EncodingError(format!("json encoding failed: {}", e)))
    }

    pub fn decode_json(data: &[u8]) -> Result<Self> {
        let value = serde_json::from_slice(data)
            .map_err(|e| FrameworkError::DecodingError(format!("json decoding failed: {}", e)))?;
        Ok(Self { value })
    }

    pub fn get_string(&self, path: &AttributePath) -> Result<String> {
        match self.navigate(path)? {
            Dynamic::String(s) => Ok(s.clone()),
            other => Err(type_mismatch("string", other)),
        }
    }

    pub fn get_number(&self, path: &AttributePath) -> Result<f64> {
        match self.navigate(path)? {
            Dynamic::Number(n) => Ok(*n),
            other => Err(type_mismatch("number", other)),
        }
    }

    pub fn get_bool(&self, path: &AttributePath) -> Result<bool> {
        match self.navigate(path)? {
            Dynamic::Bool(b) => Ok(*b),
            other => Err(type_mismatch("bool", other)),
        }
    }

    pub fn get_list(&self, path: &AttributePath) -> Result<Vec<Dynamic>> {
        match self.navigate(path)? {
            Dynamic::List(items) => Ok(items.clone()),
            other => Err(type_mismatch("list", other)),
        }
    }

    pub fn get_map(&self, path: &AttributePath) -> Result<HashMap<String, Dynamic>> {
        match self.navigate(path)? {
            Dynamic::Map(entries) => Ok(entries.clone()),
            other => Err(type_mismatch("map", other)),
        }
    }

    pub fn set_string(&mut self, path: &AttributePath, value: String) -> Result<()> {
        self.set(path, Dynamic::String(value))
    }

    pub fn set_number(&mut self, path: &AttributePath, value: f64) -> Result<()> {
        self.set(path, Dynamic::Number(value))
    }

    pub fn set_bool(&mut self, path: &AttributePath, value: bool) -> Result<()> {
        self.set(path, Dynamic::Bool(value))
    }

    pub fn set_list(&mut self, path: &AttributePath, value: Vec<Dynamic>) -> Result<()> {
        self.set(path, Dynamic::List(value))
    }

    pub fn set_map(&mut self, path: &AttributePath, value: HashMap<String, Dynamic>) -> Result<()> {
        self.set(path, Dynamic::Map(value))
    }

    /// Mark a computed attribute as unknown during planning.
    pub fn mark_unknown(&mut self, path: &AttributePath) -> Result<()> {
        self.set(path, Dynamic::Unknown)
    }

    fn navigate<'a>(&'a self, path: &AttributePath) -> Result<&'a Dynamic> {
        let mut current = &self.value;

        for step in &path.steps {
            current = match (current, step) {
                (Dynamic::Map(entries), AttributePathStep::AttributeName(name))
                | (Dynamic::Map(entries), AttributePathStep::ElementKeyString(name)) => entries
                    .get(name)
                    .ok_or_else(|| FrameworkError::AttributeNotFound(name.clone()))?,
                (Dynamic::List(items), AttributePathStep::ElementKeyInt(idx)) => items
                    .get(*idx)
                    .ok_or(FrameworkError::IndexOutOfBounds(*idx))?,
                (other, _) => {
                    return Err(type_mismatch("container", other));
                }
            };
        }

        Ok(current)
    }

    pub fn set(&mut self, path: &AttributePath, new_value: Dynamic) -> Result<()> {
        if path.steps.is_empty() {
            self.value = new_value;
            return Ok(());
        }

        if !matches!(self.value, Dynamic::Map(_)) {
            self.value = Dynamic::Map(HashMap::new());
        }

        let mut current = &mut self.value;
        let last = path.steps.len() - 1;

        for (idx, step) in path.steps.iter().enumerate() {
            let is_last = idx == last;
            match (current, step) {
                (Dynamic::Map(entries), AttributePathStep::AttributeName(name))
                | (Dynamic::Map(entries), AttributePathStep::ElementKeyString(name)) => {
                    if is_last {
                        entries.insert(name.clone(), new_value);
                        return Ok(());
                    }
                    let next_is_index = matches!(
                        path.steps.get(idx + 1),
                        Some(AttributePathStep::ElementKeyInt(_))
                    );
                    current = entries.entry(name.clone()).or_insert_with(|| {
                        if next_is_index {
                            Dynamic::List(Vec::new())
                        } else {
                            Dynamic::Map(HashMap::new())
                        }
                    });
                }
                (Dynamic::List(items), AttributePathStep::ElementKeyInt(i)) => {
                    if *i >= items.len() {
                        return Err(FrameworkError::IndexOutOfBounds(*i));
                    }
                    if is_last {
                        items[*i] = new_value;
                        return Ok(());
                    }
                    current = &mut items[*i];
                }
                (other, _) => {
                    return Err(type_mismatch("container", other));
                }
            }
        }

        unreachable!("loop returns on the final path step")
    }
}

fn type_mismatch(expected: &str, actual: &Dynamic) -> FrameworkError {
    FrameworkError::TypeMismatch {
        expected: expected.to_string(),
        actual: actual.type_name().to_string(),
    }
}

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// A single user-facing error or warning surfaced by the provider.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub summary: String,
    pub detail: String,
    pub attribute: Option<AttributePath>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn with_attribute(mut self, path: AttributePath) -> Self {
        self.attribute = Some(path);
        self
    }
}

/// Collection of diagnostics produced by one operation. Errors abort the
/// operation; warnings are shown to the user and the operation proceeds.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            DiagnosticSeverity::Error => self.errors.push(diagnostic),
            DiagnosticSeverity::Warning => self.warnings.push(diagnostic),
        }
    }

    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.add(Diagnostic::error(summary, detail));
    }

    pub fn add_warning(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.add(Diagnostic::warning(summary, detail));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Configuration values as decoded from the plugin host
pub type Config = DynamicValue;

/// Resource state values
pub type State = DynamicValue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_round_trip_through_path() {
        let mut dv = DynamicValue::empty_object();
        dv.set_string(&AttributePath::new("name"), "corp-wifi".to_string())
            .unwrap();

        assert_eq!(
            dv.get_string(&AttributePath::new("name")).unwrap(),
            "corp-wifi"
        );
    }

    #[test]
    fn nested_path_creates_intermediate_maps() {
        let mut dv = DynamicValue::empty_object();
        let path = AttributePath::new("radius").attribute("host");
        dv.set_string(&path, "10.0.0.1".to_string()).unwrap();

        assert_eq!(dv.get_string(&path).unwrap(), "10.0.0.1");
    }

    #[test]
    fn missing_attribute_is_distinct_from_null() {
        let mut dv = DynamicValue::empty_object();
        dv.set(&AttributePath::new("notes"), Dynamic::Null).unwrap();

        assert!(matches!(
            dv.get_string(&AttributePath::new("notes")),
            Err(FrameworkError::TypeMismatch { .. })
        ));
        assert!(matches!(
            dv.get_string(&AttributePath::new("absent")),
            Err(FrameworkError::AttributeNotFound(_))
        ));
    }

    #[test]
    fn msgpack_round_trip_preserves_null_and_unknown() {
        let mut dv = DynamicValue::empty_object();
        dv.set_string(&AttributePath::new("id"), "N_123".to_string())
            .unwrap();
        dv.set(&AttributePath::new("notes"), Dynamic::Null).unwrap();
        dv.mark_unknown(&AttributePath::new("url")).unwrap();

        let encoded = dv.encode_msgpack().unwrap();
        let decoded = DynamicValue::decode_msgpack(&encoded).unwrap();

        assert_eq!(decoded, dv);
    }

    #[test]
    fn null_value_encodes_to_empty_payload() {
        let dv = DynamicValue::null();
        assert!(dv.encode_msgpack().unwrap().is_empty());
        assert!(DynamicValue::decode_msgpack(&[]).unwrap().is_null());
    }

    #[test]
    fn json_round_trip_preserves_lists() {
        let mut dv = DynamicValue::empty_object();
        dv.set_list(
            &AttributePath::new("tags"),
            vec![
                Dynamic::String("branch".to_string()),
                Dynamic::String("floor-2".to_string()),
            ],
        )
        .unwrap();

        let encoded = dv.encode_json().unwrap();
        let decoded = DynamicValue::decode_json(&encoded).unwrap();
        assert_eq!(decoded, dv);
    }

    #[test]
    fn list_index_out_of_bounds_errors() {
        let mut dv = DynamicValue::empty_object();
        dv.set_list(&AttributePath::new("vlans"), vec![Dynamic::Number(10.0)])
            .unwrap();

        let path = AttributePath::new("vlans").index(3);
        assert!(matches!(
            dv.get_number(&path),
            Err(FrameworkError::IndexOutOfBounds(3))
        ));
    }

    #[test]
    fn diagnostics_split_by_severity() {
        let mut diags = Diagnostics::new();
        diags.add_error("boom", "detail");
        diags.add_warning("careful", "detail");

        assert!(diags.has_errors());
        assert_eq!(diags.errors.len(), 1);
        assert_eq!(diags.warnings.len(), 1);
    }

    #[test]
    fn attribute_path_display() {
        let path = AttributePath::new("ports").index(0).attribute("vlan");
        assert_eq!(path.to_string(), "ports[0].vlan");
    }
}

//! Schema declarations for providers, resources and data sources
//!
//! Schemas mirror Terraform's attribute model: each attribute has a type,
//! a required/optional/computed mode and optional validators. Build them
//! with [`SchemaBuilder`] and [`AttributeBuilder`]; call
//! [`Schema::validate_config`] from `validate` implementations to get the
//! required/type/validator checks without hand-rolling them per resource.

use crate::types::{AttributePath, Diagnostics, Dynamic, DynamicValue};
use crate::validator::Validator;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Terraform's attribute type system.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeType {
    String,
    /// Always f64
    Number,
    Bool,
    /// Ordered, duplicates allowed
    List(Box<AttributeType>),
    /// Unordered, unique elements
    Set(Box<AttributeType>),
    /// String keys only
    Map(Box<AttributeType>),
    /// Fixed structure
    Object(HashMap<String, AttributeType>),
}

impl AttributeType {
    /// Whether a dynamic value conforms to this type. Null and unknown are
    /// accepted anywhere; requiredness is checked separately.
    pub fn accepts(&self, value: &Dynamic) -> bool {
        match (self, value) {
            (_, Dynamic::Null) | (_, Dynamic::Unknown) => true,
            (AttributeType::String, Dynamic::String(_)) => true,
            (AttributeType::Number, Dynamic::Number(_)) => true,
            (AttributeType::Bool, Dynamic::Bool(_)) => true,
            (AttributeType::List(elem), Dynamic::List(items))
            | (AttributeType::Set(elem), Dynamic::List(items)) => {
                items.iter().all(|item| elem.accepts(item))
            }
            (AttributeType::Map(elem), Dynamic::Map(entries)) => {
                entries.values().all(|item| elem.accepts(item))
            }
            (AttributeType::Object(fields), Dynamic::Map(entries)) => entries
                .iter()
                .all(|(key, item)| fields.get(key).map_or(true, |t| t.accepts(item))),
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Number => "number",
            AttributeType::Bool => "bool",
            AttributeType::List(_) => "list",
            AttributeType::Set(_) => "set",
            AttributeType::Map(_) => "map",
            AttributeType::Object(_) => "object",
        }
    }
}

/// A single schema attribute.
#[derive(Clone)]
pub struct Attribute {
    pub name: String,
    pub r#type: AttributeType,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    pub validators: Vec<Arc<dyn Validator>>,
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("type", &self.r#type)
            .field("required", &self.required)
            .field("optional", &self.optional)
            .field("computed", &self.computed)
            .field("sensitive", &self.sensitive)
            .field("validators", &self.validators.len())
            .finish()
    }
}

/// Fluent builder for [`Attribute`].
pub struct AttributeBuilder {
    attribute: Attribute,
}

impl AttributeBuilder {
    pub fn new(name: &str, r#type: AttributeType) -> Self {
        Self {
            attribute: Attribute {
                name: name.to_string(),
                r#type,
                description: String::new(),
                required: false,
                optional: false,
                computed: false,
                sensitive: false,
                validators: Vec::new(),
            },
        }
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.attribute.description = desc.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.attribute.required = true;
        self.attribute.optional = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.attribute.optional = true;
        self.attribute.required = false;
        self
    }

    pub fn computed(mut self) -> Self {
        self.attribute.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.attribute.sensitive = true;
        self
    }

    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.attribute.validators.push(Arc::new(validator));
        self
    }

    pub fn build(self) -> Attribute {
        self.attribute
    }
}

/// Schema for a provider block, resource or data source.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Incremented when schema changes require state migration
    pub version: i64,
    pub description: String,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Check a configuration object against this schema: required
    /// attributes must be present and non-null, values must conform to
    /// their declared types, and per-attribute validators run on every
    /// known, non-null value.
    pub fn validate_config(&self, config: &DynamicValue) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();

        let entries = match &config.value {
            Dynamic::Map(entries) => Some(entries),
            Dynamic::Null | Dynamic::Unknown => None,
            other => {
                diagnostics.add_error(
                    "Invalid configuration",
                    format!("Expected an object, got {}", other.type_name()),
                );
                return diagnostics;
            }
        };

        for attr in &self.attributes {
            let value = entries.and_then(|m| m.get(&attr.name));

            if attr.required && value.map_or(true, |v| v.is_null()) {
                diagnostics.add(
                    crate::types::Diagnostic::error(
                        format!("Missing required attribute \"{}\"", attr.name),
                        attr.description.clone(),
                    )
                    .with_attribute(AttributePath::new(&attr.name)),
                );
                continue;
            }

            let Some(value) = value else { continue };
            if value.is_null() || value.is_unknown() {
                continue;
            }

            if !attr.r#type.accepts(value) {
                diagnostics.add(
                    crate::types::Diagnostic::error(
                        format!("Invalid value for \"{}\"", attr.name),
                        format!(
                            "Expected {}, got {}",
                            attr.r#type.name(),
                            value.type_name()
                        ),
                    )
                    .with_attribute(AttributePath::new(&attr.name)),
                );
                continue;
            }

            let path = AttributePath::new(&attr.name);
            for validator in &attr.validators {
                validator.validate(value, &path, &mut diagnostics);
            }
        }

        diagnostics
    }
}

/// Fluent builder for [`Schema`].
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            schema: Schema {
                version: 0,
                description: String::new(),
                attributes: Vec::new(),
            },
        }
    }

    pub fn version(mut self, version: i64) -> Self {
        self.schema.version = version;
        self
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.schema.description = desc.to_string();
        self
    }

    pub fn attribute(mut self, attr: Attribute) -> Self {
        self.schema.attributes.push(attr);
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttributePath;
    use crate::validator::NumberRange;

    fn test_schema() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("test schema")
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .description("Display name")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("vlan", AttributeType::Number)
                    .optional()
                    .validator(NumberRange {
                        min: Some(1.0),
                        max: Some(4094.0),
                    })
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("tags", AttributeType::List(Box::new(AttributeType::String)))
                    .optional()
                    .build(),
            )
            .build()
    }

    #[test]
    fn validate_config_accepts_valid_object() {
        let mut config = DynamicValue::empty_object();
        config
            .set_string(&AttributePath::new("name"), "uplink".to_string())
            .unwrap();
        config
            .set_number(&AttributePath::new("vlan"), 100.0)
            .unwrap();

        let diags = test_schema().validate_config(&config);
        assert!(!diags.has_errors());
    }

    #[test]
    fn validate_config_rejects_missing_required() {
        let config = DynamicValue::empty_object();

        let diags = test_schema().validate_config(&config);
        assert!(diags.has_errors());
        assert!(diags.errors[0].summary.contains("name"));
    }

    #[test]
    fn validate_config_rejects_wrong_type() {
        let mut config = DynamicValue::empty_object();
        config
            .set_string(&AttributePath::new("name"), "uplink".to_string())
            .unwrap();
        config
            .set_string(&AttributePath::new("vlan"), "not-a-number".to_string())
            .unwrap();

        let diags = test_schema().validate_config(&config);
        assert!(diags.has_errors());
        assert!(diags.errors[0].summary.contains("vlan"));
    }

    #[test]
    fn validate_config_runs_attribute_validators() {
        let mut config = DynamicValue::empty_object();
        config
            .set_string(&AttributePath::new("name"), "uplink".to_string())
            .unwrap();
        config
            .set_number(&AttributePath::new("vlan"), 9000.0)
            .unwrap();

        let diags = test_schema().validate_config(&config);
        assert!(diags.has_errors());
        assert!(diags.errors[0].summary.contains("at most"));
    }

    #[test]
    fn validate_config_accepts_unknown_values() {
        let mut config = DynamicValue::empty_object();
        config
            .set_string(&AttributePath::new("name"), "uplink".to_string())
            .unwrap();
        config.mark_unknown(&AttributePath::new("vlan")).unwrap();

        let diags = test_schema().validate_config(&config);
        assert!(!diags.has_errors());
    }

    #[test]
    fn type_accepts_nested_lists() {
        let ty = AttributeType::List(Box::new(AttributeType::String));
        let good = Dynamic::List(vec![Dynamic::String("a".to_string()), Dynamic::Null]);
        let bad = Dynamic::List(vec![Dynamic::Number(1.0)]);

        assert!(ty.accepts(&good));
        assert!(!ty.accepts(&bad));
    }
}

//! Attribute validators
//!
//! Validators attach to schema attributes and run during config validation.
//! They only inspect known, non-null values; requiredness and typing are
//! enforced by [`crate::schema::Schema::validate_config`].

use crate::types::{AttributePath, Diagnostics, Dynamic};

pub trait Validator: Send + Sync {
    /// Human-readable description, used in documentation output
    fn description(&self) -> String;

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Diagnostics);
}

/// Bounds on string length.
pub struct StringLength {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl Validator for StringLength {
    fn description(&self) -> String {
        format!("string length in [{:?}, {:?}]", self.min, self.max)
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Diagnostics) {
        let Some(s) = value.as_str() else { return };

        if let Some(min) = self.min {
            if s.len() < min {
                diagnostics.add_error(
                    format!("{} must be at least {} characters", path, min),
                    format!("Got length {}", s.len()),
                );
            }
        }
        if let Some(max) = self.max {
            if s.len() > max {
                diagnostics.add_error(
                    format!("{} must be at most {} characters", path, max),
                    format!("Got length {}", s.len()),
                );
            }
        }
    }
}

/// Inclusive numeric range.
pub struct NumberRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Validator for NumberRange {
    fn description(&self) -> String {
        format!("number in [{:?}, {:?}]", self.min, self.max)
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Diagnostics) {
        let Some(n) = value.as_number() else { return };

        if let Some(min) = self.min {
            if n < min {
                diagnostics.add_error(
                    format!("{} must be at least {}", path, min),
                    format!("Got {}", n),
                );
            }
        }
        if let Some(max) = self.max {
            if n > max {
                diagnostics.add_error(
                    format!("{} must be at most {}", path, max),
                    format!("Got {}", n),
                );
            }
        }
    }
}

/// String must match a regular expression.
pub struct StringPattern {
    pub pattern: regex::Regex,
    pub description: String,
}

impl Validator for StringPattern {
    fn description(&self) -> String {
        self.description.clone()
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Diagnostics) {
        let Some(s) = value.as_str() else { return };

        if !self.pattern.is_match(s) {
            diagnostics.add_error(
                format!("{} must match {}", path, self.description),
                format!("Value \"{}\" does not match pattern", s),
            );
        }
    }
}

/// String must be one of a fixed set, e.g. an enumerated API field.
pub struct OneOf {
    pub allowed: &'static [&'static str],
}

impl Validator for OneOf {
    fn description(&self) -> String {
        format!("one of {:?}", self.allowed)
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Diagnostics) {
        let Some(s) = value.as_str() else { return };

        if !self.allowed.contains(&s) {
            diagnostics.add_error(
                format!("{} must be one of {:?}", path, self.allowed),
                format!("Got \"{}\"", s),
            );
        }
    }
}

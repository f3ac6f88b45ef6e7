//! tfcore - provider framework core for Terraform providers in Rust
//!
//! The crate covers the provider-side surface of the plugin model: dynamic
//! values with null/unknown semantics, schema declarations with builders
//! and validators, diagnostics, the `Provider`/`Resource`/`DataSource`
//! traits, and the msgpack/JSON codecs state and config travel through.
//! Serving the wire protocol is the host's concern, not this crate's.

pub mod context;
pub mod error;
pub mod schema;
pub mod types;
pub mod validator;

pub mod data_source;
pub mod import;
pub mod provider;
pub mod resource;

pub use context::Context;
pub use data_source::DataSource;
pub use error::{FrameworkError, Result};
pub use import::import_state_passthrough_id;
pub use provider::Provider;
pub use resource::{Resource, ResourceWithImportState};
pub use schema::{Attribute, AttributeBuilder, AttributeType, Schema, SchemaBuilder};
pub use types::{
    AttributePath, Config, Diagnostic, DiagnosticSeverity, Diagnostics, Dynamic, DynamicValue,
    State,
};

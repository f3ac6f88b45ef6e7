//! Provider trait
//!
//! A provider owns the shared API client and hands it to the resources and
//! data sources it constructs. `configure` is called exactly once before
//! any factory method.

use crate::context::Context;
use crate::data_source::DataSource;
use crate::error::Result;
use crate::resource::Resource;
use crate::schema::Schema;
use crate::types::{Diagnostics, DynamicValue};
use async_trait::async_trait;
use std::collections::HashMap;

#[async_trait]
pub trait Provider: Send + Sync {
    /// Schema of the provider configuration block.
    fn schema(&self) -> Schema;

    /// Build the shared client from config, falling back to environment
    /// variables where the config is silent.
    async fn configure(
        &mut self,
        ctx: Context,
        request: ConfigureProviderRequest,
    ) -> ConfigureProviderResponse;

    fn resource_schemas(&self) -> HashMap<String, Schema>;

    fn data_source_schemas(&self) -> HashMap<String, Schema>;

    /// Construct the named resource, wired to the configured client.
    fn resource(&self, type_name: &str) -> Result<Box<dyn Resource>>;

    /// Construct the named data source, wired to the configured client.
    fn data_source(&self, type_name: &str) -> Result<Box<dyn DataSource>>;
}

pub struct ConfigureProviderRequest {
    pub config: DynamicValue,
}

pub struct ConfigureProviderResponse {
    pub diagnostics: Diagnostics,
}

impl ConfigureProviderRequest {
    pub fn new(config: DynamicValue) -> Self {
        Self { config }
    }
}

/// Convenience for validate-style calls made before configure.
pub struct ValidateProviderConfigRequest {
    pub config: DynamicValue,
}

pub struct ValidateProviderConfigResponse {
    pub diagnostics: Diagnostics,
}

impl dyn Provider {
    /// Validate a provider config block against [`Provider::schema`].
    pub fn validate_config(
        &self,
        _ctx: Context,
        request: ValidateProviderConfigRequest,
    ) -> ValidateProviderConfigResponse {
        ValidateProviderConfigResponse {
            diagnostics: self.schema().validate_config(&request.config),
        }
    }
}

//! Terraform provider for the Canopy cloud-managed network dashboard

pub mod api;
pub mod data_sources;
pub mod provider_data;
pub mod resources;
pub mod util;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::OnceLock;
use tfcore::provider::{ConfigureProviderRequest, ConfigureProviderResponse, Provider};
use tfcore::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfcore::types::Diagnostics;
use tfcore::{Context, DataSource, FrameworkError, Resource};

use crate::api::Client;
use crate::provider_data::CanopyProviderData;
use crate::util::value::opt_string;

pub const DEFAULT_BASE_URL: &str = "https://dashboard.canopy.net/api/v1";

pub struct CanopyProvider {
    data: Option<CanopyProviderData>,
}

impl CanopyProvider {
    pub fn new() -> Self {
        Self { data: None }
    }
}

impl Default for CanopyProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for CanopyProvider {
    fn schema(&self) -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Canopy dashboard provider")
            .attribute(
                AttributeBuilder::new("api_key", AttributeType::String)
                    .description("Dashboard API key; falls back to CANOPY_API_KEY")
                    .optional()
                    .sensitive()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("base_url", AttributeType::String)
                    .description("Dashboard API base URL; falls back to CANOPY_BASE_URL")
                    .optional()
                    .build(),
            )
            .build()
    }

    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureProviderRequest,
    ) -> ConfigureProviderResponse {
        let api_key = opt_string(&request.config, "api_key")
            .or_else(|| std::env::var("CANOPY_API_KEY").ok());

        let base_url = opt_string(&request.config, "base_url")
            .or_else(|| std::env::var("CANOPY_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut diagnostics = Diagnostics::new();

        match api_key {
            Some(api_key) => match Client::new(&base_url, &api_key) {
                Ok(client) => {
                    tracing::debug!(%base_url, "configured dashboard client");
                    self.data = Some(CanopyProviderData::new(client));
                }
                Err(e) => {
                    diagnostics.add_error("Failed to create API client", e.to_string());
                }
            },
            None => {
                diagnostics.add_error(
                    "api_key is required",
                    "Set it in the provider block or the CANOPY_API_KEY environment variable",
                );
            }
        }

        ConfigureProviderResponse { diagnostics }
    }

    fn resource_schemas(&self) -> HashMap<String, Schema> {
        static SCHEMAS: OnceLock<HashMap<String, Schema>> = OnceLock::new();

        SCHEMAS
            .get_or_init(|| {
                HashMap::from([
                    (
                        "canopy_network".to_string(),
                        resources::NetworkResource::resource_schema(),
                    ),
                    (
                        "canopy_ssid".to_string(),
                        resources::SsidResource::resource_schema(),
                    ),
                    (
                        "canopy_switch_port".to_string(),
                        resources::SwitchPortResource::resource_schema(),
                    ),
                    (
                        "canopy_device".to_string(),
                        resources::DeviceResource::resource_schema(),
                    ),
                ])
            })
            .clone()
    }

    fn data_source_schemas(&self) -> HashMap<String, Schema> {
        static SCHEMAS: OnceLock<HashMap<String, Schema>> = OnceLock::new();

        SCHEMAS
            .get_or_init(|| {
                HashMap::from([
                    (
                        "canopy_organizations".to_string(),
                        data_sources::OrganizationsDataSource::data_source_schema(),
                    ),
                    (
                        "canopy_networks".to_string(),
                        data_sources::NetworksDataSource::data_source_schema(),
                    ),
                    (
                        "canopy_devices".to_string(),
                        data_sources::DevicesDataSource::data_source_schema(),
                    ),
                    (
                        "canopy_sensor_readings".to_string(),
                        data_sources::SensorReadingsDataSource::data_source_schema(),
                    ),
                ])
            })
            .clone()
    }

    fn resource(&self, type_name: &str) -> tfcore::Result<Box<dyn Resource>> {
        let data = self
            .data
            .as_ref()
            .ok_or(FrameworkError::ProviderNotConfigured)?;

        match type_name {
            "canopy_network" => Ok(Box::new(resources::NetworkResource::new(
                data.client.clone(),
            ))),
            "canopy_ssid" => Ok(Box::new(resources::SsidResource::new(data.client.clone()))),
            "canopy_switch_port" => Ok(Box::new(resources::SwitchPortResource::new(
                data.client.clone(),
            ))),
            "canopy_device" => Ok(Box::new(resources::DeviceResource::new(
                data.client.clone(),
            ))),
            _ => Err(FrameworkError::ResourceNotFound(type_name.to_string())),
        }
    }

    fn data_source(&self, type_name: &str) -> tfcore::Result<Box<dyn DataSource>> {
        let data = self
            .data
            .as_ref()
            .ok_or(FrameworkError::ProviderNotConfigured)?;

        match type_name {
            "canopy_organizations" => Ok(Box::new(data_sources::OrganizationsDataSource::new(
                data.client.clone(),
            ))),
            "canopy_networks" => Ok(Box::new(data_sources::NetworksDataSource::new(
                data.client.clone(),
            ))),
            "canopy_devices" => Ok(Box::new(data_sources::DevicesDataSource::new(
                data.client.clone(),
            ))),
            "canopy_sensor_readings" => Ok(Box::new(data_sources::SensorReadingsDataSource::new(
                data.client.clone(),
            ))),
            _ => Err(FrameworkError::DataSourceNotFound(type_name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tfcore::types::{AttributePath, DynamicValue};

    fn config_with(entries: &[(&str, &str)]) -> ConfigureProviderRequest {
        let mut config = DynamicValue::empty_object();
        for (key, value) in entries {
            config
                .set_string(&AttributePath::new(key), value.to_string())
                .unwrap();
        }
        ConfigureProviderRequest { config }
    }

    #[tokio::test]
    #[serial]
    async fn configure_uses_env_vars_when_config_empty() {
        std::env::set_var("CANOPY_API_KEY", "env-key");
        std::env::set_var("CANOPY_BASE_URL", "https://localhost:8443/api/v1");

        let mut provider = CanopyProvider::new();
        let response = provider.configure(Context::new(), config_with(&[])).await;

        assert!(!response.diagnostics.has_errors());
        assert!(provider.data.is_some());

        std::env::remove_var("CANOPY_API_KEY");
        std::env::remove_var("CANOPY_BASE_URL");
    }

    #[tokio::test]
    #[serial]
    async fn configure_requires_api_key() {
        std::env::remove_var("CANOPY_API_KEY");

        let mut provider = CanopyProvider::new();
        let response = provider.configure(Context::new(), config_with(&[])).await;

        assert!(response.diagnostics.has_errors());
        assert!(response.diagnostics.errors[0]
            .summary
            .contains("api_key is required"));
    }

    #[tokio::test]
    #[serial]
    async fn configure_prefers_config_over_env() {
        std::env::set_var("CANOPY_BASE_URL", "not a url at all");

        let mut provider = CanopyProvider::new();
        let response = provider
            .configure(
                Context::new(),
                config_with(&[
                    ("api_key", "config-key"),
                    ("base_url", "https://dashboard.example.net/api/v1"),
                ]),
            )
            .await;

        assert!(!response.diagnostics.has_errors());

        std::env::remove_var("CANOPY_BASE_URL");
    }

    #[tokio::test]
    #[serial]
    async fn configure_rejects_invalid_base_url() {
        let mut provider = CanopyProvider::new();
        let response = provider
            .configure(
                Context::new(),
                config_with(&[("api_key", "key"), ("base_url", "not-a-url")]),
            )
            .await;

        assert!(response.diagnostics.has_errors());
    }

    #[tokio::test]
    #[serial]
    async fn factories_require_configuration() {
        let provider = CanopyProvider::new();

        let resource = provider.resource("canopy_network");
        assert!(matches!(
            resource.err(),
            Some(FrameworkError::ProviderNotConfigured)
        ));

        let data_source = provider.data_source("canopy_networks");
        assert!(matches!(
            data_source.err(),
            Some(FrameworkError::ProviderNotConfigured)
        ));
    }

    #[tokio::test]
    #[serial]
    async fn factories_reject_unknown_type_names() {
        let mut provider = CanopyProvider::new();
        provider
            .configure(
                Context::new(),
                config_with(&[
                    ("api_key", "key"),
                    ("base_url", "https://localhost:8443/api/v1"),
                ]),
            )
            .await;

        assert!(matches!(
            provider.resource("canopy_unknown").err(),
            Some(FrameworkError::ResourceNotFound(_))
        ));
        assert!(matches!(
            provider.data_source("canopy_unknown").err(),
            Some(FrameworkError::DataSourceNotFound(_))
        ));

        assert!(provider.resource("canopy_ssid").is_ok());
        assert!(provider.data_source("canopy_sensor_readings").is_ok());
    }

    #[tokio::test]
    async fn schema_maps_cover_every_registered_type() {
        let provider = CanopyProvider::new();

        let resource_schemas = provider.resource_schemas();
        for name in [
            "canopy_network",
            "canopy_ssid",
            "canopy_switch_port",
            "canopy_device",
        ] {
            assert!(resource_schemas.contains_key(name), "missing {}", name);
        }

        let data_source_schemas = provider.data_source_schemas();
        for name in [
            "canopy_organizations",
            "canopy_networks",
            "canopy_devices",
            "canopy_sensor_readings",
        ] {
            assert!(data_source_schemas.contains_key(name), "missing {}", name);
        }
    }

    #[tokio::test]
    async fn provider_schema_marks_api_key_sensitive() {
        let provider = CanopyProvider::new();
        let schema = provider.schema();

        let api_key = schema.attribute("api_key").unwrap();
        assert!(api_key.sensitive);
        assert!(!api_key.required);
    }
}

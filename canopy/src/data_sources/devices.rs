//! Devices data source
//!
//! Maps two GET variants: list-by-organization (with network/product/search
//! filters) and get-by-serial.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tfcore::context::Context;
use tfcore::data_source::{DataSource, ReadDataSourceRequest, ReadDataSourceResponse};
use tfcore::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfcore::types::{AttributePath, Diagnostics, DynamicValue};

use crate::api::devices::DeviceListFilters;
use crate::api::Client;
use crate::util::method::pick_method;
use crate::util::value::{opt_string, to_state_dynamic};

pub struct DevicesDataSource {
    client: Arc<Client>,
}

impl DevicesDataSource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub fn data_source_schema() -> Schema {
        let device_object = AttributeType::Object(HashMap::from([
            ("serial".to_string(), AttributeType::String),
            ("name".to_string(), AttributeType::String),
            ("model".to_string(), AttributeType::String),
            ("mac".to_string(), AttributeType::String),
            ("network_id".to_string(), AttributeType::String),
            ("address".to_string(), AttributeType::String),
            ("lat".to_string(), AttributeType::Number),
            ("lng".to_string(), AttributeType::Number),
            (
                "tags".to_string(),
                AttributeType::List(Box::new(AttributeType::String)),
            ),
            ("notes".to_string(), AttributeType::String),
            ("firmware".to_string(), AttributeType::String),
        ]));

        SchemaBuilder::new()
            .version(0)
            .description("Devices in an organization, or a single device by serial")
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("organization_id", AttributeType::String)
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("serial", AttributeType::String)
                    .description("Fetch a single device instead of listing")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("network_id", AttributeType::String)
                    .description("Only list devices in this network")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("product_type", AttributeType::String)
                    .description("Only list devices of this product type")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("search", AttributeType::String)
                    .description("Match on name, MAC or serial")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("devices", AttributeType::List(Box::new(device_object)))
                    .computed()
                    .build(),
            )
            .build()
    }
}

#[async_trait]
impl DataSource for DevicesDataSource {
    fn type_name(&self) -> &str {
        "canopy_devices"
    }

    fn schema(&self) -> Schema {
        Self::data_source_schema()
    }

    async fn read(&self, _ctx: Context, request: ReadDataSourceRequest) -> ReadDataSourceResponse {
        let mut diagnostics = Diagnostics::new();

        let organization_id = opt_string(&request.config, "organization_id");
        let serial = opt_string(&request.config, "serial");

        // list-by-organization < get-by-serial
        let variant = pick_method(&[&[organization_id.is_some()], &[serial.is_some()]]);

        let result = match (variant, serial.as_deref()) {
            (1, Some(serial)) => self.client.get_device(serial).await.map(|device| vec![device]),
            _ => {
                let Some(organization_id) = organization_id.as_deref() else {
                    diagnostics.add_error(
                        "Missing filter",
                        "Either \"organization_id\" or \"serial\" must be set",
                    );
                    return ReadDataSourceResponse {
                        state: DynamicValue::null(),
                        diagnostics,
                    };
                };
                let filters = DeviceListFilters {
                    network_ids: opt_string(&request.config, "network_id")
                        .into_iter()
                        .collect(),
                    product_types: opt_string(&request.config, "product_type")
                        .into_iter()
                        .collect(),
                    search: opt_string(&request.config, "search"),
                    per_page: None,
                };
                self.client.list_devices(organization_id, &filters).await
            }
        };

        let devices = match result {
            Ok(devices) => devices,
            Err(e) => {
                diagnostics.add_error("Failed to read devices", format!("API error: {}", e));
                return ReadDataSourceResponse {
                    state: DynamicValue::null(),
                    diagnostics,
                };
            }
        };

        let mut state = DynamicValue::empty_object();
        let _ = state.set_string(
            &AttributePath::new("id"),
            serial
                .clone()
                .or(organization_id.clone())
                .unwrap_or_else(|| "devices".to_string()),
        );
        for (name, value) in [
            ("organization_id", organization_id),
            ("serial", serial),
            ("network_id", opt_string(&request.config, "network_id")),
            ("product_type", opt_string(&request.config, "product_type")),
            ("search", opt_string(&request.config, "search")),
        ] {
            if let Some(value) = value {
                let _ = state.set_string(&AttributePath::new(name), value);
            }
        }

        match to_state_dynamic(&devices) {
            Ok(list) => {
                let _ = state.set(&AttributePath::new("devices"), list);
            }
            Err(e) => {
                diagnostics.add_error("Failed to encode devices", e.to_string());
            }
        }

        ReadDataSourceResponse { state, diagnostics }
    }
}

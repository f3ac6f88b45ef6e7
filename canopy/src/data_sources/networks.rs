//! Networks data source
//!
//! Maps two GET variants: list-by-organization (with tag filters) and
//! get-by-id.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tfcore::context::Context;
use tfcore::data_source::{DataSource, ReadDataSourceRequest, ReadDataSourceResponse};
use tfcore::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfcore::types::{AttributePath, Diagnostics, DynamicValue};

use crate::api::networks::NetworkListFilters;
use crate::api::Client;
use crate::util::method::pick_method;
use crate::util::value::{opt_string, opt_string_list, to_state_dynamic};

pub struct NetworksDataSource {
    client: Arc<Client>,
}

impl NetworksDataSource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub fn data_source_schema() -> Schema {
        let network_object = AttributeType::Object(HashMap::from([
            ("id".to_string(), AttributeType::String),
            ("organization_id".to_string(), AttributeType::String),
            ("name".to_string(), AttributeType::String),
            (
                "product_types".to_string(),
                AttributeType::List(Box::new(AttributeType::String)),
            ),
            ("time_zone".to_string(), AttributeType::String),
            (
                "tags".to_string(),
                AttributeType::List(Box::new(AttributeType::String)),
            ),
            ("notes".to_string(), AttributeType::String),
            ("url".to_string(), AttributeType::String),
        ]));

        SchemaBuilder::new()
            .version(0)
            .description("Networks in an organization, or a single network by id")
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("organization_id", AttributeType::String)
                    .description("List networks of this organization")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("network_id", AttributeType::String)
                    .description("Fetch a single network instead of listing")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("tags", AttributeType::List(Box::new(AttributeType::String)))
                    .description("Only list networks carrying all of these tags")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("networks", AttributeType::List(Box::new(network_object)))
                    .computed()
                    .build(),
            )
            .build()
    }
}

#[async_trait]
impl DataSource for NetworksDataSource {
    fn type_name(&self) -> &str {
        "canopy_networks"
    }

    fn schema(&self) -> Schema {
        Self::data_source_schema()
    }

    async fn read(&self, _ctx: Context, request: ReadDataSourceRequest) -> ReadDataSourceResponse {
        let mut diagnostics = Diagnostics::new();

        let organization_id = opt_string(&request.config, "organization_id");
        let network_id = opt_string(&request.config, "network_id");

        // list-by-organization < get-by-id
        let variant = pick_method(&[&[organization_id.is_some()], &[network_id.is_some()]]);

        let result = match (variant, network_id.as_deref()) {
            (1, Some(id)) => self.client.get_network(id).await.map(|network| vec![network]),
            _ => {
                let Some(organization_id) = organization_id.as_deref() else {
                    diagnostics.add_error(
                        "Missing filter",
                        "Either \"organization_id\" or \"network_id\" must be set",
                    );
                    return ReadDataSourceResponse {
                        state: DynamicValue::null(),
                        diagnostics,
                    };
                };
                let filters = NetworkListFilters {
                    tags: opt_string_list(&request.config, "tags").unwrap_or_default(),
                    per_page: None,
                };
                self.client.list_networks(organization_id, &filters).await
            }
        };

        let networks = match result {
            Ok(networks) => networks,
            Err(e) => {
                diagnostics.add_error("Failed to read networks", format!("API error: {}", e));
                return ReadDataSourceResponse {
                    state: DynamicValue::null(),
                    diagnostics,
                };
            }
        };

        let mut state = DynamicValue::empty_object();
        let _ = state.set_string(
            &AttributePath::new("id"),
            network_id
                .clone()
                .or(organization_id.clone())
                .unwrap_or_else(|| "networks".to_string()),
        );
        if let Some(id) = organization_id {
            let _ = state.set_string(&AttributePath::new("organization_id"), id);
        }
        if let Some(id) = network_id {
            let _ = state.set_string(&AttributePath::new("network_id"), id);
        }
        if let Some(tags) = opt_string_list(&request.config, "tags") {
            let _ = state.set(
                &AttributePath::new("tags"),
                crate::util::value::string_list(&tags),
            );
        }

        match to_state_dynamic(&networks) {
            Ok(list) => {
                let _ = state.set(&AttributePath::new("networks"), list);
            }
            Err(e) => {
                diagnostics.add_error("Failed to encode networks", e.to_string());
            }
        }

        ReadDataSourceResponse { state, diagnostics }
    }
}

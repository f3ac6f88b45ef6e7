//! Organizations data source
//!
//! Maps two GET variants: list-all and get-by-id. The most specific
//! variant whose inputs are supplied wins.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tfcore::context::Context;
use tfcore::data_source::{DataSource, ReadDataSourceRequest, ReadDataSourceResponse};
use tfcore::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfcore::types::{AttributePath, Diagnostics, DynamicValue};

use crate::api::Client;
use crate::util::method::pick_method;
use crate::util::value::{opt_string, to_state_dynamic};

pub struct OrganizationsDataSource {
    client: Arc<Client>,
}

impl OrganizationsDataSource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub fn data_source_schema() -> Schema {
        let organization_object = AttributeType::Object(HashMap::from([
            ("id".to_string(), AttributeType::String),
            ("name".to_string(), AttributeType::String),
            ("url".to_string(), AttributeType::String),
            (
                "api".to_string(),
                AttributeType::Object(HashMap::from([(
                    "enabled".to_string(),
                    AttributeType::Bool,
                )])),
            ),
        ]));

        SchemaBuilder::new()
            .version(0)
            .description("Organizations visible to the configured API key")
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("organization_id", AttributeType::String)
                    .description("Narrow the result to a single organization")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new(
                    "organizations",
                    AttributeType::List(Box::new(organization_object)),
                )
                .computed()
                .build(),
            )
            .build()
    }
}

#[async_trait]
impl DataSource for OrganizationsDataSource {
    fn type_name(&self) -> &str {
        "canopy_organizations"
    }

    fn schema(&self) -> Schema {
        Self::data_source_schema()
    }

    async fn read(&self, _ctx: Context, request: ReadDataSourceRequest) -> ReadDataSourceResponse {
        let mut diagnostics = Diagnostics::new();

        let organization_id = opt_string(&request.config, "organization_id");

        // list-all < get-by-id
        let variant = pick_method(&[&[true], &[organization_id.is_some()]]);

        let result = match (variant, organization_id.as_deref()) {
            (1, Some(id)) => self.client.get_organization(id).await.map(|org| vec![org]),
            _ => self.client.list_organizations().await,
        };

        let organizations = match result {
            Ok(organizations) => organizations,
            Err(e) => {
                diagnostics.add_error(
                    "Failed to read organizations",
                    format!("API error: {}", e),
                );
                return ReadDataSourceResponse {
                    state: DynamicValue::null(),
                    diagnostics,
                };
            }
        };

        let mut state = DynamicValue::empty_object();
        let _ = state.set_string(
            &AttributePath::new("id"),
            organization_id
                .clone()
                .unwrap_or_else(|| "organizations".to_string()),
        );
        if let Some(id) = organization_id {
            let _ = state.set_string(&AttributePath::new("organization_id"), id);
        }

        match to_state_dynamic(&organizations) {
            Ok(list) => {
                let _ = state.set(&AttributePath::new("organizations"), list);
            }
            Err(e) => {
                diagnostics.add_error("Failed to encode organizations", e.to_string());
            }
        }

        ReadDataSourceResponse { state, diagnostics }
    }
}

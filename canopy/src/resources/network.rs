//! Network resource
//!
//! The one resource with true lifecycle verbs: networks are created and
//! deleted through the API rather than emulated.

use async_trait::async_trait;
use std::sync::Arc;
use tfcore::context::Context;
use tfcore::import::import_state_passthrough_id;
use tfcore::resource::{
    CreateResourceRequest, CreateResourceResponse, DeleteResourceRequest, DeleteResourceResponse,
    ImportResourceStateRequest, ImportResourceStateResponse, ReadResourceRequest,
    ReadResourceResponse, Resource, ResourceWithImportState, UpdateResourceRequest,
    UpdateResourceResponse,
};
use tfcore::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfcore::types::{AttributePath, Diagnostics, DynamicValue};
use tfcore::validator::StringLength;

use crate::api::networks::{CreateNetworkRequest, Network, UpdateNetworkRequest};
use crate::api::Client;
use crate::util::merge::merge_remote_into_plan;
use crate::util::value::{json_to_dynamic, opt_string, opt_string_list};

pub struct NetworkResource {
    client: Arc<Client>,
}

impl NetworkResource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub fn resource_schema() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Manages a network and its membership in an organization")
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .description("Network id assigned by the dashboard")
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("organization_id", AttributeType::String)
                    .description("Organization the network belongs to")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .description("Display name of the network")
                    .required()
                    .validator(StringLength {
                        min: Some(1),
                        max: Some(255),
                    })
                    .build(),
            )
            .attribute(
                AttributeBuilder::new(
                    "product_types",
                    AttributeType::List(Box::new(AttributeType::String)),
                )
                .description("Product types bound to the network, e.g. switch, wireless, sensor")
                .required()
                .build(),
            )
            .attribute(
                AttributeBuilder::new("time_zone", AttributeType::String)
                    .description("IANA time zone of the network")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("tags", AttributeType::List(Box::new(AttributeType::String)))
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("notes", AttributeType::String)
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("url", AttributeType::String)
                    .description("Dashboard URL of the network")
                    .computed()
                    .build(),
            )
            .build()
    }

    /// Reassemble the API shape from config/plan/state values so the merge
    /// runs over two objects of the same shape.
    fn network_from_value(value: &DynamicValue) -> Network {
        Network {
            id: opt_string(value, "id").unwrap_or_default(),
            organization_id: opt_string(value, "organization_id"),
            name: opt_string(value, "name").unwrap_or_default(),
            product_types: opt_string_list(value, "product_types").unwrap_or_default(),
            time_zone: opt_string(value, "time_zone"),
            tags: opt_string_list(value, "tags"),
            notes: opt_string(value, "notes"),
            url: opt_string(value, "url"),
        }
    }

    /// Merge the freshly fetched network over the planned one and convert
    /// to state, so plan-supplied values survive fields the API is silent
    /// on.
    fn state_from(
        planned: &Network,
        fetched: &Network,
        diagnostics: &mut Diagnostics,
    ) -> Option<DynamicValue> {
        let planned_value = match serde_json::to_value(planned) {
            Ok(v) => v,
            Err(e) => {
                diagnostics.add_error("Failed to encode planned network", e.to_string());
                return None;
            }
        };
        let fetched_value = match serde_json::to_value(fetched) {
            Ok(v) => v,
            Err(e) => {
                diagnostics.add_error("Failed to encode fetched network", e.to_string());
                return None;
            }
        };

        let merged = merge_remote_into_plan(&planned_value, &fetched_value);
        Some(DynamicValue::new(json_to_dynamic(&merged)))
    }
}

#[async_trait]
impl Resource for NetworkResource {
    fn type_name(&self) -> &str {
        "canopy_network"
    }

    fn schema(&self) -> Schema {
        Self::resource_schema()
    }

    async fn create(
        &self,
        _ctx: Context,
        request: CreateResourceRequest,
    ) -> CreateResourceResponse {
        let mut diagnostics = Diagnostics::new();

        let Some(organization_id) = opt_string(&request.config, "organization_id") else {
            diagnostics.add_error(
                "Missing organization_id",
                "The \"organization_id\" attribute is required",
            );
            return CreateResourceResponse {
                new_state: request.planned_state,
                diagnostics,
            };
        };

        let create = CreateNetworkRequest {
            name: opt_string(&request.config, "name").unwrap_or_default(),
            product_types: opt_string_list(&request.config, "product_types").unwrap_or_default(),
            time_zone: opt_string(&request.config, "time_zone"),
            tags: opt_string_list(&request.config, "tags"),
            notes: opt_string(&request.config, "notes"),
        };

        tracing::debug!(%organization_id, name = %create.name, "creating network");

        match self.client.create_network(&organization_id, &create).await {
            Ok(network) => {
                let mut planned = Self::network_from_value(&request.planned_state);
                planned.organization_id = Some(organization_id);
                match Self::state_from(&planned, &network, &mut diagnostics) {
                    Some(new_state) => CreateResourceResponse {
                        new_state,
                        diagnostics,
                    },
                    None => CreateResourceResponse {
                        new_state: request.planned_state,
                        diagnostics,
                    },
                }
            }
            Err(e) => {
                diagnostics.add_error("Failed to create network", format!("API error: {}", e));
                CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                }
            }
        }
    }

    async fn read(&self, _ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse {
        let mut diagnostics = Diagnostics::new();

        let Some(network_id) = opt_string(&request.current_state, "id") else {
            // No id in state means the resource never finished creating
            return ReadResourceResponse {
                new_state: None,
                diagnostics,
                private: request.private,
            };
        };

        match self.client.get_network(&network_id).await {
            Ok(network) => {
                let prior = Self::network_from_value(&request.current_state);
                let new_state = Self::state_from(&prior, &network, &mut diagnostics)
                    .unwrap_or_else(|| request.current_state.clone());
                ReadResourceResponse {
                    new_state: Some(new_state),
                    diagnostics,
                    private: request.private,
                }
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!(%network_id, "network gone, dropping from state");
                ReadResourceResponse {
                    new_state: None,
                    diagnostics,
                    private: request.private,
                }
            }
            Err(e) => {
                diagnostics.add_error("Failed to read network", format!("API error: {}", e));
                ReadResourceResponse {
                    new_state: Some(request.current_state),
                    diagnostics,
                    private: request.private,
                }
            }
        }
    }

    async fn update(
        &self,
        _ctx: Context,
        request: UpdateResourceRequest,
    ) -> UpdateResourceResponse {
        let mut diagnostics = Diagnostics::new();

        let Some(network_id) = opt_string(&request.prior_state, "id") else {
            diagnostics.add_error(
                "Missing network id",
                "State has no \"id\"; the resource must be recreated",
            );
            return UpdateResourceResponse {
                new_state: request.prior_state,
                diagnostics,
            };
        };

        let update = UpdateNetworkRequest {
            name: opt_string(&request.config, "name"),
            time_zone: opt_string(&request.config, "time_zone"),
            tags: opt_string_list(&request.config, "tags"),
            notes: opt_string(&request.config, "notes"),
        };

        match self.client.update_network(&network_id, &update).await {
            Ok(network) => {
                let planned = Self::network_from_value(&request.planned_state);
                match Self::state_from(&planned, &network, &mut diagnostics) {
                    Some(new_state) => UpdateResourceResponse {
                        new_state,
                        diagnostics,
                    },
                    None => UpdateResourceResponse {
                        new_state: request.prior_state,
                        diagnostics,
                    },
                }
            }
            Err(e) => {
                diagnostics.add_error("Failed to update network", format!("API error: {}", e));
                UpdateResourceResponse {
                    new_state: request.prior_state,
                    diagnostics,
                }
            }
        }
    }

    async fn delete(
        &self,
        _ctx: Context,
        request: DeleteResourceRequest,
    ) -> DeleteResourceResponse {
        let mut diagnostics = Diagnostics::new();

        let Some(network_id) = opt_string(&request.prior_state, "id") else {
            // Nothing to delete without an id
            return DeleteResourceResponse { diagnostics };
        };

        if let Err(e) = self.client.delete_network(&network_id).await {
            diagnostics.add_error("Failed to delete network", format!("API error: {}", e));
        }

        DeleteResourceResponse { diagnostics }
    }
}

#[async_trait]
impl ResourceWithImportState for NetworkResource {
    async fn import_state(
        &self,
        _ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let mut response = ImportResourceStateResponse {
            imported_resources: vec![],
            diagnostics: Diagnostics::new(),
        };
        import_state_passthrough_id(&AttributePath::new("id"), &request, &mut response);
        response
    }
}

//! Switch port resource
//!
//! Ports exist for the lifetime of the switch; create is emulated by
//! fetching the port and pushing the planned configuration, delete removes
//! state only. The composite id is "{serial},{port_id}".

use async_trait::async_trait;
use std::sync::Arc;
use tfcore::context::Context;
use tfcore::resource::{
    CreateResourceRequest, CreateResourceResponse, DeleteResourceRequest, DeleteResourceResponse,
    ImportResourceStateRequest, ImportResourceStateResponse, ImportedResource,
    ReadResourceRequest, ReadResourceResponse, Resource, ResourceWithImportState,
    UpdateResourceRequest, UpdateResourceResponse,
};
use tfcore::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfcore::types::{AttributePath, Diagnostics, DynamicValue};
use tfcore::validator::{NumberRange, OneOf};

use crate::api::switch::{SwitchPort, UpdateSwitchPortRequest};
use crate::api::Client;
use crate::util::merge::merge_remote_into_plan;
use crate::util::value::{json_to_dynamic, opt_bool, opt_string, opt_string_list, opt_u32};

pub struct SwitchPortResource {
    client: Arc<Client>,
}

impl SwitchPortResource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub fn resource_schema() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Configures a port on a switch")
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .description("Composite id \"{serial},{port_id}\"")
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("serial", AttributeType::String)
                    .description("Serial of the switch")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("port_id", AttributeType::String)
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("enabled", AttributeType::Bool)
                    .optional()
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("type", AttributeType::String)
                    .description("Port mode")
                    .optional()
                    .validator(OneOf {
                        allowed: &["access", "trunk"],
                    })
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
                AttributeBuilder::new("voice_vlan", AttributeType::Number)
                    .optional()
                    .validator(NumberRange {
                        min: Some(1.0),
                        max: Some(4094.0),
                    })
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("allowed_vlans", AttributeType::String)
                    .description("VLAN list for trunk ports, e.g. \"1,10,20-30\"")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("poe_enabled", AttributeType::Bool)
                    .optional()
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("rstp_enabled", AttributeType::Bool)
                    .optional()
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("tags", AttributeType::List(Box::new(AttributeType::String)))
                    .optional()
                    .build(),
            )
            .build()
    }

    fn update_from_value(value: &DynamicValue) -> UpdateSwitchPortRequest {
        UpdateSwitchPortRequest {
            name: opt_string(value, "name"),
            enabled: opt_bool(value, "enabled"),
            port_type: opt_string(value, "type"),
            vlan: opt_u32(value, "vlan"),
            voice_vlan: opt_u32(value, "voice_vlan"),
            allowed_vlans: opt_string(value, "allowed_vlans"),
            poe_enabled: opt_bool(value, "poe_enabled"),
            rstp_enabled: opt_bool(value, "rstp_enabled"),
            tags: opt_string_list(value, "tags"),
        }
    }

    fn port_from_value(value: &DynamicValue, port_id: &str) -> SwitchPort {
        SwitchPort {
            port_id: port_id.to_string(),
            name: opt_string(value, "name"),
            enabled: opt_bool(value, "enabled"),
            port_type: opt_string(value, "type"),
            vlan: opt_u32(value, "vlan"),
            voice_vlan: opt_u32(value, "voice_vlan"),
            allowed_vlans: opt_string(value, "allowed_vlans"),
            poe_enabled: opt_bool(value, "poe_enabled"),
            rstp_enabled: opt_bool(value, "rstp_enabled"),
            tags: opt_string_list(value, "tags"),
        }
    }

    fn state_from(
        serial: &str,
        planned: &SwitchPort,
        fetched: &SwitchPort,
        diagnostics: &mut Diagnostics,
    ) -> Option<DynamicValue> {
        let planned_value = match serde_json::to_value(planned) {
            Ok(v) => v,
            Err(e) => {
                diagnostics.add_error("Failed to encode planned port", e.to_string());
                return None;
            }
        };
        let fetched_value = match serde_json::to_value(fetched) {
            Ok(v) => v,
            Err(e) => {
                diagnostics.add_error("Failed to encode fetched port", e.to_string());
                return None;
            }
        };

        let merged = merge_remote_into_plan(&planned_value, &fetched_value);
        let mut state = DynamicValue::new(json_to_dynamic(&merged));

        let wrote_identity = state
            .set_string(&AttributePath::new("serial"), serial.to_string())
            .and_then(|_| {
                state.set_string(
                    &AttributePath::new("id"),
                    format!("{},{}", serial, planned.port_id),
                )
            });
        if let Err(e) = wrote_identity {
            diagnostics.add_error("Failed to build port state", e.to_string());
            return None;
        }

        Some(state)
    }

    fn port_coordinates(value: &DynamicValue) -> Option<(String, String)> {
        let serial = opt_string(value, "serial")?;
        let port_id = opt_string(value, "port_id")?;
        Some((serial, port_id))
    }
}

#[async_trait]
impl Resource for SwitchPortResource {
    fn type_name(&self) -> &str {
        "canopy_switch_port"
    }

    fn schema(&self) -> Schema {
        Self::resource_schema()
    }

    /// Ports cannot be created; creation fetches the existing port and
    /// pushes the planned configuration.
    async fn create(
        &self,
        _ctx: Context,
        request: CreateResourceRequest,
    ) -> CreateResourceResponse {
        let mut diagnostics = Diagnostics::new();

        let Some((serial, port_id)) = Self::port_coordinates(&request.config) else {
            diagnostics.add_error(
                "Missing port coordinates",
                "Both \"serial\" and \"port_id\" are required",
            );
            return CreateResourceResponse {
                new_state: request.planned_state,
                diagnostics,
            };
        };

        if let Err(e) = self.client.get_switch_port(&serial, &port_id).await {
            diagnostics.add_error("Failed to read switch port", format!("API error: {}", e));
            return CreateResourceResponse {
                new_state: request.planned_state,
                diagnostics,
            };
        }

        let update = Self::update_from_value(&request.config);

        match self
            .client
            .update_switch_port(&serial, &port_id, &update)
            .await
        {
            Ok(port) => {
                let planned = Self::port_from_value(&request.planned_state, &port_id);
                match Self::state_from(&serial, &planned, &port, &mut diagnostics) {
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
                diagnostics.add_error(
                    "Failed to configure switch port",
                    format!("API error: {}", e),
                );
                CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                }
            }
        }
    }

    async fn read(&self, _ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse {
        let mut diagnostics = Diagnostics::new();

        let Some((serial, port_id)) = Self::port_coordinates(&request.current_state) else {
            return ReadResourceResponse {
                new_state: None,
                diagnostics,
                private: request.private,
            };
        };

        match self.client.get_switch_port(&serial, &port_id).await {
            Ok(port) => {
                let prior = Self::port_from_value(&request.current_state, &port_id);
                let new_state = Self::state_from(&serial, &prior, &port, &mut diagnostics)
                    .unwrap_or_else(|| request.current_state.clone());
                ReadResourceResponse {
                    new_state: Some(new_state),
                    diagnostics,
                    private: request.private,
                }
            }
            Err(e) if e.is_not_found() => ReadResourceResponse {
                new_state: None,
                diagnostics,
                private: request.private,
            },
            Err(e) => {
                diagnostics.add_error("Failed to read switch port", format!("API error: {}", e));
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

        let Some((serial, port_id)) = Self::port_coordinates(&request.planned_state) else {
            diagnostics.add_error(
                "Missing port coordinates",
                "State has no \"serial\"/\"port_id\"; the resource must be recreated",
            );
            return UpdateResourceResponse {
                new_state: request.prior_state,
                diagnostics,
            };
        };

        let update = Self::update_from_value(&request.config);

        match self
            .client
            .update_switch_port(&serial, &port_id, &update)
            .await
        {
            Ok(port) => {
                let planned = Self::port_from_value(&request.planned_state, &port_id);
                match Self::state_from(&serial, &planned, &port, &mut diagnostics) {
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
                diagnostics.add_error(
                    "Failed to update switch port",
                    format!("API error: {}", e),
                );
                UpdateResourceResponse {
                    new_state: request.prior_state,
                    diagnostics,
                }
            }
        }
    }

    /// The API has no delete verb for ports; state is removed as-is.
    async fn delete(
        &self,
        _ctx: Context,
        request: DeleteResourceRequest,
    ) -> DeleteResourceResponse {
        let mut diagnostics = Diagnostics::new();

        if let Some((serial, port_id)) = Self::port_coordinates(&request.prior_state) {
            diagnostics.add_warning(
                "Switch port removed from state only",
                format!(
                    "The dashboard has no delete for ports; {}/{} keeps its last configuration",
                    serial, port_id
                ),
            );
        }

        DeleteResourceResponse { diagnostics }
    }
}

#[async_trait]
impl ResourceWithImportState for SwitchPortResource {
    /// Import id format: "{serial},{port_id}".
    async fn import_state(
        &self,
        _ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let mut response = ImportResourceStateResponse {
            imported_resources: vec![],
            diagnostics: Diagnostics::new(),
        };

        let Some((serial, port_id)) = request
            .id
            .split_once(',')
            .map(|(s, p)| (s.trim().to_string(), p.trim().to_string()))
            .filter(|(s, p)| !s.is_empty() && !p.is_empty())
        else {
            response.diagnostics.add_error(
                "Invalid import id",
                format!("Expected \"{{serial}},{{port_id}}\", got \"{}\"", request.id),
            );
            return response;
        };

        let mut state = DynamicValue::empty_object();
        let seeded = state
            .set_string(&AttributePath::new("serial"), serial.clone())
            .and_then(|_| state.set_string(&AttributePath::new("port_id"), port_id.clone()))
            .and_then(|_| {
                state.set_string(&AttributePath::new("id"), format!("{},{}", serial, port_id))
            });

        match seeded {
            Ok(()) => response.imported_resources.push(ImportedResource {
                type_name: request.type_name.clone(),
                state,
            }),
            Err(e) => response
                .diagnostics
                .add_error("Failed to seed imported state", e.to_string()),
        }

        response
    }
}

//! Wireless SSID resource
//!
//! SSID slots always exist on the dashboard, so create is emulated by
//! configuring the slot (get, then update) and delete by resetting it to a
//! disabled default. The composite id is "{network_id},{number}".

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
use tfcore::validator::{NumberRange, OneOf, StringLength};

use crate::api::wireless::{Ssid, UpdateSsidRequest, SSID_SLOTS};
use crate::api::Client;
use crate::util::merge::merge_remote_into_plan;
use crate::util::value::{json_to_dynamic, opt_bool, opt_string, opt_u32};

const AUTH_MODES: &[&str] = &["open", "psk", "8021x-radius"];
const IP_ASSIGNMENT_MODES: &[&str] = &["NAT mode", "Bridge mode", "Layer 3 roaming"];

pub struct SsidResource {
    client: Arc<Client>,
}

impl SsidResource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub fn resource_schema() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Configures a wireless SSID slot on a network")
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .description("Composite id \"{network_id},{number}\"")
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("network_id", AttributeType::String)
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("number", AttributeType::Number)
                    .description("SSID slot number")
                    .required()
                    .validator(NumberRange {
                        min: Some(0.0),
                        max: Some((SSID_SLOTS - 1) as f64),
                    })
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .optional()
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("enabled", AttributeType::Bool)
                    .optional()
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("auth_mode", AttributeType::String)
                    .description("Association control method")
                    .optional()
                    .validator(OneOf {
                        allowed: AUTH_MODES,
                    })
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("psk", AttributeType::String)
                    .description("Pre-shared key, required when auth_mode is psk")
                    .optional()
                    .sensitive()
                    .validator(StringLength {
                        min: Some(8),
                        max: Some(63),
                    })
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("visible", AttributeType::Bool)
                    .description("Whether the SSID is broadcast")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("ip_assignment_mode", AttributeType::String)
                    .optional()
                    .validator(OneOf {
                        allowed: IP_ASSIGNMENT_MODES,
                    })
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("default_vlan_id", AttributeType::Number)
                    .optional()
                    .validator(NumberRange {
                        min: Some(1.0),
                        max: Some(4094.0),
                    })
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("band_selection", AttributeType::String)
                    .optional()
                    .build(),
            )
            .build()
    }

    fn update_from_value(value: &DynamicValue) -> UpdateSsidRequest {
        UpdateSsidRequest {
            name: opt_string(value, "name"),
            enabled: opt_bool(value, "enabled"),
            auth_mode: opt_string(value, "auth_mode"),
            psk: opt_string(value, "psk"),
            visible: opt_bool(value, "visible"),
            ip_assignment_mode: opt_string(value, "ip_assignment_mode"),
            default_vlan_id: opt_u32(value, "default_vlan_id"),
            band_selection: opt_string(value, "band_selection"),
        }
    }

    fn ssid_from_value(value: &DynamicValue, number: u32) -> Ssid {
        Ssid {
            number,
            name: opt_string(value, "name").unwrap_or_default(),
            enabled: opt_bool(value, "enabled").unwrap_or_default(),
            auth_mode: opt_string(value, "auth_mode"),
            psk: opt_string(value, "psk"),
            visible: opt_bool(value, "visible"),
            ip_assignment_mode: opt_string(value, "ip_assignment_mode"),
            default_vlan_id: opt_u32(value, "default_vlan_id"),
            band_selection: opt_string(value, "band_selection"),
        }
    }

    fn state_from(
        network_id: &str,
        planned: &Ssid,
        fetched: &Ssid,
        diagnostics: &mut Diagnostics,
    ) -> Option<DynamicValue> {
        let planned_value = match serde_json::to_value(planned) {
            Ok(v) => v,
            Err(e) => {
                diagnostics.add_error("Failed to encode planned SSID", e.to_string());
                return None;
            }
        };
        let fetched_value = match serde_json::to_value(fetched) {
            Ok(v) => v,
            Err(e) => {
                diagnostics.add_error("Failed to encode fetched SSID", e.to_string());
                return None;
            }
        };

        let merged = merge_remote_into_plan(&planned_value, &fetched_value);
        let mut state = DynamicValue::new(json_to_dynamic(&merged));

        let wrote_identity = state
            .set_string(
                &AttributePath::new("network_id"),
                network_id.to_string(),
            )
            .and_then(|_| {
                state.set_string(
                    &AttributePath::new("id"),
                    format!("{},{}", network_id, planned.number),
                )
            });
        if let Err(e) = wrote_identity {
            diagnostics.add_error("Failed to build SSID state", e.to_string());
            return None;
        }

        Some(state)
    }

    /// Pull the slot coordinates out of config or state.
    fn slot(value: &DynamicValue) -> Option<(String, u32)> {
        let network_id = opt_string(value, "network_id")?;
        let number = opt_u32(value, "number")?;
        Some((network_id, number))
    }
}

#[async_trait]
impl Resource for SsidResource {
    fn type_name(&self) -> &str {
        "canopy_ssid"
    }

    fn schema(&self) -> Schema {
        Self::resource_schema()
    }

    /// The API has no create verb for SSIDs; creation claims the existing
    /// slot by fetching it and pushing the planned configuration.
    async fn create(
        &self,
        _ctx: Context,
        request: CreateResourceRequest,
    ) -> CreateResourceResponse {
        let mut diagnostics = Diagnostics::new();

        let Some((network_id, number)) = Self::slot(&request.config) else {
            diagnostics.add_error(
                "Missing SSID slot",
                "Both \"network_id\" and \"number\" are required",
            );
            return CreateResourceResponse {
                new_state: request.planned_state,
                diagnostics,
            };
        };

        // Confirm the slot exists before configuring it
        if let Err(e) = self.client.get_ssid(&network_id, number).await {
            diagnostics.add_error("Failed to read SSID slot", format!("API error: {}", e));
            return CreateResourceResponse {
                new_state: request.planned_state,
                diagnostics,
            };
        }

        let update = Self::update_from_value(&request.config);

        match self.client.update_ssid(&network_id, number, &update).await {
            Ok(ssid) => {
                let planned = Self::ssid_from_value(&request.planned_state, number);
                match Self::state_from(&network_id, &planned, &ssid, &mut diagnostics) {
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
                diagnostics.add_error("Failed to configure SSID", format!("API error: {}", e));
                CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                }
            }
        }
    }

    async fn read(&self, _ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse {
        let mut diagnostics = Diagnostics::new();

        let Some((network_id, number)) = Self::slot(&request.current_state) else {
            return ReadResourceResponse {
                new_state: None,
                diagnostics,
                private: request.private,
            };
        };

        match self.client.get_ssid(&network_id, number).await {
            Ok(ssid) => {
                let prior = Self::ssid_from_value(&request.current_state, number);
                let new_state = Self::state_from(&network_id, &prior, &ssid, &mut diagnostics)
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
                diagnostics.add_error("Failed to read SSID", format!("API error: {}", e));
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

        let Some((network_id, number)) = Self::slot(&request.planned_state) else {
            diagnostics.add_error(
                "Missing SSID slot",
                "State has no \"network_id\"/\"number\"; the resource must be recreated",
            );
            return UpdateResourceResponse {
                new_state: request.prior_state,
                diagnostics,
            };
        };

        let update = Self::update_from_value(&request.config);

        match self.client.update_ssid(&network_id, number, &update).await {
            Ok(ssid) => {
                let planned = Self::ssid_from_value(&request.planned_state, number);
                match Self::state_from(&network_id, &planned, &ssid, &mut diagnostics) {
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
                diagnostics.add_error("Failed to update SSID", format!("API error: {}", e));
                UpdateResourceResponse {
                    new_state: request.prior_state,
                    diagnostics,
                }
            }
        }
    }

    /// Slots cannot be destroyed; deleting the resource disables the SSID
    /// and removes it from state.
    async fn delete(
        &self,
        _ctx: Context,
        request: DeleteResourceRequest,
    ) -> DeleteResourceResponse {
        let mut diagnostics = Diagnostics::new();

        let Some((network_id, number)) = Self::slot(&request.prior_state) else {
            return DeleteResourceResponse { diagnostics };
        };

        let reset = UpdateSsidRequest {
            enabled: Some(false),
            ..Default::default()
        };

        match self.client.update_ssid(&network_id, number, &reset).await {
            Ok(_) => {
                diagnostics.add_warning(
                    "SSID slot disabled, not deleted",
                    format!(
                        "The dashboard has no delete for SSIDs; slot {} on {} was disabled and removed from state",
                        number, network_id
                    ),
                );
            }
            Err(e) => {
                diagnostics.add_error("Failed to disable SSID", format!("API error: {}", e));
            }
        }

        DeleteResourceResponse { diagnostics }
    }
}

#[async_trait]
impl ResourceWithImportState for SsidResource {
    /// Import id format: "{network_id},{number}".
    async fn import_state(
        &self,
        _ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let mut response = ImportResourceStateResponse {
            imported_resources: vec![],
            diagnostics: Diagnostics::new(),
        };

        let parsed = match request.id.split_once(',') {
            Some((network_id, number)) => number
                .trim()
                .parse::<u32>()
                .ok()
                .map(|n| (network_id.trim().to_string(), n)),
            None => None,
        };

        let Some((network_id, number)) = parsed else {
            response.diagnostics.add_error(
                "Invalid import id",
                format!(
                    "Expected \"{{network_id}},{{number}}\", got \"{}\"",
                    request.id
                ),
            );
            return response;
        };

        let mut state = DynamicValue::empty_object();
        let seeded = state
            .set_string(&AttributePath::new("network_id"), network_id.clone())
            .and_then(|_| state.set_number(&AttributePath::new("number"), number as f64))
            .and_then(|_| {
                state.set_string(
                    &AttributePath::new("id"),
                    format!("{},{}", network_id, number),
                )
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

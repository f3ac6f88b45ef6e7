//! Device resource
//!
//! Devices are claimed into the dashboard out of band, so create is
//! emulated by adopting the device at its serial (get, then update) and
//! delete removes state only.

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

use crate::api::devices::{Device, UpdateDeviceRequest};
use crate::api::Client;
use crate::util::merge::merge_remote_into_plan;
use crate::util::value::{json_to_dynamic, opt_bool, opt_number, opt_string, opt_string_list};

pub struct DeviceResource {
    client: Arc<Client>,
}

impl DeviceResource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub fn resource_schema() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Manages attributes of a claimed device")
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .description("Same as the device serial")
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("serial", AttributeType::String)
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("address", AttributeType::String)
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("lat", AttributeType::Number)
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("lng", AttributeType::Number)
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
                AttributeBuilder::new("move_map_marker", AttributeType::Bool)
                    .description("Recenter the map marker when lat/lng change")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("model", AttributeType::String)
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("mac", AttributeType::String)
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("network_id", AttributeType::String)
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("firmware", AttributeType::String)
                    .computed()
                    .build(),
            )
            .build()
    }

    fn update_from_value(value: &DynamicValue) -> UpdateDeviceRequest {
        UpdateDeviceRequest {
            name: opt_string(value, "name"),
            address: opt_string(value, "address"),
            lat: opt_number(value, "lat"),
            lng: opt_number(value, "lng"),
            tags: opt_string_list(value, "tags"),
            notes: opt_string(value, "notes"),
            move_map_marker: opt_bool(value, "move_map_marker"),
        }
    }

    fn device_from_value(value: &DynamicValue, serial: &str) -> Device {
        Device {
            serial: serial.to_string(),
            name: opt_string(value, "name"),
            model: opt_string(value, "model"),
            mac: opt_string(value, "mac"),
            network_id: opt_string(value, "network_id"),
            address: opt_string(value, "address"),
            lat: opt_number(value, "lat"),
            lng: opt_number(value, "lng"),
            tags: opt_string_list(value, "tags"),
            notes: opt_string(value, "notes"),
            firmware: opt_string(value, "firmware"),
        }
    }

    fn state_from(
        planned: &Device,
        fetched: &Device,
        move_map_marker: Option<bool>,
        diagnostics: &mut Diagnostics,
    ) -> Option<DynamicValue> {
        let planned_value = match serde_json::to_value(planned) {
            Ok(v) => v,
            Err(e) => {
                diagnostics.add_error("Failed to encode planned device", e.to_string());
                return None;
            }
        };
        let fetched_value = match serde_json::to_value(fetched) {
            Ok(v) => v,
            Err(e) => {
                diagnostics.add_error("Failed to encode fetched device", e.to_string());
                return None;
            }
        };

        let merged = merge_remote_into_plan(&planned_value, &fetched_value);
        let mut state = DynamicValue::new(json_to_dynamic(&merged));

        let mut wrote = state.set_string(&AttributePath::new("id"), planned.serial.clone());
        if let Some(move_marker) = move_map_marker {
            // Write-only request flag; the API never echoes it back
            wrote = wrote.and_then(|_| {
                state.set_bool(&AttributePath::new("move_map_marker"), move_marker)
            });
        }
        if let Err(e) = wrote {
            diagnostics.add_error("Failed to build device state", e.to_string());
            return None;
        }

        Some(state)
    }
}

#[async_trait]
impl Resource for DeviceResource {
    fn type_name(&self) -> &str {
        "canopy_device"
    }

    fn schema(&self) -> Schema {
        Self::resource_schema()
    }

    /// Devices cannot be created through the API; creation adopts the
    /// claimed device by fetching it and pushing the planned attributes.
    async fn create(
        &self,
        _ctx: Context,
        request: CreateResourceRequest,
    ) -> CreateResourceResponse {
        let mut diagnostics = Diagnostics::new();

        let Some(serial) = opt_string(&request.config, "serial") else {
            diagnostics.add_error("Missing serial", "The \"serial\" attribute is required");
            return CreateResourceResponse {
                new_state: request.planned_state,
                diagnostics,
            };
        };

        if let Err(e) = self.client.get_device(&serial).await {
            diagnostics.add_error("Failed to read device", format!("API error: {}", e));
            return CreateResourceResponse {
                new_state: request.planned_state,
                diagnostics,
            };
        }

        let update = Self::update_from_value(&request.config);

        match self.client.update_device(&serial, &update).await {
            Ok(device) => {
                let planned = Self::device_from_value(&request.planned_state, &serial);
                match Self::state_from(
                    &planned,
                    &device,
                    update.move_map_marker,
                    &mut diagnostics,
                ) {
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
                diagnostics.add_error("Failed to configure device", format!("API error: {}", e));
                CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                }
            }
        }
    }

    async fn read(&self, _ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse {
        let mut diagnostics = Diagnostics::new();

        let Some(serial) = opt_string(&request.current_state, "serial") else {
            return ReadResourceResponse {
                new_state: None,
                diagnostics,
                private: request.private,
            };
        };

        match self.client.get_device(&serial).await {
            Ok(device) => {
                let prior = Self::device_from_value(&request.current_state, &serial);
                let move_marker = opt_bool(&request.current_state, "move_map_marker");
                let new_state =
                    Self::state_from(&prior, &device, move_marker, &mut diagnostics)
                        .unwrap_or_else(|| request.current_state.clone());
                ReadResourceResponse {
                    new_state: Some(new_state),
                    diagnostics,
                    private: request.private,
                }
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!(%serial, "device gone, dropping from state");
                ReadResourceResponse {
                    new_state: None,
                    diagnostics,
                    private: request.private,
                }
            }
            Err(e) => {
                diagnostics.add_error("Failed to read device", format!("API error: {}", e));
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

        let Some(serial) = opt_string(&request.planned_state, "serial") else {
            diagnostics.add_error(
                "Missing serial",
                "State has no \"serial\"; the resource must be recreated",
            );
            return UpdateResourceResponse {
                new_state: request.prior_state,
                diagnostics,
            };
        };

        let update = Self::update_from_value(&request.config);

        match self.client.update_device(&serial, &update).await {
            Ok(device) => {
                let planned = Self::device_from_value(&request.planned_state, &serial);
                match Self::state_from(
                    &planned,
                    &device,
                    update.move_map_marker,
                    &mut diagnostics,
                ) {
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
                diagnostics.add_error("Failed to update device", format!("API error: {}", e));
                UpdateResourceResponse {
                    new_state: request.prior_state,
                    diagnostics,
                }
            }
        }
    }

    /// The API has no way to release a device; state is removed as-is.
    async fn delete(
        &self,
        _ctx: Context,
        request: DeleteResourceRequest,
    ) -> DeleteResourceResponse {
        let mut diagnostics = Diagnostics::new();

        if let Some(serial) = opt_string(&request.prior_state, "serial") {
            diagnostics.add_warning(
                "Device removed from state only",
                format!(
                    "The dashboard has no delete for devices; {} keeps its last configuration",
                    serial
                ),
            );
        }

        DeleteResourceResponse { diagnostics }
    }
}

#[async_trait]
impl ResourceWithImportState for DeviceResource {
    /// Import id is the device serial.
    async fn import_state(
        &self,
        _ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let mut response = ImportResourceStateResponse {
            imported_resources: vec![],
            diagnostics: Diagnostics::new(),
        };
        import_state_passthrough_id(&AttributePath::new("serial"), &request, &mut response);
        response
    }
}

//! Sensor readings data source
//!
//! Maps two GET variants: latest readings and reading history. Supplying a
//! timespan start selects the history variant.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tfcore::context::Context;
use tfcore::data_source::{DataSource, ReadDataSourceRequest, ReadDataSourceResponse};
use tfcore::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfcore::types::{AttributePath, Diagnostics, DynamicValue};

use crate::api::sensor::SensorReadingFilters;
use crate::api::Client;
use crate::util::method::pick_method;
use crate::util::value::{opt_string, opt_string_list, to_state_dynamic};

pub struct SensorReadingsDataSource {
    client: Arc<Client>,
}

impl SensorReadingsDataSource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub fn data_source_schema() -> Schema {
        let reading_object = AttributeType::Object(HashMap::from([
            ("serial".to_string(), AttributeType::String),
            ("ts".to_string(), AttributeType::String),
            ("metric".to_string(), AttributeType::String),
            ("value".to_string(), AttributeType::Number),
            ("network_id".to_string(), AttributeType::String),
        ]));

        SchemaBuilder::new()
            .version(0)
            .description("Sensor readings for an organization, latest or over a timespan")
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("organization_id", AttributeType::String)
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new(
                    "serials",
                    AttributeType::List(Box::new(AttributeType::String)),
                )
                .description("Only readings from these sensors")
                .optional()
                .build(),
            )
            .attribute(
                AttributeBuilder::new(
                    "metrics",
                    AttributeType::List(Box::new(AttributeType::String)),
                )
                .description("Only these metrics, e.g. temperature, humidity, door")
                .optional()
                .build(),
            )
            .attribute(
                AttributeBuilder::new("t0", AttributeType::String)
                    .description("Timespan start (RFC 3339); selects the history variant")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("t1", AttributeType::String)
                    .description("Timespan end (RFC 3339)")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("readings", AttributeType::List(Box::new(reading_object)))
                    .computed()
                    .build(),
            )
            .build()
    }
}

fn parse_timestamp(
    raw: Option<String>,
    name: &str,
    diagnostics: &mut Diagnostics,
) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(&raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            diagnostics.add_error(
                format!("Invalid {} timestamp", name),
                format!("\"{}\" is not RFC 3339: {}", raw, e),
            );
            None
        }
    }
}

#[async_trait]
impl DataSource for SensorReadingsDataSource {
    fn type_name(&self) -> &str {
        "canopy_sensor_readings"
    }

    fn schema(&self) -> Schema {
        Self::data_source_schema()
    }

    async fn read(&self, _ctx: Context, request: ReadDataSourceRequest) -> ReadDataSourceResponse {
        let mut diagnostics = Diagnostics::new();

        let Some(organization_id) = opt_string(&request.config, "organization_id") else {
            diagnostics.add_error(
                "Missing organization_id",
                "The \"organization_id\" attribute is required",
            );
            return ReadDataSourceResponse {
                state: DynamicValue::null(),
                diagnostics,
            };
        };

        let t0 = parse_timestamp(opt_string(&request.config, "t0"), "t0", &mut diagnostics);
        let t1 = parse_timestamp(opt_string(&request.config, "t1"), "t1", &mut diagnostics);
        if diagnostics.has_errors() {
            return ReadDataSourceResponse {
                state: DynamicValue::null(),
                diagnostics,
            };
        }

        let filters = SensorReadingFilters {
            serials: opt_string_list(&request.config, "serials").unwrap_or_default(),
            metrics: opt_string_list(&request.config, "metrics").unwrap_or_default(),
            t0,
            t1,
            per_page: None,
        };

        // latest < history-with-timespan
        let variant = pick_method(&[&[true], &[t0.is_some()]]);

        let result = if variant == 1 {
            self.client
                .sensor_reading_history(&organization_id, &filters)
                .await
        } else {
            self.client
                .latest_sensor_readings(&organization_id, &filters)
                .await
        };

        let readings = match result {
            Ok(readings) => readings,
            Err(e) => {
                diagnostics.add_error(
                    "Failed to read sensor readings",
                    format!("API error: {}", e),
                );
                return ReadDataSourceResponse {
                    state: DynamicValue::null(),
                    diagnostics,
                };
            }
        };

        let mut state = DynamicValue::empty_object();
        let _ = state.set_string(&AttributePath::new("id"), organization_id.clone());
        let _ = state.set_string(&AttributePath::new("organization_id"), organization_id);
        for (name, value) in [
            ("t0", opt_string(&request.config, "t0")),
            ("t1", opt_string(&request.config, "t1")),
        ] {
            if let Some(value) = value {
                let _ = state.set_string(&AttributePath::new(name), value);
            }
        }
        for (name, values) in [
            ("serials", opt_string_list(&request.config, "serials")),
            ("metrics", opt_string_list(&request.config, "metrics")),
        ] {
            if let Some(values) = values {
                let _ = state.set(
                    &AttributePath::new(name),
                    crate::util::value::string_list(&values),
                );
            }
        }

        match to_state_dynamic(&readings) {
            Ok(list) => {
                let _ = state.set(&AttributePath::new("readings"), list);
            }
            Err(e) => {
                diagnostics.add_error("Failed to encode sensor readings", e.to_string());
            }
        }

        ReadDataSourceResponse { state, diagnostics }
    }
}

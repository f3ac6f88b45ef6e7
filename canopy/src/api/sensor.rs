//! Sensor reading endpoints (read-only)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::client::Client;
use super::common::ApiQueryParams;
use super::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub serial: String,
    pub ts: DateTime<Utc>,
    pub metric: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
}

/// Filters shared by the latest and history listings; `t0`/`t1` only apply
/// to history.
#[derive(Debug, Clone, Default)]
pub struct SensorReadingFilters {
    pub serials: Vec<String>,
    pub metrics: Vec<String>,
    pub t0: Option<DateTime<Utc>>,
    pub t1: Option<DateTime<Utc>>,
    pub per_page: Option<u32>,
}

impl SensorReadingFilters {
    fn to_query_params(&self, with_timespan: bool) -> ApiQueryParams {
        let mut params = ApiQueryParams::new()
            .add_each("serials", &self.serials)
            .add_each("metrics", &self.metrics)
            .add_optional("perPage", self.per_page);
        if with_timespan {
            params = params
                .add_optional("t0", self.t0.map(|t| t.to_rfc3339()))
                .add_optional("t1", self.t1.map(|t| t.to_rfc3339()));
        }
        params
    }
}

impl Client {
    /// GET /organizations/{organizationId}/sensor/readings/latest
    pub async fn latest_sensor_readings(
        &self,
        organization_id: &str,
        filters: &SensorReadingFilters,
    ) -> Result<Vec<SensorReading>, ApiError> {
        self.get_with_params(
            &format!("/organizations/{}/sensor/readings/latest", organization_id),
            &filters.to_query_params(false),
        )
        .await
    }

    /// GET /organizations/{organizationId}/sensor/readings/history
    pub async fn sensor_reading_history(
        &self,
        organization_id: &str,
        filters: &SensorReadingFilters,
    ) -> Result<Vec<SensorReading>, ApiError> {
        self.get_with_params(
            &format!("/organizations/{}/sensor/readings/history", organization_id),
            &filters.to_query_params(true),
        )
        .await
    }
}

//! Device endpoints
//!
//! Devices are claimed into the dashboard out of band; the API exposes
//! get/update by serial but no create or delete.

use serde::{Deserialize, Serialize};

use super::client::Client;
use super::common::ApiQueryParams;
use super::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub serial: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeviceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_map_marker: Option<bool>,
}

/// Optional filters for the organization-wide device listing.
#[derive(Debug, Clone, Default)]
pub struct DeviceListFilters {
    pub network_ids: Vec<String>,
    pub product_types: Vec<String>,
    pub search: Option<String>,
    pub per_page: Option<u32>,
}

impl DeviceListFilters {
    fn to_query_params(&self) -> ApiQueryParams {
        ApiQueryParams::new()
            .add_each("networkIds", &self.network_ids)
            .add_each("productTypes", &self.product_types)
            .add_optional("search", self.search.clone())
            .add_optional("perPage", self.per_page)
    }
}

impl Client {
    /// GET /organizations/{organizationId}/devices
    pub async fn list_devices(
        &self,
        organization_id: &str,
        filters: &DeviceListFilters,
    ) -> Result<Vec<Device>, ApiError> {
        self.get_with_params(
            &format!("/organizations/{}/devices", organization_id),
            &filters.to_query_params(),
        )
        .await
    }

    /// GET /devices/{serial}
    pub async fn get_device(&self, serial: &str) -> Result<Device, ApiError> {
        self.get(&format!("/devices/{}", serial)).await
    }

    /// PUT /devices/{serial}
    pub async fn update_device(
        &self,
        serial: &str,
        request: &UpdateDeviceRequest,
    ) -> Result<Device, ApiError> {
        self.put(&format!("/devices/{}", serial), request).await
    }
}

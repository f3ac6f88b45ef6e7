//! Network endpoints
//!
//! Networks are the one entity family with true lifecycle verbs on the
//! dashboard: create and delete exist alongside get/update.

use serde::{Deserialize, Serialize};

use super::client::Client;
use super::common::ApiQueryParams;
use super::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub product_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNetworkRequest {
    pub name: String,
    pub product_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNetworkRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Optional filters for the organization-wide network listing.
#[derive(Debug, Clone, Default)]
pub struct NetworkListFilters {
    pub tags: Vec<String>,
    pub per_page: Option<u32>,
}

impl NetworkListFilters {
    fn to_query_params(&self) -> ApiQueryParams {
        ApiQueryParams::new()
            .add_each("tags", &self.tags)
            .add_optional("perPage", self.per_page)
    }
}

impl Client {
    /// GET /organizations/{organizationId}/networks
    pub async fn list_networks(
        &self,
        organization_id: &str,
        filters: &NetworkListFilters,
    ) -> Result<Vec<Network>, ApiError> {
        self.get_with_params(
            &format!("/organizations/{}/networks", organization_id),
            &filters.to_query_params(),
        )
        .await
    }

    /// GET /networks/{networkId}
    pub async fn get_network(&self, network_id: &str) -> Result<Network, ApiError> {
        self.get(&format!("/networks/{}", network_id)).await
    }

    /// POST /organizations/{organizationId}/networks
    pub async fn create_network(
        &self,
        organization_id: &str,
        request: &CreateNetworkRequest,
    ) -> Result<Network, ApiError> {
        self.post(
            &format!("/organizations/{}/networks", organization_id),
            request,
        )
        .await
    }

    /// PUT /networks/{networkId}
    pub async fn update_network(
        &self,
        network_id: &str,
        request: &UpdateNetworkRequest,
    ) -> Result<Network, ApiError> {
        self.put(&format!("/networks/{}", network_id), request).await
    }

    /// DELETE /networks/{networkId}
    pub async fn delete_network(&self, network_id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/networks/{}", network_id)).await
    }
}

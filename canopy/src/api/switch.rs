//! Switch port endpoints
//!
//! Ports exist for the lifetime of the switch; the API exposes get and
//! update per port, never create or delete.

use serde::{Deserialize, Serialize};

use super::client::Client;
use super::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwitchPort {
    pub port_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub port_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_vlan: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_vlans: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poe_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rstp_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSwitchPortRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub port_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_vlan: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_vlans: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poe_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rstp_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Client {
    /// GET /devices/{serial}/switch/ports
    pub async fn list_switch_ports(&self, serial: &str) -> Result<Vec<SwitchPort>, ApiError> {
        self.get(&format!("/devices/{}/switch/ports", serial)).await
    }

    /// GET /devices/{serial}/switch/ports/{portId}
    pub async fn get_switch_port(
        &self,
        serial: &str,
        port_id: &str,
    ) -> Result<SwitchPort, ApiError> {
        self.get(&format!("/devices/{}/switch/ports/{}", serial, port_id))
            .await
    }

    /// PUT /devices/{serial}/switch/ports/{portId}
    pub async fn update_switch_port(
        &self,
        serial: &str,
        port_id: &str,
        request: &UpdateSwitchPortRequest,
    ) -> Result<SwitchPort, ApiError> {
        self.put(
            &format!("/devices/{}/switch/ports/{}", serial, port_id),
            request,
        )
        .await
    }
}

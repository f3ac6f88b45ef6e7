//! Wireless SSID endpoints
//!
//! SSID slots always exist on a wireless network (numbers 0-14); the API
//! only exposes get and update. "Creating" an SSID configures a slot,
//! "deleting" one resets it.

use serde::{Deserialize, Serialize};

use super::client::Client;
use super::error::ApiError;

pub const SSID_SLOTS: u32 = 15;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ssid {
    pub number: u32,
    pub name: String,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_assignment_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_vlan_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band_selection: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSsidRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_assignment_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_vlan_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band_selection: Option<String>,
}

impl Client {
    /// GET /networks/{networkId}/wireless/ssids
    pub async fn list_ssids(&self, network_id: &str) -> Result<Vec<Ssid>, ApiError> {
        self.get(&format!("/networks/{}/wireless/ssids", network_id))
            .await
    }

    /// GET /networks/{networkId}/wireless/ssids/{number}
    pub async fn get_ssid(&self, network_id: &str, number: u32) -> Result<Ssid, ApiError> {
        self.get(&format!("/networks/{}/wireless/ssids/{}", network_id, number))
            .await
    }

    /// PUT /networks/{networkId}/wireless/ssids/{number}
    pub async fn update_ssid(
        &self,
        network_id: &str,
        number: u32,
        request: &UpdateSsidRequest,
    ) -> Result<Ssid, ApiError> {
        self.put(
            &format!("/networks/{}/wireless/ssids/{}", network_id, number),
            request,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn get_ssid_preserves_absent_optionals() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/networks/N_1/wireless/ssids/0")
            .with_body(r#"{"number":0,"name":"corp-wifi","enabled":true,"authMode":"psk"}"#)
            .create_async()
            .await;

        let client = Client::new(&server.url(), "key").unwrap();
        let ssid = client.get_ssid("N_1", 0).await.unwrap();

        assert_eq!(ssid.number, 0);
        assert_eq!(ssid.auth_mode.as_deref(), Some("psk"));
        assert_eq!(ssid.psk, None);
        assert_eq!(ssid.default_vlan_id, None);
    }

    #[tokio::test]
    async fn list_ssids_returns_every_slot() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/networks/N_1/wireless/ssids")
            .with_body(
                r#"[{"number":0,"name":"corp-wifi","enabled":true},{"number":1,"name":"Unconfigured SSID 2","enabled":false}]"#,
            )
            .create_async()
            .await;

        let client = Client::new(&server.url(), "key").unwrap();
        let ssids = client.list_ssids("N_1").await.unwrap();

        assert_eq!(ssids.len(), 2);
        assert!(ssids[0].enabled);
        assert!(!ssids[1].enabled);
    }

    #[tokio::test]
    async fn update_serializes_only_set_fields() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/networks/N_1/wireless/ssids/2")
            .match_body(mockito::Matcher::JsonString(
                r#"{"enabled":false,"name":"guest"}"#.into(),
            ))
            .with_body(r#"{"number":2,"name":"guest","enabled":false}"#)
            .create_async()
            .await;

        let client = Client::new(&server.url(), "key").unwrap();
        let ssid = client
            .update_ssid(
                "N_1",
                2,
                &UpdateSsidRequest {
                    name: Some("guest".to_string()),
                    enabled: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(!ssid.enabled);
        mock.assert_async().await;
    }
}

//! Organization endpoints

use serde::{Deserialize, Serialize};

use super::client::Client;
use super::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<OrganizationApi>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationApi {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationRequest {
    pub name: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganizationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<OrganizationApi>,
}

impl Client {
    /// GET /organizations
    pub async fn list_organizations(&self) -> Result<Vec<Organization>, ApiError> {
        self.get("/organizations").await
    }

    /// GET /organizations/{organizationId}
    pub async fn get_organization(&self, organization_id: &str) -> Result<Organization, ApiError> {
        self.get(&format!("/organizations/{}", organization_id))
            .await
    }

    /// POST /organizations
    pub async fn create_organization(
        &self,
        request: &CreateOrganizationRequest,
    ) -> Result<Organization, ApiError> {
        self.post("/organizations", request).await
    }

    /// PUT /organizations/{organizationId}
    pub async fn update_organization(
        &self,
        organization_id: &str,
        request: &UpdateOrganizationRequest,
    ) -> Result<Organization, ApiError> {
        self.put(&format!("/organizations/{}", organization_id), request)
            .await
    }

    /// DELETE /organizations/{organizationId}
    pub async fn delete_organization(&self, organization_id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/organizations/{}", organization_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn list_organizations_parses_response() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/organizations")
            .with_body(
                r#"[{"id":"123","name":"Acme","url":"https://dashboard.canopy.net/o/123","api":{"enabled":true}}]"#,
            )
            .create_async()
            .await;

        let client = Client::new(&server.url(), "key").unwrap();
        let orgs = client.list_organizations().await.unwrap();

        assert_eq!(orgs.len(), 1);
        assert_eq!(orgs[0].id, "123");
        assert_eq!(orgs[0].api.as_ref().unwrap().enabled, Some(true));
    }

    #[tokio::test]
    async fn create_then_delete_round_trip() {
        let mut server = Server::new_async().await;
        let create_mock = server
            .mock("POST", "/organizations")
            .match_body(mockito::Matcher::JsonString(r#"{"name":"Initech"}"#.into()))
            .with_body(r#"{"id":"456","name":"Initech"}"#)
            .create_async()
            .await;
        let delete_mock = server
            .mock("DELETE", "/organizations/456")
            .with_status(204)
            .create_async()
            .await;

        let client = Client::new(&server.url(), "key").unwrap();
        let created = client
            .create_organization(&CreateOrganizationRequest {
                name: "Initech".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, "456");

        client.delete_organization(&created.id).await.unwrap();

        create_mock.assert_async().await;
        delete_mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_omits_unset_fields() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/organizations/123")
            .match_body(mockito::Matcher::JsonString(r#"{"name":"Renamed"}"#.into()))
            .with_body(r#"{"id":"123","name":"Renamed"}"#)
            .create_async()
            .await;

        let client = Client::new(&server.url(), "key").unwrap();
        let updated = client
            .update_organization(
                "123",
                &UpdateOrganizationRequest {
                    name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        mock.assert_async().await;
    }
}

//! Dashboard API client
//!
//! A thin JSON client over reqwest. Every operation is a single
//! request/response call; rate limiting and retries are left to the caller
//! (in practice, Terraform re-running the plan).

use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::common::ApiQueryParams;
use super::error::ApiError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl Client {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, ApiError> {
        let parsed =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ApiError::InvalidUrl(format!(
                "{}: expected an http(s) URL",
                base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: base_url.trim_end_matches('/').to_string(),
                api_key: api_key.to_string(),
            }),
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let request = self.inner.http.get(&url);
        self.execute(request, path).await
    }

    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &ApiQueryParams,
    ) -> Result<T, ApiError> {
        let full_path = format!("{}{}", path, params.to_query_string());
        self.get(&full_path).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let request = self.inner.http.post(&url).json(body);
        self.execute(request, path).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "PUT");
        let request = self.inner.http.put(&url).json(body);
        self.execute(request, path).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "DELETE");
        let request = self.inner.http.delete(&url);
        self.execute(request, path).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = request
            .header(AUTHORIZATION, format!("Bearer {}", self.inner.api_key))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(%status, path, "dashboard response");

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::AuthenticationFailed);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            // 204-style responses; callers expecting () land here
            return serde_json::from_value(serde_json::Value::Null)
                .map_err(|e| ApiError::Parse(format!("empty body for {}: {}", path, e)));
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(path, error = %e, "failed to deserialize response");
            ApiError::Parse(format!("{}: {}", path, e))
        })
    }
}

/// The dashboard wraps errors as {"errors": ["..."]}; anything else is
/// surfaced verbatim.
fn error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        errors: Vec<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed.errors.join("; "),
        _ => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Widget {
        name: String,
    }

    #[tokio::test]
    async fn get_deserializes_success_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/widgets/1")
            .match_header("authorization", "Bearer test-key")
            .with_body(r#"{"name":"ap-lobby"}"#)
            .create_async()
            .await;

        let client = Client::new(&server.url(), "test-key").unwrap();
        let widget: Widget = client.get("/widgets/1").await.unwrap();

        assert_eq!(widget.name, "ap-lobby");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication_failed() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/widgets/1")
            .with_status(401)
            .with_body(r#"{"errors":["Invalid API key"]}"#)
            .create_async()
            .await;

        let client = Client::new(&server.url(), "bad-key").unwrap();
        let result = client.get::<Widget>("/widgets/1").await;

        assert!(matches!(result, Err(ApiError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn missing_object_maps_to_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/widgets/42")
            .with_status(404)
            .create_async()
            .await;

        let client = Client::new(&server.url(), "test-key").unwrap();
        let result = client.get::<Widget>("/widgets/42").await;

        match result {
            Err(e) => assert!(e.is_not_found()),
            Ok(_) => panic!("expected NotFound"),
        }
    }

    #[tokio::test]
    async fn error_body_is_surfaced_verbatim() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/widgets")
            .with_status(400)
            .with_body(r#"{"errors":["name is required","tags must be a list"]}"#)
            .create_async()
            .await;

        let client = Client::new(&server.url(), "test-key").unwrap();
        let result = client
            .post::<Widget, _>("/widgets", &serde_json::json!({}))
            .await;

        match result {
            Err(ApiError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "name is required; tags must be a list");
            }
            other => panic!("expected ApiError::Api, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn delete_accepts_empty_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/widgets/1")
            .with_status(204)
            .create_async()
            .await;

        let client = Client::new(&server.url(), "test-key").unwrap();
        client.delete("/widgets/1").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn base_url_trailing_slash_is_stripped() {
        let mut server = Server::new_async().await;
        let mock = server.mock("GET", "/widgets/1").with_body("{\"name\":\"x\"}").create_async().await;

        let client = Client::new(&format!("{}/", server.url()), "test-key").unwrap();
        let _: Widget = client.get("/widgets/1").await.unwrap();

        mock.assert_async().await;
    }

    #[test]
    fn rejects_non_http_base_url() {
        let result = Client::new("ftp://dashboard.canopy.net", "key");
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }
}

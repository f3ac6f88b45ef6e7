mod common;

use canopy::CanopyProvider;
use common::object_with;
use mockito::Server;
use serial_test::serial;
use tfcore::data_source::ReadDataSourceRequest;
use tfcore::provider::{ConfigureProviderRequest, Provider};
use tfcore::types::{AttributePath, DynamicValue};
use tfcore::Context;

#[tokio::test(flavor = "multi_thread")]
#[serial]
async fn provider_lifecycle_with_mock_server() {
    let mut server = Server::new_async().await;
    let _list_mock = server
        .mock("GET", "/organizations/123/networks")
        .match_header("authorization", "Bearer env-secret")
        .with_body(r#"[{"id":"N_1","organizationId":"123","name":"hq","productTypes":["switch"]}]"#)
        .create_async()
        .await;

    std::env::set_var("CANOPY_API_KEY", "env-secret");
    std::env::set_var("CANOPY_BASE_URL", server.url());

    let mut provider = CanopyProvider::new();
    let response = provider
        .configure(
            Context::new(),
            ConfigureProviderRequest {
                config: DynamicValue::empty_object(),
            },
        )
        .await;
    assert!(!response.diagnostics.has_errors());

    let data_source = provider.data_source("canopy_networks").unwrap();
    let read = data_source
        .read(
            Context::new(),
            ReadDataSourceRequest {
                type_name: "canopy_networks".to_string(),
                config: object_with(&[("organization_id", "123")]),
            },
        )
        .await;

    assert!(!read.diagnostics.has_errors(), "{:?}", read.diagnostics.errors);
    let networks = read.state.get_list(&AttributePath::new("networks")).unwrap();
    assert_eq!(networks.len(), 1);
    assert_eq!(networks[0].as_map().unwrap()["name"].as_str(), Some("hq"));

    std::env::remove_var("CANOPY_API_KEY");
    std::env::remove_var("CANOPY_BASE_URL");
}

#[tokio::test(flavor = "multi_thread")]
#[serial]
async fn provider_prefers_config_over_env_vars() {
    let mut server = Server::new_async().await;
    let _list_mock = server
        .mock("GET", "/organizations")
        .match_header("authorization", "Bearer config-secret")
        .with_body(r#"[{"id":"1","name":"Acme"}]"#)
        .create_async()
        .await;

    std::env::set_var("CANOPY_API_KEY", "env-secret");
    std::env::set_var("CANOPY_BASE_URL", "https://env.example.net/api/v1");

    let mut provider = CanopyProvider::new();
    let mut config = DynamicValue::empty_object();
    config
        .set_string(&AttributePath::new("api_key"), "config-secret".to_string())
        .unwrap();
    config
        .set_string(&AttributePath::new("base_url"), server.url())
        .unwrap();

    let response = provider
        .configure(Context::new(), ConfigureProviderRequest { config })
        .await;
    assert!(!response.diagnostics.has_errors());

    let data_source = provider.data_source("canopy_organizations").unwrap();
    let read = data_source
        .read(
            Context::new(),
            ReadDataSourceRequest {
                type_name: "canopy_organizations".to_string(),
                config: DynamicValue::empty_object(),
            },
        )
        .await;

    assert!(!read.diagnostics.has_errors());
    let organizations = read
        .state
        .get_list(&AttributePath::new("organizations"))
        .unwrap();
    assert_eq!(organizations[0].as_map().unwrap()["name"].as_str(), Some("Acme"));

    std::env::remove_var("CANOPY_API_KEY");
    std::env::remove_var("CANOPY_BASE_URL");
}

#[tokio::test]
async fn provider_schemas_available_without_configuration() {
    let provider = CanopyProvider::new();

    let schemas = provider.data_source_schemas();
    let networks = schemas.get("canopy_networks").unwrap();
    assert!(networks.attribute("organization_id").is_some());
    assert!(networks.attribute("networks").unwrap().computed);

    let resource_schemas = provider.resource_schemas();
    let ssid = resource_schemas.get("canopy_ssid").unwrap();
    assert!(ssid.attribute("psk").unwrap().sensitive);
    assert!(ssid.attribute("number").unwrap().required);
}

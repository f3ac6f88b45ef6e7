mod common;

use common::{configured_provider, object_with};
use mockito::Server;
use tfcore::provider::Provider;
use tfcore::resource::{
    CreateResourceRequest, DeleteResourceRequest, ReadResourceRequest, UpdateResourceRequest,
    ValidateResourceRequest,
};
use tfcore::types::{AttributePath, Dynamic, DynamicValue};
use tfcore::Context;

fn network_config() -> DynamicValue {
    let mut config = object_with(&[
        ("organization_id", "123"),
        ("name", "branch-office"),
        ("time_zone", "Europe/Berlin"),
    ]);
    config
        .set_list(
            &AttributePath::new("product_types"),
            vec![
                Dynamic::String("switch".to_string()),
                Dynamic::String("wireless".to_string()),
            ],
        )
        .unwrap();
    config
}

#[tokio::test(flavor = "multi_thread")]
async fn create_populates_computed_attributes() {
    let mut server = Server::new_async().await;
    let create_mock = server
        .mock("POST", "/organizations/123/networks")
        .match_header("authorization", "Bearer test-key")
        .with_body(
            r#"{"id":"N_1","organizationId":"123","name":"branch-office","productTypes":["switch","wireless"],"timeZone":"Europe/Berlin","url":"https://dashboard.canopy.net/n/1"}"#,
        )
        .create_async()
        .await;

    let provider = configured_provider(&server.url()).await;
    let resource = provider.resource("canopy_network").unwrap();

    let config = network_config();
    let mut planned = config.clone();
    planned.mark_unknown(&AttributePath::new("id")).unwrap();
    planned.mark_unknown(&AttributePath::new("url")).unwrap();

    let response = resource
        .create(
            Context::new(),
            CreateResourceRequest {
                type_name: "canopy_network".to_string(),
                config,
                planned_state: planned,
            },
        )
        .await;

    assert!(
        !response.diagnostics.has_errors(),
        "{:?}",
        response.diagnostics.errors
    );
    assert_eq!(
        response
            .new_state
            .get_string(&AttributePath::new("id"))
            .unwrap(),
        "N_1"
    );
    assert_eq!(
        response
            .new_state
            .get_string(&AttributePath::new("url"))
            .unwrap(),
        "https://dashboard.canopy.net/n/1"
    );
    assert_eq!(
        response
            .new_state
            .get_string(&AttributePath::new("organization_id"))
            .unwrap(),
        "123"
    );
    create_mock.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn update_keeps_plan_values_the_api_is_silent_on() {
    let mut server = Server::new_async().await;
    // The response omits notes even though the plan sets it
    let _update_mock = server
        .mock("PUT", "/networks/N_1")
        .with_body(r#"{"id":"N_1","name":"renamed","productTypes":["switch"]}"#)
        .create_async()
        .await;

    let provider = configured_provider(&server.url()).await;
    let resource = provider.resource("canopy_network").unwrap();

    let mut config = network_config();
    config
        .set_string(&AttributePath::new("name"), "renamed".to_string())
        .unwrap();
    config
        .set_string(&AttributePath::new("notes"), "keep me".to_string())
        .unwrap();

    let mut prior = network_config();
    prior
        .set_string(&AttributePath::new("id"), "N_1".to_string())
        .unwrap();

    let response = resource
        .update(
            Context::new(),
            UpdateResourceRequest {
                type_name: "canopy_network".to_string(),
                config: config.clone(),
                prior_state: prior,
                planned_state: {
                    let mut planned = config;
                    planned
                        .set_string(&AttributePath::new("id"), "N_1".to_string())
                        .unwrap();
                    planned
                },
            },
        )
        .await;

    assert!(!response.diagnostics.has_errors());
    assert_eq!(
        response
            .new_state
            .get_string(&AttributePath::new("notes"))
            .unwrap(),
        "keep me"
    );
    assert_eq!(
        response
            .new_state
            .get_string(&AttributePath::new("name"))
            .unwrap(),
        "renamed"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn read_drops_state_when_network_is_gone() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/networks/N_gone")
        .with_status(404)
        .create_async()
        .await;

    let provider = configured_provider(&server.url()).await;
    let resource = provider.resource("canopy_network").unwrap();

    let mut state = network_config();
    state
        .set_string(&AttributePath::new("id"), "N_gone".to_string())
        .unwrap();

    let response = resource
        .read(
            Context::new(),
            ReadResourceRequest {
                type_name: "canopy_network".to_string(),
                current_state: state,
                private: vec![],
            },
        )
        .await;

    assert!(!response.diagnostics.has_errors());
    assert!(response.new_state.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn read_surfaces_server_errors_and_keeps_state() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/networks/N_1")
        .with_status(500)
        .with_body(r#"{"errors":["internal error"]}"#)
        .create_async()
        .await;

    let provider = configured_provider(&server.url()).await;
    let resource = provider.resource("canopy_network").unwrap();

    let mut state = network_config();
    state
        .set_string(&AttributePath::new("id"), "N_1".to_string())
        .unwrap();

    let response = resource
        .read(
            Context::new(),
            ReadResourceRequest {
                type_name: "canopy_network".to_string(),
                current_state: state.clone(),
                private: vec![],
            },
        )
        .await;

    assert!(response.diagnostics.has_errors());
    assert!(response.diagnostics.errors[0]
        .detail
        .contains("internal error"));
    assert_eq!(response.new_state, Some(state));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_calls_the_api_once() {
    let mut server = Server::new_async().await;
    let delete_mock = server
        .mock("DELETE", "/networks/N_1")
        .with_status(204)
        .create_async()
        .await;

    let provider = configured_provider(&server.url()).await;
    let resource = provider.resource("canopy_network").unwrap();

    let mut state = network_config();
    state
        .set_string(&AttributePath::new("id"), "N_1".to_string())
        .unwrap();

    let response = resource
        .delete(
            Context::new(),
            DeleteResourceRequest {
                type_name: "canopy_network".to_string(),
                prior_state: state,
            },
        )
        .await;

    assert!(!response.diagnostics.has_errors());
    delete_mock.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn validate_rejects_config_missing_required_attributes() {
    let server = Server::new_async().await;
    let provider = configured_provider(&server.url()).await;
    let resource = provider.resource("canopy_network").unwrap();

    let response = resource
        .validate(
            Context::new(),
            ValidateResourceRequest {
                type_name: "canopy_network".to_string(),
                config: object_with(&[("organization_id", "123")]),
            },
        )
        .await;

    assert!(response.diagnostics.has_errors());
    let summaries: Vec<_> = response
        .diagnostics
        .errors
        .iter()
        .map(|d| d.summary.as_str())
        .collect();
    assert!(summaries.iter().any(|s| s.contains("name")));
    assert!(summaries.iter().any(|s| s.contains("product_types")));
}

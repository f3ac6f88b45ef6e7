#![allow(dead_code)]

use canopy::CanopyProvider;
use tfcore::provider::{ConfigureProviderRequest, Provider};
use tfcore::types::{AttributePath, DynamicValue};
use tfcore::Context;

/// Configure a provider against a mock dashboard.
pub async fn configured_provider(base_url: &str) -> CanopyProvider {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut config = DynamicValue::empty_object();
    config
        .set_string(&AttributePath::new("api_key"), "test-key".to_string())
        .unwrap();
    config
        .set_string(&AttributePath::new("base_url"), base_url.to_string())
        .unwrap();

    let mut provider = CanopyProvider::new();
    let response = provider
        .configure(Context::new(), ConfigureProviderRequest { config })
        .await;
    assert!(
        !response.diagnostics.has_errors(),
        "configure failed: {:?}",
        response.diagnostics.errors
    );

    provider
}

pub fn object_with(entries: &[(&str, &str)]) -> DynamicValue {
    let mut value = DynamicValue::empty_object();
    for (key, item) in entries {
        value
            .set_string(&AttributePath::new(key), item.to_string())
            .unwrap();
    }
    value
}

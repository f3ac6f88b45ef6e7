//! Shared data handed to every resource and data source

use crate::api::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct CanopyProviderData {
    pub client: Arc<Client>,
}

impl CanopyProviderData {
    pub fn new(client: Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

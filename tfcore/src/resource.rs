//! Resource trait and request/response types
//!
//! Resources implement the CRUD lifecycle. Each method receives a
//! [`Context`] and a request struct and returns a response struct carrying
//! the new state plus any diagnostics; errors from the backing API are
//! surfaced as diagnostics, never panics.

use crate::context::Context;
use crate::schema::Schema;
use crate::types::{Diagnostics, DynamicValue};
use async_trait::async_trait;

#[async_trait]
pub trait Resource: Send + Sync {
    /// Constant type name, e.g. "canopy_network". MUST match the key the
    /// provider registers the resource under.
    fn type_name(&self) -> &str;

    fn schema(&self) -> Schema;

    /// Called during plan to validate configuration. The default runs the
    /// schema's required/type/validator checks; override to add rules that
    /// span attributes.
    async fn validate(
        &self,
        _ctx: Context,
        request: ValidateResourceRequest,
    ) -> ValidateResourceResponse {
        ValidateResourceResponse {
            diagnostics: self.schema().validate_config(&request.config),
        }
    }

    /// MUST populate every attribute in `new_state`, including computed ones.
    async fn create(&self, ctx: Context, request: CreateResourceRequest) -> CreateResourceResponse;

    /// MUST return the current remote state, or `new_state: None` when the
    /// remote object no longer exists so it is dropped from state.
    async fn read(&self, ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse;

    /// MUST apply every change from `planned_state`.
    async fn update(&self, ctx: Context, request: UpdateResourceRequest) -> UpdateResourceResponse;

    async fn delete(&self, ctx: Context, request: DeleteResourceRequest) -> DeleteResourceResponse;
}

pub struct ValidateResourceRequest {
    pub type_name: String,
    pub config: DynamicValue,
}

pub struct ValidateResourceResponse {
    pub diagnostics: Diagnostics,
}

pub struct CreateResourceRequest {
    pub type_name: String,
    pub config: DynamicValue,
    pub planned_state: DynamicValue,
}

pub struct CreateResourceResponse {
    pub new_state: DynamicValue,
    pub diagnostics: Diagnostics,
}

pub struct ReadResourceRequest {
    pub type_name: String,
    pub current_state: DynamicValue,
    pub private: Vec<u8>,
}

pub struct ReadResourceResponse {
    /// `None` signals the remote object is gone and state should be dropped
    pub new_state: Option<DynamicValue>,
    pub diagnostics: Diagnostics,
    pub private: Vec<u8>,
}

pub struct UpdateResourceRequest {
    pub type_name: String,
    pub config: DynamicValue,
    pub prior_state: DynamicValue,
    pub planned_state: DynamicValue,
}

pub struct UpdateResourceResponse {
    pub new_state: DynamicValue,
    pub diagnostics: Diagnostics,
}

pub struct DeleteResourceRequest {
    pub type_name: String,
    pub prior_state: DynamicValue,
}

pub struct DeleteResourceResponse {
    pub diagnostics: Diagnostics,
}

/// Optional interface for `terraform import`.
#[async_trait]
pub trait ResourceWithImportState: Resource {
    /// Parse the user-supplied id and seed enough state for the following
    /// read to populate the rest.
    async fn import_state(
        &self,
        ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse;
}

pub struct ImportResourceStateRequest {
    pub type_name: String,
    pub id: String,
}

pub struct ImportResourceStateResponse {
    pub imported_resources: Vec<ImportedResource>,
    pub diagnostics: Diagnostics,
}

pub struct ImportedResource {
    pub type_name: String,
    pub state: DynamicValue,
}

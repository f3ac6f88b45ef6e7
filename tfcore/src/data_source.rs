//! DataSource trait and request/response types

use crate::context::Context;
use crate::schema::Schema;
use crate::types::{Diagnostics, DynamicValue};
use async_trait::async_trait;

#[async_trait]
pub trait DataSource: Send + Sync {
    /// Constant type name, e.g. "canopy_networks". MUST match the key the
    /// provider registers the data source under.
    fn type_name(&self) -> &str;

    fn schema(&self) -> Schema;

    /// Called during plan to validate configuration. The default runs the
    /// schema's required/type/validator checks.
    async fn validate(
        &self,
        _ctx: Context,
        request: ValidateDataSourceRequest,
    ) -> ValidateDataSourceResponse {
        ValidateDataSourceResponse {
            diagnostics: self.schema().validate_config(&request.config),
        }
    }

    /// The only operation for data sources. MUST populate every attribute
    /// in `state`.
    async fn read(&self, ctx: Context, request: ReadDataSourceRequest) -> ReadDataSourceResponse;
}

pub struct ValidateDataSourceRequest {
    pub type_name: String,
    pub config: DynamicValue,
}

pub struct ValidateDataSourceResponse {
    pub diagnostics: Diagnostics,
}

pub struct ReadDataSourceRequest {
    pub type_name: String,
    pub config: DynamicValue,
}

pub struct ReadDataSourceResponse {
    pub state: DynamicValue,
    pub diagnostics: Diagnostics,
}

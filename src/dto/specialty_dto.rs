use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSpecialtyPayload {
    /// Stored trimmed and lower-cased.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default, rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SpecialtySearchQuery {
    /// Case-insensitive substring of the name; empty lists everything
    pub q: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

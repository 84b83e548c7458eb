use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::dto::institute_dto::{CreateInstitutePayload, InstituteResponse};
use crate::dto::user_dto::{CreateUserPayload, UserResponse};
use crate::models::role::AuthRole;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_profile_matches_role"))]
pub struct SignupPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[serde(default)]
    pub role: AuthRole,
    #[validate(nested)]
    pub user: Option<CreateUserPayload>,
    #[validate(nested)]
    pub institute: Option<CreateInstitutePayload>,
}

/// The profile object named by `role` must be present.
fn validate_profile_matches_role(payload: &SignupPayload) -> Result<(), ValidationError> {
    let present = match payload.role {
        AuthRole::User => payload.user.is_some(),
        AuthRole::Institute => payload.institute.is_some(),
    };
    if present {
        Ok(())
    } else {
        Err(ValidationError::new("missing_profile"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SigninPayload {
    /// Not format-checked: an unknown address is a 404, not a 400.
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Profile created at signup, rendered as the bare user or institute.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ProfileResponse {
    User(UserResponse),
    Institute(InstituteResponse),
}

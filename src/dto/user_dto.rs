use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::role::UserRole;
use crate::models::specialty::Specialty;
use crate::models::user::User;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    /// Primary area of expertise, free text.
    #[validate(length(min = 1, max = 200))]
    pub specialty: String,
    #[validate(length(min = 1, max = 50))]
    pub gender: String,
    #[serde(default)]
    pub role: UserRole,
    #[validate(length(max = 300))]
    pub headline: Option<String>,
    #[validate(length(max = 5000))]
    pub about: Option<String>,
    /// Specialty names; unknown names are created.
    #[serde(default)]
    pub specialties: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub specialty: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub gender: Option<String>,
    pub role: Option<UserRole>,
    #[validate(length(max = 300))]
    pub headline: Option<String>,
    #[validate(length(max = 5000))]
    pub about: Option<String>,
    /// When present, replaces every specialty link.
    pub specialties: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub location: String,
    pub specialty: String,
    pub specialties: Vec<Specialty>,
    pub gender: String,
    #[schema(example = "DOCTOR")]
    pub role: String,
    pub headline: Option<String>,
    pub about: Option<String>,
    pub verified: bool,
}

impl UserResponse {
    pub fn new(user: User, specialties: Vec<Specialty>) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            name: user.name,
            location: user.location,
            specialty: user.specialty,
            specialties,
            gender: user.gender,
            role: user.role,
            headline: user.headline,
            about: user.about,
            verified: user.verified,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default, rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    /// Page number (default: 1)
    pub page: Option<i64>,
    /// Users per page (default: 20)
    pub page_size: Option<i64>,
    /// Exact match on the primary specialty
    pub specialty: Option<String>,
    /// Comma-separated specialty names, any of which may match
    pub specialties: Option<String>,
    pub location: Option<String>,
    pub role: Option<UserRole>,
    pub verified: Option<bool>,
    pub gender: Option<String>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserSearchQuery {
    /// Matched against name, specialty and location
    pub q: String,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn create_payload_defaults_role_and_specialties() {
        let payload: CreateUserPayload = serde_json::from_value(serde_json::json!({
            "name": "Asha",
            "location": "Delhi",
            "specialty": "Cardiology",
            "gender": "Female"
        }))
        .unwrap();
        assert_eq!(payload.role, UserRole::Doctor);
        assert!(payload.specialties.is_empty());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn blank_name_fails_validation() {
        let payload = CreateUserPayload {
            name: String::new(),
            location: "Delhi".into(),
            specialty: "Cardiology".into(),
            gender: "Female".into(),
            role: UserRole::Nurse,
            headline: None,
            about: None,
            specialties: vec![],
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn unknown_role_is_rejected_by_serde() {
        let parsed = serde_json::from_value::<CreateUserPayload>(serde_json::json!({
            "name": "Asha",
            "location": "Delhi",
            "specialty": "Cardiology",
            "gender": "Female",
            "role": "SURGEON"
        }));
        assert!(parsed.is_err());
    }
}

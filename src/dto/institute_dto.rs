use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::institute::Institute;
use crate::models::role::InstituteRole;
use crate::models::specialty::Specialty;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstitutePayload {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[validate(email)]
    pub contact_email: String,
    #[validate(length(min = 3, max = 30))]
    pub contact_number: String,
    #[serde(default)]
    pub role: InstituteRole,
    #[validate(length(max = 200))]
    pub affiliated_university: Option<String>,
    #[validate(range(min = 1800, max = 2100))]
    pub year_established: Option<i32>,
    #[validate(length(max = 100))]
    pub ownership: Option<String>,
    #[validate(length(max = 300))]
    pub headline: Option<String>,
    #[validate(length(max = 5000))]
    pub about: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInstitutePayload {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
    #[validate(length(min = 3, max = 30))]
    pub contact_number: Option<String>,
    pub role: Option<InstituteRole>,
    #[validate(length(max = 200))]
    pub affiliated_university: Option<String>,
    #[validate(range(min = 1800, max = 2100))]
    pub year_established: Option<i32>,
    #[validate(length(max = 100))]
    pub ownership: Option<String>,
    #[validate(length(max = 300))]
    pub headline: Option<String>,
    #[validate(length(max = 5000))]
    pub about: Option<String>,
    /// When present, replaces every specialty link.
    pub specialties: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstituteResponse {
    pub id: Uuid,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub location: String,
    pub verified: bool,
    pub contact_email: String,
    pub contact_number: String,
    #[schema(example = "HOSPITAL")]
    pub role: String,
    pub specialties: Vec<Specialty>,
    pub affiliated_university: Option<String>,
    pub year_established: Option<i32>,
    pub ownership: Option<String>,
    pub headline: Option<String>,
    pub about: Option<String>,
}

impl InstituteResponse {
    pub fn new(institute: Institute, specialties: Vec<Specialty>) -> Self {
        Self {
            id: institute.id,
            created_at: institute.created_at,
            name: institute.name,
            location: institute.location,
            verified: institute.verified,
            contact_email: institute.contact_email,
            contact_number: institute.contact_number,
            role: institute.role,
            specialties,
            affiliated_university: institute.affiliated_university,
            year_established: institute.year_established,
            ownership: institute.ownership,
            headline: institute.headline,
            about: institute.about,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default, rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct InstituteListQuery {
    /// Page number (default: 1)
    pub page: Option<i64>,
    /// Institutes per page (default: 20)
    pub page_size: Option<i64>,
    /// Comma-separated specialty names, any of which may match
    pub specialty: Option<String>,
    /// Alias of `specialty`
    pub specialties: Option<String>,
    /// Case-insensitive exact location
    pub location: Option<String>,
    pub role: Option<InstituteRole>,
    pub verified: Option<bool>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
}

impl InstituteListQuery {
    pub fn specialty_filter(&self) -> Option<&str> {
        self.specialty.as_deref().or(self.specialties.as_deref())
    }
}

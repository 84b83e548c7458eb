use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::application::ApplicationDetail;
use crate::models::role::ApplicationStatus;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationPayload {
    pub job_id: Uuid,
    #[validate(url)]
    pub resume_url: String,
    #[validate(length(max = 10000))]
    pub cover_letter: Option<String>,
    #[validate(range(min = 0, max = 70))]
    pub experience_years: Option<i32>,
    #[validate(length(max = 200))]
    pub current_position: Option<String>,
    #[validate(length(max = 200))]
    pub current_institute: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub additional_details: Option<JsonValue>,
    /// Defaults to the time of submission.
    pub applied_date: Option<DateTime<Utc>>,
}

/// Applicant-editable fields. The status is changed separately by the
/// job's institute.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationPayload {
    #[validate(url)]
    pub resume_url: Option<String>,
    #[validate(length(max = 10000))]
    pub cover_letter: Option<String>,
    #[validate(range(min = 0, max = 70))]
    pub experience_years: Option<i32>,
    #[validate(length(max = 200))]
    pub current_position: Option<String>,
    #[validate(length(max = 200))]
    pub current_institute: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub additional_details: Option<JsonValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateApplicationStatusPayload {
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationJobSummary {
    pub id: Uuid,
    pub title: String,
    pub status: String,
    pub work_location: String,
    pub institute_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantSummary {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: Uuid,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
    #[schema(example = "pending")]
    pub status: String,
    pub applied_date: DateTime<Utc>,
    pub resume_url: String,
    pub cover_letter: Option<String>,
    pub experience_years: Option<i32>,
    pub current_position: Option<String>,
    pub current_institute: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub additional_details: Option<JsonValue>,
    pub job_id: Uuid,
    pub user_id: Uuid,
    pub job: ApplicationJobSummary,
    pub user: ApplicantSummary,
}

impl From<ApplicationDetail> for ApplicationResponse {
    fn from(detail: ApplicationDetail) -> Self {
        let application = detail.application;
        Self {
            id: application.id,
            created_at: application.created_at,
            updated_at: application.updated_at,
            status: application.status,
            applied_date: application.applied_date,
            resume_url: application.resume_url,
            cover_letter: application.cover_letter,
            experience_years: application.experience_years,
            current_position: application.current_position,
            current_institute: application.current_institute,
            additional_details: application.additional_details,
            job_id: application.job_id,
            user_id: application.user_id,
            job: ApplicationJobSummary {
                id: application.job_id,
                title: detail.job_title,
                status: detail.job_status,
                work_location: detail.job_work_location,
                institute_id: detail.institute_id,
            },
            user: ApplicantSummary {
                id: application.user_id,
                name: detail.user_name,
                location: detail.user_location,
                role: detail.user_role,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn resume_must_be_a_url() {
        let payload: CreateApplicationPayload = serde_json::from_value(serde_json::json!({
            "jobId": Uuid::new_v4(),
            "resumeUrl": "not a url"
        }))
        .unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn experience_years_are_bounded() {
        let payload: CreateApplicationPayload = serde_json::from_value(serde_json::json!({
            "jobId": Uuid::new_v4(),
            "resumeUrl": "https://cdn.example/cv.pdf",
            "experienceYears": 5,
            "additionalDetails": {"languages": ["en", "hi"]}
        }))
        .unwrap();
        assert!(payload.validate().is_ok());

        let too_many = CreateApplicationPayload {
            experience_years: Some(120),
            ..payload
        };
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn status_patch_accepts_only_known_values() {
        let ok: UpdateApplicationStatusPayload =
            serde_json::from_value(serde_json::json!({"status": "accepted"})).unwrap();
        assert_eq!(ok.status, ApplicationStatus::Accepted);
        assert!(serde_json::from_value::<UpdateApplicationStatusPayload>(
            serde_json::json!({"status": "hired"})
        )
        .is_err());
    }
}

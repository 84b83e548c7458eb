use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::dto::institute_dto::InstituteResponse;
use crate::models::job::Job;
use crate::models::role::JobStatus;
use crate::models::specialty::Specialty;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_salary"))]
pub struct CreateJobPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 20000))]
    pub description: String,
    #[validate(length(max = 500))]
    pub short_description: Option<String>,
    /// e.g. Full-time, Part-time, Internship
    #[validate(length(min = 1, max = 100))]
    pub job_type: String,
    #[validate(length(min = 1, max = 200))]
    pub work_location: String,
    #[validate(length(min = 1, max = 100))]
    pub experience_level: String,
    #[validate(length(min = 1, max = 20000))]
    pub requirements: String,
    #[schema(value_type = String, example = "50000.00")]
    pub salary_min: Decimal,
    #[schema(value_type = String, example = "90000.00")]
    pub salary_max: Decimal,
    #[validate(length(min = 1, max = 10))]
    pub salary_currency: Option<String>,
    #[serde(default)]
    pub status: JobStatus,
    pub application_deadline: Option<DateTime<Utc>>,
    #[validate(email)]
    pub contact_email: Option<String>,
    #[validate(length(max = 30))]
    pub contact_phone: Option<String>,
    #[validate(length(max = 200))]
    pub contact_person: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub additional_info: Option<JsonValue>,
    #[serde(default)]
    pub specialties: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_salary"))]
pub struct UpdateJobPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 20000))]
    pub description: Option<String>,
    #[validate(length(max = 500))]
    pub short_description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub job_type: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub work_location: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub experience_level: Option<String>,
    #[validate(length(min = 1, max = 20000))]
    pub requirements: Option<String>,
    #[schema(value_type = Option<String>)]
    pub salary_min: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub salary_max: Option<Decimal>,
    #[validate(length(min = 1, max = 10))]
    pub salary_currency: Option<String>,
    pub status: Option<JobStatus>,
    pub application_deadline: Option<DateTime<Utc>>,
    #[validate(email)]
    pub contact_email: Option<String>,
    #[validate(length(max = 30))]
    pub contact_phone: Option<String>,
    #[validate(length(max = 200))]
    pub contact_person: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub additional_info: Option<JsonValue>,
    /// When present, replaces every specialty link.
    pub specialties: Option<Vec<String>>,
}

fn check_salary_range(min: Option<Decimal>, max: Option<Decimal>) -> Result<(), ValidationError> {
    if min.is_some_and(|min| min.is_sign_negative())
        || max.is_some_and(|max| max.is_sign_negative())
    {
        return Err(ValidationError::new("salary_negative"));
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(ValidationError::new("salary_range"));
        }
    }
    Ok(())
}

fn validate_create_salary(payload: &CreateJobPayload) -> Result<(), ValidationError> {
    check_salary_range(Some(payload.salary_min), Some(payload.salary_max))
}

/// Only checks the bounds present in the patch; the merged row is checked
/// again by the service against the stored values.
fn validate_update_salary(payload: &UpdateJobPayload) -> Result<(), ValidationError> {
    check_salary_range(payload.salary_min, payload.salary_max)
}

/// Whether a patched salary range is still ordered.
pub fn salary_range_is_valid(min: Decimal, max: Decimal) -> bool {
    check_salary_range(Some(min), Some(max)).is_ok()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: Uuid,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub job_type: String,
    pub work_location: String,
    pub experience_level: String,
    pub requirements: String,
    #[schema(value_type = String)]
    pub salary_min: Decimal,
    #[schema(value_type = String)]
    pub salary_max: Decimal,
    pub salary_currency: Option<String>,
    #[schema(example = "active")]
    pub status: String,
    pub application_deadline: Option<DateTime<Utc>>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_person: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub additional_info: Option<JsonValue>,
    pub institute_id: Uuid,
    pub institute: InstituteResponse,
    pub specialties: Vec<Specialty>,
}

impl JobResponse {
    pub fn new(job: Job, institute: InstituteResponse, specialties: Vec<Specialty>) -> Self {
        Self {
            id: job.id,
            created_at: job.created_at,
            updated_at: job.updated_at,
            title: job.title,
            description: job.description,
            short_description: job.short_description,
            job_type: job.job_type,
            work_location: job.work_location,
            experience_level: job.experience_level,
            requirements: job.requirements,
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            salary_currency: job.salary_currency,
            status: job.status,
            application_deadline: job.application_deadline,
            contact_email: job.contact_email,
            contact_phone: job.contact_phone,
            contact_person: job.contact_person,
            additional_info: job.additional_info,
            institute_id: job.institute_id,
            institute,
            specialties,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default, rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct JobListQuery {
    /// Page number (default: 1)
    pub page: Option<i64>,
    /// Jobs per page (default: 20)
    pub page_size: Option<i64>,
    pub job_type: Option<String>,
    /// Case-insensitive match on the work location
    pub location: Option<String>,
    pub experience_level: Option<String>,
    pub status: Option<JobStatus>,
    /// Comma-separated specialty names, any of which may match
    pub specialties: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default, rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct JobSearchQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    /// Matched against title, description and requirements
    pub q: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub specialty_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default, rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct InstitutionJobsQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub status: Option<JobStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn create_payload(min: &str, max: &str) -> CreateJobPayload {
        serde_json::from_value(serde_json::json!({
            "title": "Staff Nurse",
            "description": "Night shifts in the ICU",
            "jobType": "Full-time",
            "workLocation": "Mumbai",
            "experienceLevel": "Mid",
            "requirements": "BSc Nursing",
            "salaryMin": min,
            "salaryMax": max,
            "specialties": ["Critical Care"]
        }))
        .unwrap()
    }

    #[test]
    fn ordered_salary_range_passes() {
        let payload = create_payload("30000", "45000.50");
        assert_eq!(payload.status, JobStatus::Active);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn inverted_or_negative_salary_is_rejected() {
        assert!(create_payload("50000", "40000").validate().is_err());
        assert!(create_payload("-1", "40000").validate().is_err());
    }

    #[test]
    fn numeric_salary_values_are_accepted() {
        let payload: CreateJobPayload = serde_json::from_value(serde_json::json!({
            "title": "Pharmacist",
            "description": "Retail counter",
            "jobType": "Part-time",
            "workLocation": "Chennai",
            "experienceLevel": "Entry",
            "requirements": "B.Pharm",
            "salaryMin": 20000,
            "salaryMax": 25000
        }))
        .unwrap();
        assert_eq!(payload.salary_min, Decimal::from(20000));
        assert!(payload.specialties.is_empty());
    }

    #[test]
    fn partial_update_checks_only_supplied_bounds() {
        let patch = UpdateJobPayload {
            salary_max: Some(Decimal::from(10)),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());

        let inverted = UpdateJobPayload {
            salary_min: Some(Decimal::from(11)),
            salary_max: Some(Decimal::from(10)),
            ..Default::default()
        };
        assert!(inverted.validate().is_err());
        assert!(!salary_range_is_valid(Decimal::from(11), Decimal::from(10)));
    }
}

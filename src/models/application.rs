use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub status: String,
    pub applied_date: DateTime<Utc>,
    pub resume_url: String,
    pub cover_letter: Option<String>,
    pub experience_years: Option<i32>,
    pub current_position: Option<String>,
    pub current_institute: Option<String>,
    pub additional_details: Option<JsonValue>,
    pub job_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Application joined with the job and applicant columns it is rendered with.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationDetail {
    #[sqlx(flatten)]
    pub application: Application,
    pub job_title: String,
    pub job_status: String,
    pub job_work_location: String,
    pub institute_id: Uuid,
    pub user_name: String,
    pub user_location: String,
    pub user_role: String,
}

pub const APPLICATION_COLUMNS: &str = "a.id, a.status, a.applied_date, a.resume_url, a.cover_letter, a.experience_years, a.current_position, a.current_institute, a.additional_details, a.job_id, a.user_id, a.created_at, a.updated_at";

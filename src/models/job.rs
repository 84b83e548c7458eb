use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub job_type: String,
    pub work_location: String,
    pub experience_level: String,
    pub requirements: String,
    pub salary_min: Decimal,
    pub salary_max: Decimal,
    pub salary_currency: Option<String>,
    pub status: String,
    pub application_deadline: Option<DateTime<Utc>>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_person: Option<String>,
    pub additional_info: Option<JsonValue>,
    pub institute_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const JOB_COLUMNS: &str = "id, title, description, short_description, job_type, work_location, experience_level, requirements, salary_min, salary_max, salary_currency, status, application_deadline, contact_email, contact_phone, contact_person, additional_info, institute_id, created_at, updated_at";

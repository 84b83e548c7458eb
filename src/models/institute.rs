use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Institute {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub contact_email: String,
    pub contact_number: String,
    pub role: String,
    pub verified: bool,
    pub affiliated_university: Option<String>,
    pub year_established: Option<i32>,
    pub ownership: Option<String>,
    pub headline: Option<String>,
    pub about: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub const INSTITUTE_COLUMNS: &str = "id, name, location, contact_email, contact_number, role, verified, affiliated_university, year_established, ownership, headline, about, created_at";

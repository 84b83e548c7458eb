use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub specialty: String,
    pub gender: String,
    pub role: String,
    pub headline: Option<String>,
    pub about: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

pub const USER_COLUMNS: &str =
    "id, name, location, specialty, gender, role, headline, about, verified, created_at";

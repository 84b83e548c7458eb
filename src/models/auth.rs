use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Credential row. Never serialized: the hash must not leave the service.
#[derive(Debug, Clone, FromRow)]
pub struct Auth {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

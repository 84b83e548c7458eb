use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct JobView {
    pub id: i64,
    pub job_id: Uuid,
    pub user_id: Option<Uuid>,
    pub viewed_at: DateTime<Utc>,
}

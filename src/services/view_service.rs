use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::job_view::JobView;
use crate::utils::time;

/// A repeat view by the same viewer inside this window is not recorded.
pub const VIEW_DEDUP_WINDOW_MINUTES: i64 = 10;

#[derive(Clone)]
pub struct ViewService {
    pool: PgPool,
}

impl ViewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns `true` when a new view row was written. Views of a job that
    /// does not exist are not recorded.
    pub async fn record_view(&self, job_id: Uuid, user_id: Option<Uuid>) -> Result<bool> {
        self.record_view_at(job_id, user_id, time::now()).await
    }

    /// Check-then-insert without a lock: two concurrent first views can
    /// both land.
    pub async fn record_view_at(
        &self,
        job_id: Uuid,
        user_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let since = time::minutes_before(now, VIEW_DEDUP_WINDOW_MINUTES);
        let recent = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM job_views
            WHERE job_id = $1
              AND user_id IS NOT DISTINCT FROM $2
              AND viewed_at >= $3
            LIMIT 1
            "#,
        )
        .bind(job_id)
        .bind(user_id)
        .bind(since)
        .fetch_optional(&self.pool)
        .await?;

        if recent.is_some() {
            return Ok(false);
        }

        // Unknown job ids, and viewers whose account is gone, insert nothing.
        let inserted = sqlx::query(
            r#"
            INSERT INTO job_views (job_id, user_id, viewed_at)
            SELECT $1, $2, $3
            WHERE EXISTS (SELECT 1 FROM jobs WHERE id = $1)
              AND ($2::uuid IS NULL OR EXISTS (SELECT 1 FROM auth WHERE id = $2))
            "#,
        )
        .bind(job_id)
        .bind(user_id)
        .bind(now)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted > 0)
    }

    pub async fn views_since(&self, job_id: Uuid, since: DateTime<Utc>) -> Result<Vec<JobView>> {
        let views = sqlx::query_as::<_, JobView>(
            r#"
            SELECT id, job_id, user_id, viewed_at
            FROM job_views
            WHERE job_id = $1 AND viewed_at >= $2
            ORDER BY viewed_at
            "#,
        )
        .bind(job_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(views)
    }
}

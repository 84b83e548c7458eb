use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::stats_dto::{DailyTrendPoint, JobStats, WeeklyEngagementPoint};
use crate::error::Result;
use crate::middleware::auth::Claims;
use crate::models::application::Application;
use crate::models::job_view::JobView;
use crate::models::role::{ApplicationStatus, AuthRole};
use crate::services::view_service::ViewService;
use crate::utils::ownership::ensure_owner_or_hidden;
use crate::utils::time;

pub const VIEW_WINDOW_DAYS: i64 = 7;
pub const APPLICATION_WINDOW_DAYS: i64 = 30;
const TREND_DAYS: i64 = 7;
const ENGAGEMENT_WEEKS: i64 = 4;

#[derive(Clone)]
pub struct StatsService {
    pool: PgPool,
    views: ViewService,
}

impl StatsService {
    pub fn new(pool: PgPool) -> Self {
        let views = ViewService::new(pool.clone());
        Self { pool, views }
    }

    /// Only the owning institute may read a job's stats; anyone else gets
    /// the same answer as for a missing job.
    pub async fn job_stats(&self, caller: &Claims, job_id: Uuid) -> Result<JobStats> {
        let owner = sqlx::query_scalar::<_, Uuid>("SELECT institute_id FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;
        ensure_owner_or_hidden(caller, owner, Some(AuthRole::Institute), "Job")?;

        let now = time::now();
        let views = self
            .views
            .views_since(job_id, time::days_before(now, VIEW_WINDOW_DAYS))
            .await?;
        let applications = sqlx::query_as::<_, Application>(
            r#"
            SELECT id, status, applied_date, resume_url, cover_letter, experience_years,
                   current_position, current_institute, additional_details, job_id, user_id,
                   created_at, updated_at
            FROM applications
            WHERE job_id = $1 AND created_at >= $2
            ORDER BY created_at
            "#,
        )
        .bind(job_id)
        .bind(time::days_before(now, APPLICATION_WINDOW_DAYS))
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(
            %job_id,
            views = views.len(),
            applications = applications.len(),
            "Computing job stats"
        );
        Ok(compute_job_stats(now, &views, &applications))
    }
}

fn is_response(application: &Application) -> bool {
    application.status != ApplicationStatus::Pending.as_str()
}

fn percentage(numerator: i64, denominator: i64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    round2(numerator as f64 / denominator as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Reduces the fetched rows into the stats document. Pure in its inputs.
pub fn compute_job_stats(
    now: DateTime<Utc>,
    views: &[JobView],
    applications: &[Application],
) -> JobStats {
    let total_views = views.len() as i64;
    let total_responses = applications.iter().filter(|a| is_response(a)).count() as i64;
    let total_conversions = applications
        .iter()
        .filter(|a| a.status == ApplicationStatus::Accepted.as_str())
        .count() as i64;

    let average_response_time_hours = if applications.is_empty() {
        0.0
    } else {
        let total_seconds: i64 = applications
            .iter()
            .map(|a| (a.updated_at - a.created_at).num_seconds())
            .sum();
        round2(total_seconds as f64 / 3600.0 / applications.len() as f64)
    };

    let today = time::day_of(now);
    let daily_trend = (0..TREND_DAYS)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            DailyTrendPoint {
                date,
                views: views
                    .iter()
                    .filter(|v| time::day_of(v.viewed_at) == date)
                    .count() as i64,
                responses: applications
                    .iter()
                    .filter(|a| is_response(a) && time::day_of(a.updated_at) == date)
                    .count() as i64,
            }
        })
        .collect();

    let weekly_engagement = (0..ENGAGEMENT_WEEKS)
        .map(|index| {
            let start = time::days_before(now, (ENGAGEMENT_WEEKS - index) * 7);
            let end = time::days_before(now, (ENGAGEMENT_WEEKS - index - 1) * 7);
            let in_bucket = |created: DateTime<Utc>| {
                created >= start && (created < end || (index == ENGAGEMENT_WEEKS - 1 && created <= end))
            };
            WeeklyEngagementPoint {
                week: format!("Week {}", index + 1),
                applications: applications
                    .iter()
                    .filter(|a| in_bucket(a.created_at))
                    .count() as i64,
            }
        })
        .collect();

    let mut status_distribution = BTreeMap::new();
    for application in applications {
        *status_distribution
            .entry(application.status.clone())
            .or_insert(0) += 1;
    }

    JobStats {
        total_views,
        total_responses,
        total_conversions,
        response_rate: percentage(total_responses, total_views),
        conversion_rate: percentage(total_conversions, total_responses),
        average_response_time_hours,
        daily_trend,
        weekly_engagement,
        status_distribution,
    }
}

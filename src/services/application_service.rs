use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::application_dto::{
    ApplicationResponse, CreateApplicationPayload, UpdateApplicationPayload,
};
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::application::{ApplicationDetail, APPLICATION_COLUMNS};
use crate::models::role::{ApplicationStatus, AuthRole};
use crate::utils::ownership::{can_mutate, ensure_can_mutate, require_role};
use crate::utils::time;

fn detail_select() -> String {
    format!(
        r#"
        SELECT {},
               j.title AS job_title,
               j.status AS job_status,
               j.work_location AS job_work_location,
               j.institute_id AS institute_id,
               u.name AS user_name,
               u.location AS user_location,
               u.role AS user_role
        FROM applications a
        JOIN jobs j ON j.id = a.job_id
        JOIN users u ON u.id = a.user_id
        "#,
        APPLICATION_COLUMNS
    )
}

/// The applicant or the institute that posted the job.
fn may_read(caller: &Claims, detail: &ApplicationDetail) -> bool {
    can_mutate(caller, detail.application.user_id, Some(AuthRole::User))
        || can_mutate(caller, detail.institute_id, Some(AuthRole::Institute))
}

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The applicant is always the caller.
    pub async fn create(
        &self,
        caller: &Claims,
        payload: CreateApplicationPayload,
    ) -> Result<ApplicationResponse> {
        require_role(caller, AuthRole::User, "apply to jobs")?;

        let job = sqlx::query_scalar::<_, Uuid>("SELECT id FROM jobs WHERE id = $1")
            .bind(payload.job_id)
            .fetch_optional(&self.pool)
            .await?;
        if job.is_none() {
            return Err(Error::NotFound("Job not found".to_string()));
        }

        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO applications (
                applied_date, resume_url, cover_letter, experience_years,
                current_position, current_institute, additional_details, job_id, user_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(payload.applied_date.unwrap_or_else(time::now))
        .bind(payload.resume_url.trim())
        .bind(payload.cover_letter.as_deref())
        .bind(payload.experience_years)
        .bind(payload.current_position.as_deref())
        .bind(payload.current_institute.as_deref())
        .bind(&payload.additional_details)
        .bind(payload.job_id)
        .bind(caller.id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(application_id = %id, job_id = %payload.job_id, user_id = %caller.id, "Application submitted");
        self.load(id).await
    }

    pub async fn get(&self, caller: &Claims, id: Uuid) -> Result<ApplicationResponse> {
        let detail = self
            .find(id)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;
        if !may_read(caller, &detail) {
            return Err(Error::Forbidden(
                "cannot view another applicant's application".to_string(),
            ));
        }
        Ok(detail.into())
    }

    pub async fn update(
        &self,
        caller: &Claims,
        id: Uuid,
        payload: UpdateApplicationPayload,
    ) -> Result<ApplicationResponse> {
        let owner = self.find(id).await?.map(|d| d.application.user_id);
        ensure_can_mutate(caller, owner, Some(AuthRole::User), "Application")?;

        sqlx::query(
            r#"
            UPDATE applications
            SET
                resume_url = COALESCE($2, resume_url),
                cover_letter = COALESCE($3, cover_letter),
                experience_years = COALESCE($4, experience_years),
                current_position = COALESCE($5, current_position),
                current_institute = COALESCE($6, current_institute),
                additional_details = COALESCE($7, additional_details),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(payload.resume_url)
        .bind(payload.cover_letter)
        .bind(payload.experience_years)
        .bind(payload.current_position)
        .bind(payload.current_institute)
        .bind(payload.additional_details)
        .execute(&self.pool)
        .await?;

        tracing::info!(application_id = %id, "Application updated");
        self.load(id).await
    }

    /// Only the institute that posted the job may move an application
    /// between pending, accepted and rejected.
    pub async fn update_status(
        &self,
        caller: &Claims,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<ApplicationResponse> {
        let owner = self.find(id).await?.map(|d| d.institute_id);
        ensure_can_mutate(caller, owner, Some(AuthRole::Institute), "Application")?;

        sqlx::query("UPDATE applications SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;

        tracing::info!(application_id = %id, status = %status, "Application status changed");
        self.load(id).await
    }

    pub async fn delete(&self, caller: &Claims, id: Uuid) -> Result<()> {
        let owner = self.find(id).await?.map(|d| d.application.user_id);
        ensure_can_mutate(caller, owner, Some(AuthRole::User), "Application")?;

        sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!(application_id = %id, "Application withdrawn");
        Ok(())
    }

    pub async fn list_for_job(&self, caller: &Claims, job_id: Uuid) -> Result<Vec<ApplicationResponse>> {
        let owner = self.job_owner(job_id).await?;
        ensure_can_mutate(caller, owner, Some(AuthRole::Institute), "Job")?;

        let sql = format!("{} WHERE a.job_id = $1 ORDER BY a.created_at DESC", detail_select());
        let rows = sqlx::query_as::<_, ApplicationDetail>(&sql)
            .bind(job_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ApplicationResponse::from).collect())
    }

    pub async fn list_for_user(&self, caller: &Claims, user_id: Uuid) -> Result<Vec<ApplicationResponse>> {
        let user = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        ensure_can_mutate(caller, user, Some(AuthRole::User), "User")?;

        let sql = format!("{} WHERE a.user_id = $1 ORDER BY a.created_at DESC", detail_select());
        let rows = sqlx::query_as::<_, ApplicationDetail>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ApplicationResponse::from).collect())
    }

    /// The most recent application of `user_id` to `job_id`, visible to
    /// that user and to the job's institute.
    pub async fn find_for_user_and_job(
        &self,
        caller: &Claims,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<ApplicationResponse> {
        let owner = self
            .job_owner(job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        let permitted = can_mutate(caller, user_id, Some(AuthRole::User))
            || can_mutate(caller, owner, Some(AuthRole::Institute));
        if !permitted {
            return Err(Error::Forbidden(
                "cannot view another applicant's application".to_string(),
            ));
        }

        let sql = format!(
            "{} WHERE a.user_id = $1 AND a.job_id = $2 ORDER BY a.created_at DESC LIMIT 1",
            detail_select()
        );
        let detail = sqlx::query_as::<_, ApplicationDetail>(&sql)
            .bind(user_id)
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;
        Ok(detail.into())
    }

    async fn job_owner(&self, job_id: Uuid) -> Result<Option<Uuid>> {
        let owner = sqlx::query_scalar::<_, Uuid>("SELECT institute_id FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }

    async fn find(&self, id: Uuid) -> Result<Option<ApplicationDetail>> {
        let sql = format!("{} WHERE a.id = $1", detail_select());
        let detail = sqlx::query_as::<_, ApplicationDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(detail)
    }

    async fn load(&self, id: Uuid) -> Result<ApplicationResponse> {
        self.find(id)
            .await?
            .map(ApplicationResponse::from)
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))
    }
}

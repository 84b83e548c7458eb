use sqlx::PgPool;
use uuid::Uuid;

use crate::database::query::{contains_pattern, fetch_page, Conditions};
use crate::dto::common_dto::{split_specialty_names, Paginated, Pagination};
use crate::dto::job_dto::{
    salary_range_is_valid, CreateJobPayload, InstitutionJobsQuery, JobListQuery, JobResponse,
    JobSearchQuery, UpdateJobPayload,
};
use crate::error::{Error, Result, INVALID_INPUT};
use crate::middleware::auth::Claims;
use crate::models::job::{Job, JOB_COLUMNS};
use crate::models::role::AuthRole;
use crate::services::institute_service::load_responses;
use crate::services::specialty_service::{
    load_links, push_specialty_filter, replace_links, LinkTable,
};
use crate::utils::ownership::{ensure_can_mutate, require_role};

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The posting institute is always the caller.
    pub async fn create(&self, caller: &Claims, payload: CreateJobPayload) -> Result<JobResponse> {
        require_role(caller, AuthRole::Institute, "create jobs")?;

        let institute = sqlx::query_scalar::<_, Uuid>("SELECT id FROM institutes WHERE id = $1")
            .bind(caller.id)
            .fetch_optional(&self.pool)
            .await?;
        if institute.is_none() {
            return Err(Error::NotFound("Institute not found".to_string()));
        }

        let mut tx = self.pool.begin().await?;
        let sql = format!(
            r#"
            INSERT INTO jobs (
                title, description, short_description, job_type, work_location,
                experience_level, requirements, salary_min, salary_max, salary_currency,
                status, application_deadline, contact_email, contact_phone, contact_person,
                additional_info, institute_id
            ) VALUES (
                $1, $2, $3, $4, $5,
                $6, $7, $8, $9, COALESCE($10, 'INR'),
                $11, $12, $13, $14, $15,
                $16, $17
            )
            RETURNING {}
            "#,
            JOB_COLUMNS
        );
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(payload.title.trim())
            .bind(&payload.description)
            .bind(payload.short_description.as_deref())
            .bind(payload.job_type.trim())
            .bind(payload.work_location.trim())
            .bind(payload.experience_level.trim())
            .bind(&payload.requirements)
            .bind(payload.salary_min)
            .bind(payload.salary_max)
            .bind(payload.salary_currency.as_deref())
            .bind(payload.status.as_str())
            .bind(payload.application_deadline)
            .bind(payload.contact_email.as_deref())
            .bind(payload.contact_phone.as_deref())
            .bind(payload.contact_person.as_deref())
            .bind(&payload.additional_info)
            .bind(caller.id)
            .fetch_one(&mut *tx)
            .await?;

        replace_links(&mut *tx, LinkTable::Job, job.id, &payload.specialties).await?;
        tx.commit().await?;

        tracing::info!(job_id = %job.id, institute_id = %caller.id, "Job created");
        self.get(job.id).await
    }

    pub async fn list(&self, query: JobListQuery) -> Result<Paginated<JobResponse>> {
        let pagination = Pagination::new(query.page, query.page_size);
        let specialties = split_specialty_names(query.specialties.as_deref());

        let (jobs, total) = fetch_page::<Job, _>(
            &self.pool,
            JOB_COLUMNS,
            "jobs",
            "created_at DESC",
            pagination,
            |builder| {
                let mut conditions = Conditions::new();
                if let Some(job_type) = &query.job_type {
                    conditions
                        .next(builder)
                        .push("LOWER(job_type) = LOWER(")
                        .push_bind(job_type.trim().to_string())
                        .push(")");
                }
                if let Some(location) = &query.location {
                    conditions
                        .next(builder)
                        .push("LOWER(work_location) = LOWER(")
                        .push_bind(location.trim().to_string())
                        .push(")");
                }
                if let Some(level) = &query.experience_level {
                    conditions
                        .next(builder)
                        .push("LOWER(experience_level) = LOWER(")
                        .push_bind(level.trim().to_string())
                        .push(")");
                }
                if let Some(status) = query.status {
                    conditions.next(builder).push("status = ").push_bind(status.as_str());
                }
                push_specialty_filter(builder, &mut conditions, LinkTable::Job, "jobs", &specialties);
            },
        )
        .await?;

        let items = self.hydrate(jobs).await?;
        Ok(Paginated::new(items, pagination, total))
    }

    pub async fn search(&self, query: JobSearchQuery) -> Result<Paginated<JobResponse>> {
        let pagination = Pagination::new(query.page, query.page_size);
        let needle = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(contains_pattern);

        let (jobs, total) = fetch_page::<Job, _>(
            &self.pool,
            JOB_COLUMNS,
            "jobs",
            "created_at DESC",
            pagination,
            |builder| {
                let mut conditions = Conditions::new();
                if let Some(needle) = &needle {
                    conditions
                        .next(builder)
                        .push("(title ILIKE ")
                        .push_bind(needle.clone())
                        .push(" OR description ILIKE ")
                        .push_bind(needle.clone())
                        .push(" OR requirements ILIKE ")
                        .push_bind(needle.clone())
                        .push(")");
                }
                if let Some(location) = &query.location {
                    conditions
                        .next(builder)
                        .push("LOWER(work_location) = LOWER(")
                        .push_bind(location.trim().to_string())
                        .push(")");
                }
                if let Some(job_type) = &query.job_type {
                    conditions
                        .next(builder)
                        .push("LOWER(job_type) = LOWER(")
                        .push_bind(job_type.trim().to_string())
                        .push(")");
                }
                if let Some(level) = &query.experience_level {
                    conditions
                        .next(builder)
                        .push("LOWER(experience_level) = LOWER(")
                        .push_bind(level.trim().to_string())
                        .push(")");
                }
                if let Some(specialty_id) = query.specialty_id {
                    conditions
                        .next(builder)
                        .push("EXISTS (SELECT 1 FROM job_specialties js WHERE js.job_id = jobs.id AND js.specialty_id = ")
                        .push_bind(specialty_id)
                        .push(")");
                }
            },
        )
        .await?;

        let items = self.hydrate(jobs).await?;
        Ok(Paginated::new(items, pagination, total))
    }

    pub async fn list_for_institute(
        &self,
        institute_id: Uuid,
        query: InstitutionJobsQuery,
    ) -> Result<Paginated<JobResponse>> {
        let pagination = Pagination::new(query.page, query.page_size);

        let (jobs, total) = fetch_page::<Job, _>(
            &self.pool,
            JOB_COLUMNS,
            "jobs",
            "created_at DESC",
            pagination,
            |builder| {
                let mut conditions = Conditions::new();
                conditions
                    .next(builder)
                    .push("institute_id = ")
                    .push_bind(institute_id);
                if let Some(status) = query.status {
                    conditions.next(builder).push("status = ").push_bind(status.as_str());
                }
            },
        )
        .await?;

        let items = self.hydrate(jobs).await?;
        Ok(Paginated::new(items, pagination, total))
    }

    pub async fn get(&self, id: Uuid) -> Result<JobResponse> {
        let job = self
            .find(id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        self.hydrate(vec![job])
            .await?
            .pop()
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }

    pub async fn update(
        &self,
        caller: &Claims,
        id: Uuid,
        payload: UpdateJobPayload,
    ) -> Result<JobResponse> {
        let current = self.find(id).await?;
        ensure_can_mutate(
            caller,
            current.as_ref().map(|job| job.institute_id),
            Some(AuthRole::Institute),
            "Job",
        )?;

        if let Some(current) = &current {
            let min = payload.salary_min.unwrap_or(current.salary_min);
            let max = payload.salary_max.unwrap_or(current.salary_max);
            if !salary_range_is_valid(min, max) {
                tracing::warn!(job_id = %id, %min, %max, "Rejected inverted salary range");
                return Err(Error::BadRequest(INVALID_INPUT.to_string()));
            }
        }

        let mut tx = self.pool.begin().await?;
        let sql = format!(
            r#"
            UPDATE jobs
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                short_description = COALESCE($4, short_description),
                job_type = COALESCE($5, job_type),
                work_location = COALESCE($6, work_location),
                experience_level = COALESCE($7, experience_level),
                requirements = COALESCE($8, requirements),
                salary_min = COALESCE($9, salary_min),
                salary_max = COALESCE($10, salary_max),
                salary_currency = COALESCE($11, salary_currency),
                status = COALESCE($12, status),
                application_deadline = COALESCE($13, application_deadline),
                contact_email = COALESCE($14, contact_email),
                contact_phone = COALESCE($15, contact_phone),
                contact_person = COALESCE($16, contact_person),
                additional_info = COALESCE($17, additional_info),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            JOB_COLUMNS
        );
        sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .bind(payload.title)
            .bind(payload.description)
            .bind(payload.short_description)
            .bind(payload.job_type)
            .bind(payload.work_location)
            .bind(payload.experience_level)
            .bind(payload.requirements)
            .bind(payload.salary_min)
            .bind(payload.salary_max)
            .bind(payload.salary_currency)
            .bind(payload.status.map(|status| status.as_str()))
            .bind(payload.application_deadline)
            .bind(payload.contact_email)
            .bind(payload.contact_phone)
            .bind(payload.contact_person)
            .bind(payload.additional_info)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(names) = payload.specialties {
            replace_links(&mut *tx, LinkTable::Job, id, &names).await?;
        }
        tx.commit().await?;

        tracing::info!(job_id = %id, "Job updated");
        self.get(id).await
    }

    pub async fn delete(&self, caller: &Claims, id: Uuid) -> Result<()> {
        let owner = self.owner_of(id).await?;
        ensure_can_mutate(caller, owner, Some(AuthRole::Institute), "Job")?;

        sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!(job_id = %id, "Job deleted");
        Ok(())
    }

    /// The institute that posted the job, if the job exists.
    pub async fn owner_of(&self, id: Uuid) -> Result<Option<Uuid>> {
        let owner = sqlx::query_scalar::<_, Uuid>("SELECT institute_id FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Job>> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS);
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    /// Attaches each job's institute and specialties with one query per
    /// relation.
    async fn hydrate(&self, jobs: Vec<Job>) -> Result<Vec<JobResponse>> {
        let job_ids: Vec<Uuid> = jobs.iter().map(|job| job.id).collect();
        let mut institute_ids: Vec<Uuid> = jobs.iter().map(|job| job.institute_id).collect();
        institute_ids.sort_unstable();
        institute_ids.dedup();

        let institutes = load_responses(&self.pool, &institute_ids).await?;
        let mut specialties = load_links(&self.pool, LinkTable::Job, &job_ids).await?;

        jobs.into_iter()
            .map(|job| {
                let institute = institutes.get(&job.institute_id).cloned().ok_or_else(|| {
                    Error::Internal(format!("institute {} missing for job {}", job.institute_id, job.id))
                })?;
                let job_specialties = specialties.remove(&job.id).unwrap_or_default();
                Ok(JobResponse::new(job, institute, job_specialties))
            })
            .collect()
    }
}

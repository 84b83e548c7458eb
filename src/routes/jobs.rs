use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;

use crate::{
    dto::{
        common_dto::{ErrorBody, JobPage},
        job_dto::{
            CreateJobPayload, InstitutionJobsQuery, JobListQuery, JobResponse, JobSearchQuery,
            UpdateJobPayload,
        },
        stats_dto::JobStats,
    },
    error::Result,
    middleware::auth::AuthUser,
    utils::validation::{ValidPath, ValidQuery, ValidatedJson},
    AppState,
};

#[utoipa::path(
    get,
    path = "/v1/jobs",
    tag = "jobs",
    params(JobListQuery),
    responses(
        (status = 200, description = "Page of jobs, newest first", body = JobPage),
        (status = 400, description = "Invalid query parameters", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<JobListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.job_service.list(query).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/v1/jobs/search",
    tag = "jobs",
    params(JobSearchQuery),
    responses(
        (status = 200, description = "Jobs matching the search", body = JobPage),
        (status = 400, description = "Invalid query parameters", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn search_jobs(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<JobSearchQuery>,
) -> Result<impl IntoResponse> {
    let page = state.job_service.search(query).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/v1/jobs/institution/{institute_id}",
    tag = "jobs",
    params(
        ("institute_id" = Uuid, Path, description = "Institute ID"),
        InstitutionJobsQuery
    ),
    responses(
        (status = 200, description = "Jobs posted by the institute", body = JobPage),
        (status = 404, description = "Malformed institute id", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn list_institution_jobs(
    State(state): State<AppState>,
    ValidPath(institute_id): ValidPath<Uuid>,
    ValidQuery(query): ValidQuery<InstitutionJobsQuery>,
) -> Result<impl IntoResponse> {
    let page = state
        .job_service
        .list_for_institute(institute_id, query)
        .await?;
    Ok(Json(page))
}

/// Each call is also recorded as a view of the job.
#[utoipa::path(
    get,
    path = "/v1/jobs/{job_id}",
    tag = "jobs",
    params(("job_id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job with institute and specialties", body = JobResponse),
        (status = 404, description = "Job not found", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get(id).await?;
    Ok(Json(job))
}

#[utoipa::path(
    post,
    path = "/v1/jobs",
    tag = "jobs",
    security(("bearer_auth" = [])),
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created for the caller's institute", body = JobResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Caller is not an INSTITUTE account", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.create(&caller, payload).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

#[utoipa::path(
    put,
    path = "/v1/jobs/{job_id}",
    tag = "jobs",
    security(("bearer_auth" = [])),
    params(("job_id" = Uuid, Path, description = "Job ID")),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Job updated", body = JobResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Job belongs to another institute", body = ErrorBody),
        (status = 404, description = "Job not found", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(id): ValidPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.update(&caller, id, payload).await?;
    Ok(Json(job))
}

#[utoipa::path(
    delete,
    path = "/v1/jobs/{job_id}",
    tag = "jobs",
    security(("bearer_auth" = [])),
    params(("job_id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Job belongs to another institute", body = ErrorBody),
        (status = 404, description = "Job not found", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.job_service.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/v1/jobs/{job_id}/stats",
    tag = "jobs",
    security(("bearer_auth" = [])),
    params(("job_id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "View and application statistics", body = JobStats),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "Job not found or access denied", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get_job_stats(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    let stats = state.stats_service.job_stats(&caller, id).await?;
    Ok(Json(stats))
}

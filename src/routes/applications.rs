use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;

use crate::{
    dto::{
        application_dto::{
            ApplicationResponse, CreateApplicationPayload, UpdateApplicationPayload,
            UpdateApplicationStatusPayload,
        },
        common_dto::ErrorBody,
    },
    error::Result,
    middleware::auth::AuthUser,
    utils::validation::{ValidPath, ValidatedJson},
    AppState,
};

#[utoipa::path(
    post,
    path = "/v1/applications",
    tag = "applications",
    security(("bearer_auth" = [])),
    request_body = CreateApplicationPayload,
    responses(
        (status = 201, description = "Application submitted", body = ApplicationResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Caller is not a USER account", body = ErrorBody),
        (status = 404, description = "Job not found", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn create_application(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateApplicationPayload>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.create(&caller, payload).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    get,
    path = "/v1/applications/{application_id}",
    tag = "applications",
    security(("bearer_auth" = [])),
    params(("application_id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application with job and applicant summaries", body = ApplicationResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Neither the applicant nor the job's institute", body = ErrorBody),
        (status = 404, description = "Application not found", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.get(&caller, id).await?;
    Ok(Json(application))
}

#[utoipa::path(
    put,
    path = "/v1/applications/{application_id}",
    tag = "applications",
    security(("bearer_auth" = [])),
    params(("application_id" = Uuid, Path, description = "Application ID")),
    request_body = UpdateApplicationPayload,
    responses(
        (status = 200, description = "Application updated", body = ApplicationResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Not the applicant", body = ErrorBody),
        (status = 404, description = "Application not found", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn update_application(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(id): ValidPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateApplicationPayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .update(&caller, id, payload)
        .await?;
    Ok(Json(application))
}

#[utoipa::path(
    patch,
    path = "/v1/applications/{application_id}/status",
    tag = "applications",
    security(("bearer_auth" = [])),
    params(("application_id" = Uuid, Path, description = "Application ID")),
    request_body = UpdateApplicationStatusPayload,
    responses(
        (status = 200, description = "Status changed", body = ApplicationResponse),
        (status = 400, description = "Unknown status", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Not the job's institute", body = ErrorBody),
        (status = 404, description = "Application not found", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn update_application_status(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(id): ValidPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateApplicationStatusPayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .update_status(&caller, id, payload.status)
        .await?;
    Ok(Json(application))
}

#[utoipa::path(
    delete,
    path = "/v1/applications/{application_id}",
    tag = "applications",
    security(("bearer_auth" = [])),
    params(("application_id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 204, description = "Application withdrawn"),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Not the applicant", body = ErrorBody),
        (status = 404, description = "Application not found", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn delete_application(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.application_service.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/v1/applications/job/{job_id}",
    tag = "applications",
    security(("bearer_auth" = [])),
    params(("job_id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Applications to the job, newest first", body = [ApplicationResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Not the job's institute", body = ErrorBody),
        (status = 404, description = "Job not found", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn list_job_applications(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(job_id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    let applications = state
        .application_service
        .list_for_job(&caller, job_id)
        .await?;
    Ok(Json(applications))
}

#[utoipa::path(
    get,
    path = "/v1/applications/user/{user_id}",
    tag = "applications",
    security(("bearer_auth" = [])),
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user's applications, newest first", body = [ApplicationResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Not that user", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn list_user_applications(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(user_id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    let applications = state
        .application_service
        .list_for_user(&caller, user_id)
        .await?;
    Ok(Json(applications))
}

#[utoipa::path(
    get,
    path = "/v1/applications/user/{user_id}/job/{job_id}",
    tag = "applications",
    security(("bearer_auth" = [])),
    params(
        ("user_id" = Uuid, Path, description = "User ID"),
        ("job_id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "The user's application to the job", body = ApplicationResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Neither that user nor the job's institute", body = ErrorBody),
        (status = 404, description = "Job or application not found", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get_user_job_application(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath((user_id, job_id)): ValidPath<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .find_for_user_and_job(&caller, user_id, job_id)
        .await?;
    Ok(Json(application))
}

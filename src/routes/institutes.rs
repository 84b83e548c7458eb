use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;

use crate::{
    dto::{
        common_dto::{ErrorBody, InstitutePage},
        institute_dto::{
            CreateInstitutePayload, InstituteListQuery, InstituteResponse, UpdateInstitutePayload,
        },
    },
    error::Result,
    middleware::auth::AuthUser,
    utils::validation::{ValidPath, ValidQuery, ValidatedJson},
    AppState,
};

#[utoipa::path(
    get,
    path = "/v1/institutes",
    tag = "institutes",
    params(InstituteListQuery),
    responses(
        (status = 200, description = "Page of institutes", body = InstitutePage),
        (status = 400, description = "Invalid query parameters", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn list_institutes(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<InstituteListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.institute_service.list(query).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/v1/institutes/search",
    tag = "institutes",
    params(InstituteListQuery),
    responses(
        (status = 200, description = "Institutes matching the filters", body = InstitutePage),
        (status = 400, description = "Invalid query parameters", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn search_institutes(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<InstituteListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.institute_service.list(query).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/v1/institutes/{institute_id}",
    tag = "institutes",
    params(("institute_id" = Uuid, Path, description = "Institute ID")),
    responses(
        (status = 200, description = "Institute with specialties", body = InstituteResponse),
        (status = 404, description = "Institute not found", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get_institute(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    let institute = state.institute_service.get(id).await?;
    Ok(Json(institute))
}

#[utoipa::path(
    get,
    path = "/v1/institutes/me",
    tag = "institutes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's institute", body = InstituteResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "No institute profile for this account", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get_my_institute(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse> {
    let institute = state.institute_service.get(caller.id).await?;
    Ok(Json(institute))
}

#[utoipa::path(
    post,
    path = "/v1/institutes",
    tag = "institutes",
    security(("bearer_auth" = [])),
    request_body = CreateInstitutePayload,
    responses(
        (status = 201, description = "Institute profile created", body = InstituteResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Caller is not an INSTITUTE account", body = ErrorBody),
        (status = 409, description = "Profile or name already exists", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn create_institute(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateInstitutePayload>,
) -> Result<impl IntoResponse> {
    let institute = state.institute_service.create(&caller, payload).await?;
    Ok((StatusCode::CREATED, Json(institute)))
}

#[utoipa::path(
    put,
    path = "/v1/institutes/{institute_id}",
    tag = "institutes",
    security(("bearer_auth" = [])),
    params(("institute_id" = Uuid, Path, description = "Institute ID")),
    request_body = UpdateInstitutePayload,
    responses(
        (status = 200, description = "Institute updated", body = InstituteResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Not the institute owner", body = ErrorBody),
        (status = 404, description = "Institute not found", body = ErrorBody),
        (status = 409, description = "Name already taken", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn update_institute(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(id): ValidPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateInstitutePayload>,
) -> Result<impl IntoResponse> {
    let institute = state.institute_service.update(&caller, id, payload).await?;
    Ok(Json(institute))
}

#[utoipa::path(
    delete,
    path = "/v1/institutes/{institute_id}",
    tag = "institutes",
    security(("bearer_auth" = [])),
    params(("institute_id" = Uuid, Path, description = "Institute ID")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Not the institute owner", body = ErrorBody),
        (status = 404, description = "Institute not found", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn delete_institute(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.institute_service.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    dto::{
        common_dto::{ErrorBody, SpecialtyPage},
        specialty_dto::{CreateSpecialtyPayload, SpecialtySearchQuery},
    },
    error::Result,
    middleware::auth::AuthUser,
    models::specialty::Specialty,
    utils::validation::{ValidQuery, ValidatedJson},
    AppState,
};

#[utoipa::path(
    get,
    path = "/v1/specialties/search",
    tag = "specialties",
    params(SpecialtySearchQuery),
    responses(
        (status = 200, description = "Specialties ordered by name", body = SpecialtyPage),
        (status = 400, description = "Invalid query parameters", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn search_specialties(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<SpecialtySearchQuery>,
) -> Result<impl IntoResponse> {
    let page = state.specialty_service.search(query).await?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/v1/specialties",
    tag = "specialties",
    security(("bearer_auth" = [])),
    request_body = CreateSpecialtyPayload,
    responses(
        (status = 201, description = "Specialty created", body = Specialty),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 409, description = "Specialty already exists", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn create_specialty(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateSpecialtyPayload>,
) -> Result<impl IntoResponse> {
    let specialty = state.specialty_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(specialty)))
}

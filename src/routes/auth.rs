use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    dto::{
        auth_dto::{ProfileResponse, SigninPayload, SignupPayload, TokenResponse},
        common_dto::ErrorBody,
    },
    error::Result,
    utils::validation::ValidatedJson,
    AppState,
};

#[utoipa::path(
    post,
    path = "/v1/auth/signup",
    tag = "auth",
    request_body = SignupPayload,
    responses(
        (status = 201, description = "Account and profile created", body = ProfileResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 409, description = "Email or institute name already registered", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupPayload>,
) -> Result<impl IntoResponse> {
    let profile = state.auth_service.signup(payload).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

#[utoipa::path(
    post,
    path = "/v1/auth/signin",
    tag = "auth",
    request_body = SigninPayload,
    responses(
        (status = 200, description = "Bearer token valid for one hour", body = TokenResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 403, description = "Wrong password", body = ErrorBody),
        (status = 404, description = "Unknown email", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn signin(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SigninPayload>,
) -> Result<impl IntoResponse> {
    let token = state.auth_service.signin(payload).await?;
    Ok(Json(token))
}

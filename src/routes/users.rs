use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;

use crate::{
    dto::{
        common_dto::{ErrorBody, UserPage},
        user_dto::{
            CreateUserPayload, UpdateUserPayload, UserListQuery, UserResponse, UserSearchQuery,
        },
    },
    error::Result,
    middleware::auth::AuthUser,
    utils::validation::{ValidPath, ValidQuery, ValidatedJson},
    AppState,
};

#[utoipa::path(
    get,
    path = "/v1/users",
    tag = "users",
    params(UserListQuery),
    responses(
        (status = 200, description = "Page of users", body = UserPage),
        (status = 400, description = "Invalid query parameters", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<UserListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.user_service.list(query).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/v1/users/search",
    tag = "users",
    params(UserSearchQuery),
    responses(
        (status = 200, description = "Users whose name, specialty or location match", body = UserPage),
        (status = 400, description = "Missing or invalid query", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn search_users(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<UserSearchQuery>,
) -> Result<impl IntoResponse> {
    let page = state.user_service.search(query).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/v1/users/{user_id}",
    tag = "users",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User with specialties", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.get(id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    get,
    path = "/v1/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's profile", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "No user profile for this account", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse> {
    let user = state.user_service.get(caller.id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/v1/users",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Profile created", body = UserResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Caller is not a USER account", body = ErrorBody),
        (status = 409, description = "Profile already exists", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateUserPayload>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.create(&caller, payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    put,
    path = "/v1/users/{user_id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("user_id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Not the profile owner", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(id): ValidPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateUserPayload>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.update(&caller, id, payload).await?;
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/v1/users/{user_id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Not the profile owner", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.user_service.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

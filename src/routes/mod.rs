pub mod applications;
pub mod auth;
pub mod docs;
pub mod health;
pub mod institutes;
pub mod jobs;
pub mod specialties;
pub mod users;

use axum::{
    extract::DefaultBodyLimit,
    handler::Handler,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::middleware::{auth::decode_bearer_auth, cors::cors_layer, view_tracker::track_job_view};
use crate::AppState;

pub const BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/auth/signup", post(auth::signup))
        .route("/v1/auth/signin", post(auth::signin))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/users", get(users::list_users).post(users::create_user))
        .route("/v1/users/search", get(users::search_users))
        .route("/v1/users/me", get(users::get_me))
        .route(
            "/v1/users/:user_id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
}

fn institute_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/institutes",
            get(institutes::list_institutes).post(institutes::create_institute),
        )
        .route("/v1/institutes/search", get(institutes::search_institutes))
        .route("/v1/institutes/me", get(institutes::get_my_institute))
        .route(
            "/v1/institutes/:institute_id",
            get(institutes::get_institute)
                .put(institutes::update_institute)
                .delete(institutes::delete_institute),
        )
}

/// Only the public job detail is view-tracked; owner reads such as stats
/// are not counted.
fn job_routes(state: &AppState) -> Router<AppState> {
    let tracked_get_job =
        jobs::get_job.layer(from_fn_with_state(state.clone(), track_job_view));

    Router::new()
        .route("/v1/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/v1/jobs/search", get(jobs::search_jobs))
        .route(
            "/v1/jobs/institution/:institute_id",
            get(jobs::list_institution_jobs),
        )
        .route(
            "/v1/jobs/:job_id",
            get(tracked_get_job)
                .put(jobs::update_job)
                .delete(jobs::delete_job),
        )
        .route("/v1/jobs/:job_id/stats", get(jobs::get_job_stats))
}

fn application_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/applications", post(applications::create_application))
        .route(
            "/v1/applications/:application_id",
            get(applications::get_application)
                .put(applications::update_application)
                .delete(applications::delete_application),
        )
        .route(
            "/v1/applications/:application_id/status",
            patch(applications::update_application_status),
        )
        .route(
            "/v1/applications/job/:job_id",
            get(applications::list_job_applications),
        )
        .route(
            "/v1/applications/user/:user_id",
            get(applications::list_user_applications),
        )
        .route(
            "/v1/applications/user/:user_id/job/:job_id",
            get(applications::get_user_job_application),
        )
}

fn specialty_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/specialties", post(specialties::create_specialty))
        .route("/v1/specialties/search", get(specialties::search_specialties))
}

/// Builds the full application router with its middleware stack.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/health", get(health::health))
        .route("/openapi.json", get(docs::openapi_json))
        .route("/docs", get(docs::swagger_ui))
        .merge(auth_routes())
        .merge(user_routes())
        .merge(institute_routes())
        .merge(job_routes(&state))
        .merge(application_routes())
        .merge(specialty_routes())
        .layer(from_fn_with_state(state.clone(), decode_bearer_auth))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}

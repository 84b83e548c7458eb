mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use pharminc_backend::{models::role::AuthRole, utils::token::issue_token};
use serde_json::json;
use uuid::Uuid;

use common::{offline_app, send, TEST_SECRET};

fn job_body() -> serde_json::Value {
    json!({
        "title": "Staff Nurse",
        "description": "Night shifts",
        "jobType": "Full-time",
        "workLocation": "Mumbai",
        "experienceLevel": "Mid",
        "requirements": "BSc Nursing",
        "salaryMin": 30000,
        "salaryMax": 45000
    })
}

#[tokio::test]
async fn private_routes_require_a_token() {
    let app = offline_app();
    let job_id = Uuid::new_v4();

    for (method, uri) in [
        (Method::POST, "/v1/jobs".to_string()),
        (Method::GET, "/v1/users/me".to_string()),
        (Method::GET, format!("/v1/jobs/{}/stats", job_id)),
        (Method::GET, format!("/v1/applications/job/{}", job_id)),
        (Method::DELETE, format!("/v1/jobs/{}", job_id)),
    ] {
        let (status, body) = send(&app, method.clone(), &uri, None, Some(job_body())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(body, json!({ "error": "Unauthorized" }));
    }
}

#[tokio::test]
async fn expired_or_forged_tokens_are_ignored() {
    let app = offline_app();

    let issued = Utc::now() - Duration::hours(2);
    let expired = issue_token(Uuid::new_v4(), AuthRole::Institute, TEST_SECRET, issued).unwrap();
    let (status, _) = send(&app, Method::POST, "/v1/jobs", Some(&expired), Some(job_body())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let forged = issue_token(Uuid::new_v4(), AuthRole::Institute, "other", Utc::now()).unwrap();
    let (status, _) = send(&app, Method::POST, "/v1/jobs", Some(&forged), Some(job_body())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_accounts_cannot_post_jobs() {
    let app = offline_app();
    let token = issue_token(Uuid::new_v4(), AuthRole::User, TEST_SECRET, Utc::now()).unwrap();

    let (status, _) = send(&app, Method::POST, "/v1/jobs", Some(&token), Some(job_body())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn institute_accounts_cannot_apply() {
    let app = offline_app();
    let token = issue_token(Uuid::new_v4(), AuthRole::Institute, TEST_SECRET, Utc::now()).unwrap();

    let body = json!({ "jobId": Uuid::new_v4(), "resumeUrl": "https://cdn.example/cv.pdf" });
    let (status, _) = send(&app, Method::POST, "/v1/applications", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn invalid_bodies_are_rejected_without_detail() {
    let app = offline_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/auth/signup",
        None,
        Some(json!({ "email": "not-an-email", "password": "short" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid input" }));

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/auth/signup",
        None,
        Some(json!({ "email": "hr@city.example", "password": "longenough", "role": "INSTITUTE" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid input" }));

    let token = issue_token(Uuid::new_v4(), AuthRole::Institute, TEST_SECRET, Utc::now()).unwrap();
    let mut inverted = job_body();
    inverted["salaryMin"] = json!(90000);
    let (status, _) = send(&app, Method::POST, "/v1/jobs", Some(&token), Some(inverted)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_ids_and_queries() {
    let app = offline_app();

    let (status, _) = send(&app, Method::GET, "/v1/jobs/not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/v1/jobs?page=abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid query parameters" }));
}

#[tokio::test]
async fn health_and_docs_are_served() {
    let app = offline_app();

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, body) = send(&app, Method::GET, "/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/v1/jobs/{job_id}"].is_object());
    assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());

    let (status, body) = send(&app, Method::GET, "/docs", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap_or_default().contains("swagger-ui"));
}

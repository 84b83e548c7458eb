//! End-to-end flows against a real Postgres. Each test returns early when
//! `DATABASE_URL` is not set.

mod common;

use axum::http::{Method, StatusCode};
use axum::Router;
use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

use common::{database_app, send};

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

async fn signup_institute(app: &Router) -> (JsonValue, String) {
    let email = format!("{}@hospital.example", unique("hr"));
    let (status, profile) = send(
        app,
        Method::POST,
        "/v1/auth/signup",
        None,
        Some(json!({
            "email": email,
            "password": "institute-pass",
            "role": "INSTITUTE",
            "institute": {
                "name": unique("City Hospital"),
                "location": "Pune",
                "contactEmail": "hr@city.example",
                "contactNumber": "5550100",
                "specialties": ["Cardiology", " cardiology "]
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{profile}");
    let token = signin(app, &email, "institute-pass").await;
    (profile, token)
}

async fn signup_user(app: &Router) -> (JsonValue, String) {
    let email = format!("{}@doctor.example", unique("dr"));
    let (status, profile) = send(
        app,
        Method::POST,
        "/v1/auth/signup",
        None,
        Some(json!({
            "email": email,
            "password": "doctor-pass",
            "user": {
                "name": "Asha Rao",
                "location": "Delhi",
                "specialty": "Cardiology",
                "gender": "Female",
                "specialties": ["Cardiology"]
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{profile}");
    let token = signin(app, &email, "doctor-pass").await;
    (profile, token)
}

async fn signin(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/v1/auth/signin",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["token"].as_str().expect("token").to_string()
}

async fn create_job(app: &Router, token: &str) -> JsonValue {
    create_job_with(app, token, "Pune", &["Cardiology"]).await
}

async fn create_job_with(
    app: &Router,
    token: &str,
    work_location: &str,
    specialties: &[&str],
) -> JsonValue {
    let (status, job) = send(
        app,
        Method::POST,
        "/v1/jobs",
        Some(token),
        Some(json!({
            "title": "Cardiac Nurse",
            "description": "ICU rotation",
            "jobType": "Full-time",
            "workLocation": work_location,
            "experienceLevel": "Mid",
            "requirements": "BSc Nursing",
            "salaryMin": 30000,
            "salaryMax": 45000,
            "specialties": specialties
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{job}");
    job
}

fn specialty_names(entity: &JsonValue) -> Vec<String> {
    let mut names: Vec<String> = entity["specialties"]
        .as_array()
        .expect("specialties")
        .iter()
        .map(|s| s["name"].as_str().expect("name").to_string())
        .collect();
    names.sort();
    names
}

async fn assert_foreign_then_missing(
    app: &Router,
    method: Method,
    path: &str,
    id: &str,
    token: &str,
    body: Option<JsonValue>,
) {
    let (status, _) = send(
        app,
        method.clone(),
        &format!("{}/{}", path, id),
        Some(token),
        body.clone(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{method} {path}/{id}");

    let (status, _) = send(
        app,
        method.clone(),
        &format!("{}/{}", path, Uuid::new_v4()),
        Some(token),
        body,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{method} {path}/<missing>");
}

async fn stats(app: &Router, token: &str, job_id: &str) -> JsonValue {
    let (status, body) = send(
        app,
        Method::GET,
        &format!("/v1/jobs/{}/stats", job_id),
        Some(token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
}

#[tokio::test]
async fn hiring_flow_updates_job_stats() {
    let Some((app, _pool)) = database_app().await else {
        return;
    };

    let (institute, institute_token) = signup_institute(&app).await;
    let specialties = institute["specialties"].as_array().expect("specialties");
    assert_eq!(specialties.len(), 1);
    assert_eq!(specialties[0]["name"], "cardiology");
    assert!(institute.get("password").is_none());

    let job = create_job(&app, &institute_token).await;
    let job_id = job["id"].as_str().unwrap().to_string();
    assert_eq!(job["institute"]["id"], institute["id"]);
    assert_eq!(job["status"], "active");

    for _ in 0..2 {
        let (status, _) = send(&app, Method::GET, &format!("/v1/jobs/{}", job_id), None, None).await;
        assert_eq!(status, StatusCode::OK);
    }
    let first = stats(&app, &institute_token, &job_id).await;
    assert_eq!(first["totalViews"], 1);
    assert_eq!(first["responseRate"], 0.0);

    let (_, user_token) = signup_user(&app).await;
    let (status, application) = send(
        &app,
        Method::POST,
        "/v1/applications",
        Some(&user_token),
        Some(json!({ "jobId": job_id, "resumeUrl": "https://cdn.example/cv.pdf" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{application}");
    assert_eq!(application["status"], "pending");
    assert_eq!(application["job"]["title"], "Cardiac Nurse");

    let pending = stats(&app, &institute_token, &job_id).await;
    assert_eq!(pending["responseRate"], 0.0);
    assert_eq!(pending["statusDistribution"], json!({ "pending": 1 }));

    let application_id = application["id"].as_str().unwrap();
    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/v1/applications/{}/status", application_id),
        Some(&user_token),
        Some(json!({ "status": "accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, accepted) = send(
        &app,
        Method::PATCH,
        &format!("/v1/applications/{}/status", application_id),
        Some(&institute_token),
        Some(json!({ "status": "accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{accepted}");
    assert_eq!(accepted["status"], "accepted");

    let after = stats(&app, &institute_token, &job_id).await;
    assert_eq!(after["responseRate"], 100.0);
    assert_eq!(after["conversionRate"], 100.0);
    assert_eq!(after, stats(&app, &institute_token, &job_id).await);
}

#[tokio::test]
async fn duplicate_signup_and_signin_failures() {
    let Some((app, pool)) = database_app().await else {
        return;
    };

    let email = format!("{}@doctor.example", unique("dup"));
    let body = json!({
        "email": email,
        "password": "doctor-pass",
        "user": { "name": "A", "location": "B", "specialty": "C", "gender": "D" }
    });
    let (status, _) = send(&app, Method::POST, "/v1/auth/signup", None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, Method::POST, "/v1/auth/signup", None, Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let accounts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM auth WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(accounts, 1);

    let (status, _) = send(
        &app,
        Method::POST,
        "/v1/auth/signin",
        None,
        Some(json!({ "email": format!("{}@nowhere.example", unique("ghost")), "password": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::POST,
        "/v1/auth/signin",
        None,
        Some(json!({ "email": "bob", "password": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::POST,
        "/v1/auth/signin",
        None,
        Some(json!({ "email": email, "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn ownership_gates_distinguish_missing_from_foreign() {
    let Some((app, _pool)) = database_app().await else {
        return;
    };

    let (_, owner_token) = signup_institute(&app).await;
    let (_, other_token) = signup_institute(&app).await;
    let job = create_job(&app, &owner_token).await;
    let job_id = job["id"].as_str().unwrap();

    let patch = json!({ "title": "Senior Cardiac Nurse" });
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/v1/jobs/{}", job_id),
        Some(&other_token),
        Some(patch.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/v1/jobs/{}", Uuid::new_v4()),
        Some(&other_token),
        Some(patch.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/v1/jobs/{}/stats", job_id),
        Some(&other_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Job not found or access denied" }));

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/v1/jobs/{}", job_id),
        Some(&owner_token),
        Some(patch),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Senior Cardiac Nurse");
    assert_eq!(updated["workLocation"], "Pune");
    assert_eq!(updated["specialties"][0]["name"], "cardiology");

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/v1/jobs/{}", job_id),
        Some(&owner_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, JsonValue::Null);

    let (status, _) = send(&app, Method::GET, &format!("/v1/jobs/{}", job_id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn signed_in_views_are_deduplicated_per_viewer() {
    let Some((app, pool)) = database_app().await else {
        return;
    };

    let (_, institute_token) = signup_institute(&app).await;
    let job = create_job(&app, &institute_token).await;
    let job_id = job["id"].as_str().unwrap();
    let (_, user_token) = signup_user(&app).await;

    for _ in 0..3 {
        let (status, _) = send(
            &app,
            Method::GET,
            &format!("/v1/jobs/{}", job_id),
            Some(&user_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) = send(&app, Method::GET, &format!("/v1/jobs/{}", job_id), None, None).await;
    assert_eq!(status, StatusCode::OK);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM job_views WHERE job_id = $1::uuid")
        .bind(job_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 2);

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/v1/jobs/{}/stats", job_id),
        Some(&institute_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows_after_stats: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM job_views WHERE job_id = $1::uuid")
            .bind(job_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(rows_after_stats, 2);

    let missing = Uuid::new_v4();
    let (status, _) = send(&app, Method::GET, &format!("/v1/jobs/{}", missing), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let ghost_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM job_views WHERE job_id = $1")
        .bind(missing)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(ghost_rows, 0);
}

#[tokio::test]
async fn every_private_resource_separates_foreign_from_missing() {
    let Some((app, _pool)) = database_app().await else {
        return;
    };

    let (owner_user, owner_user_token) = signup_user(&app).await;
    let (_, other_user_token) = signup_user(&app).await;
    let (owner_institute, owner_institute_token) = signup_institute(&app).await;
    let (_, other_institute_token) = signup_institute(&app).await;
    let job = create_job(&app, &owner_institute_token).await;

    let (status, application) = send(
        &app,
        Method::POST,
        "/v1/applications",
        Some(&owner_user_token),
        Some(json!({ "jobId": job["id"], "resumeUrl": "https://cdn.example/cv.pdf" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{application}");

    let user_id = owner_user["id"].as_str().unwrap();
    let institute_id = owner_institute["id"].as_str().unwrap();
    let application_id = application["id"].as_str().unwrap();
    let job_id = job["id"].as_str().unwrap();

    let headline = Some(json!({ "headline": "Taken over" }));
    for method in [Method::PUT, Method::DELETE] {
        let body = if method == Method::PUT { headline.clone() } else { None };
        assert_foreign_then_missing(
            &app,
            method.clone(),
            "/v1/users",
            user_id,
            &other_user_token,
            body.clone(),
        )
        .await;
        assert_foreign_then_missing(
            &app,
            method.clone(),
            "/v1/institutes",
            institute_id,
            &other_institute_token,
            body.clone(),
        )
        .await;
        assert_foreign_then_missing(
            &app,
            method.clone(),
            "/v1/applications",
            application_id,
            &other_user_token,
            if method == Method::PUT {
                Some(json!({ "coverLetter": "Not mine" }))
            } else {
                None
            },
        )
        .await;
        assert_foreign_then_missing(
            &app,
            method.clone(),
            "/v1/jobs",
            job_id,
            &other_institute_token,
            if method == Method::PUT {
                Some(json!({ "title": "Not mine" }))
            } else {
                None
            },
        )
        .await;
    }

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/v1/applications/{}", application_id),
        Some(&owner_user_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, JsonValue::Null);
    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/v1/applications/{}", application_id),
        Some(&owner_user_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn specialty_updates_replace_links_and_drive_filters() {
    let Some((app, _pool)) = database_app().await else {
        return;
    };

    let first = unique("first");
    let second = unique("second");
    let third = unique("third");

    let (user, user_token) = signup_user(&app).await;
    let user_id = user["id"].as_str().unwrap();
    let users_uri = |names: &str| format!("/v1/users?specialties={}", names);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/v1/users/{}", user_id),
        Some(&user_token),
        Some(json!({ "specialties": [first.to_uppercase(), second.clone()] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    let mut expected = vec![first.clone(), second.clone()];
    expected.sort();
    assert_eq!(specialty_names(&updated), expected);
    assert_eq!(updated["name"], "Asha Rao");

    let (status, page) = send(&app, Method::GET, &users_uri(&first), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["id"], user["id"]);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/v1/users/{}", user_id),
        Some(&user_token),
        Some(json!({ "specialties": [third.clone()] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(specialty_names(&updated), vec![third.clone()]);

    let (_, page) = send(&app, Method::GET, &users_uri(&first), None, None).await;
    assert_eq!(page["total"], 0);
    assert_eq!(page["items"], json!([]));
    let either = users_uri(&format!("{},{}", first, third));
    let (_, page) = send(&app, Method::GET, &either, None, None).await;
    assert_eq!(page["total"], 1);

    let (_, institute_token) = signup_institute(&app).await;
    let town = unique("Town");
    create_job_with(&app, &institute_token, &town, &[&first]).await;
    create_job_with(&app, &institute_token, &town, &[&second]).await;
    create_job_with(&app, &institute_token, &town, &[&third]).await;

    let (status, page) = send(
        &app,
        Method::GET,
        &format!("/v1/jobs?specialties={},{}&pageSize=1", first, second),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{page}");
    assert_eq!(page["total"], 2);
    assert_eq!(page["pageSize"], 1);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);

    let (_, page) = send(
        &app,
        Method::GET,
        &format!("/v1/jobs?location={}", town.to_uppercase()),
        None,
        None,
    )
    .await;
    assert_eq!(page["total"], 3);

    let (_, page) = send(
        &app,
        Method::GET,
        &format!("/v1/jobs?location={}", &town[..town.len() - 4]),
        None,
        None,
    )
    .await;
    assert_eq!(page["total"], 0);

    let (_, page) = send(
        &app,
        Method::GET,
        &format!("/v1/jobs/search?location={}&specialtyId={}", town, Uuid::new_v4()),
        None,
        None,
    )
    .await;
    assert_eq!(page["total"], 0);

    let (_, page) = send(
        &app,
        Method::GET,
        &format!("/v1/jobs?location={}&page=9223372036854775807", town),
        None,
        None,
    )
    .await;
    assert_eq!(page["total"], 3);
    assert_eq!(page["items"], json!([]));
}

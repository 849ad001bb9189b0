use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    Router,
};
use http::{header, Method, Request, StatusCode};
use job_board_backend::{
    config::RecruiterDeletePolicy, repository::Repositories, routes, storage::LocalFileStorage,
    utils::crypto::Argon2Credentials, AppState,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

fn app() -> Router {
    let uploads = std::env::temp_dir().join(format!("job-board-api-{}", uuid::Uuid::new_v4()));
    let state = AppState::new(
        Repositories::in_memory(),
        Arc::new(LocalFileStorage::new(uploads)),
        Arc::new(Argon2Credentials),
        RecruiterDeletePolicy::Cascade,
    );
    routes::router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let res = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn signup(app: &Router, kind: &str, name: &str, email: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        &format!("/api/{}/signup", kind),
        Some(json!({ "name": name, "email": email, "password": "secret-pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert!(body.get("password_hash").is_none());
    body["id"].as_i64().unwrap()
}

async fn post_job(app: &Router, recruiter_id: i64, title: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/jobs",
        Some(json!({
            "recruiter_id": recruiter_id,
            "title": title,
            "company": "Acme",
            "location": "Lisbon",
            "job_type": "Full-time",
            "experience_level": "Senior"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn apply_accept_then_force_delete() {
    let app = app();
    let recruiter_id = signup(&app, "recruiters", "Rita", "rita@example.com").await;
    let seeker_id = signup(&app, "seekers", "Sam", "sam@example.com").await;
    let job_id = post_job(&app, recruiter_id, "Rust Engineer").await;

    let (status, application) = send(
        &app,
        Method::POST,
        "/api/applications",
        Some(json!({
            "job_id": job_id,
            "seeker_id": seeker_id,
            "resume_url": "/uploads/resumes/abc.pdf"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", application);
    assert_eq!(application["status"], "PENDING");
    assert_eq!(application["job"]["id"], job_id);
    assert_eq!(application["seeker"]["email"], "sam@example.com");
    let application_id = application["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/applications",
        Some(json!({ "job_id": job_id, "seeker_id": seeker_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/applications/{}/status", application_id),
        Some(json!({ "status": "accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "ACCEPTED");

    let (_, check) = send(
        &app,
        Method::GET,
        &format!("/api/applications/check/{}/{}", job_id, seeker_id),
        None,
    )
    .await;
    assert_eq!(check["has_applied"], true);

    let (_, count) = send(
        &app,
        Method::GET,
        &format!("/api/applications/recruiter/{}/count?status=ACCEPTED", recruiter_id),
        None,
    )
    .await;
    assert_eq!(count["count"], 1);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/saved-jobs",
        Some(json!({ "job_id": job_id, "seeker_id": seeker_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/jobs/{}", job_id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, summary) = send(
        &app,
        Method::DELETE,
        &format!("/api/jobs/{}/force", job_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["applications_removed"], 1);
    assert_eq!(summary["saved_jobs_removed"], 1);

    let (status, body) = send(&app, Method::GET, &format!("/api/jobs/{}", job_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().is_some());

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/applications/{}", application_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, count) = send(
        &app,
        Method::GET,
        &format!("/api/saved-jobs/seeker/{}/count", seeker_id),
        None,
    )
    .await;
    assert_eq!(count["count"], 0);
}

#[tokio::test]
async fn save_two_jobs_then_bulk_unsave() {
    let app = app();
    let recruiter_id = signup(&app, "recruiters", "Rita", "rita@example.com").await;
    let seeker_id = signup(&app, "seekers", "Sam", "sam@example.com").await;
    let first = post_job(&app, recruiter_id, "Backend").await;
    let second = post_job(&app, recruiter_id, "Frontend").await;

    for job_id in [first, second] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/saved-jobs",
            Some(json!({ "job_id": job_id, "seeker_id": seeker_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/saved-jobs",
        Some(json!({ "job_id": first, "seeker_id": seeker_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Job already saved");

    let (_, listed) = send(
        &app,
        Method::GET,
        &format!("/api/saved-jobs/seeker/{}", seeker_id),
        None,
    )
    .await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["job_title"], "Frontend");

    let (_, count) = send(
        &app,
        Method::GET,
        &format!("/api/saved-jobs/seeker/{}/count", seeker_id),
        None,
    )
    .await;
    assert_eq!(count["count"], 2);

    let (status, removed) = send(
        &app,
        Method::DELETE,
        &format!("/api/saved-jobs/seeker/{}", seeker_id),
        Some(json!([first, second, 999])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["removed"], 2);

    let (_, count) = send(
        &app,
        Method::GET,
        &format!("/api/saved-jobs/seeker/{}/count", seeker_id),
        None,
    )
    .await;
    assert_eq!(count["count"], 0);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/saved-jobs/job/{}/seeker/{}", first, seeker_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_paginates_newest_first() {
    let app = app();
    let recruiter_id = signup(&app, "recruiters", "Rita", "rita@example.com").await;
    for title in ["Rust Dev", "Go Dev", "Rust Lead"] {
        post_job(&app, recruiter_id, title).await;
    }

    let (status, page) = send(&app, Method::GET, "/api/jobs?search=rust&per_page=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 2);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["items"][0]["title"], "Rust Lead");

    let (_, all) = send(&app, Method::GET, "/api/jobs/all", None).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn accounts_and_profiles() {
    let app = app();
    let seeker_id = signup(&app, "seekers", "Sam", "sam@example.com").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/seekers/signup",
        Some(json!({ "name": "Other", "email": "SAM@example.com", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/seekers/signin",
        Some(json!({ "email": "sam@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, profile) = send(
        &app,
        Method::POST,
        "/api/profiles",
        Some(json!({ "seeker_id": seeker_id, "profile_headline": "Engineer", "skills": "rust" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", profile);
    assert_eq!(profile["profile_headline"], "Engineer");

    let (_, exists) = send(
        &app,
        Method::GET,
        &format!("/api/profiles/check/{}", seeker_id),
        None,
    )
    .await;
    assert_eq!(exists["exists"], true);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/profiles",
        Some(json!({ "seeker_id": seeker_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let recruiter_id = signup(&app, "recruiters", "Rita", "rita@example.com").await;
    let (status, company) = send(
        &app,
        Method::PUT,
        &format!("/api/recruiters/{}/profile", recruiter_id),
        Some(json!({ "company_name": "Acme", "website": "https://acme.test" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", company);
    assert_eq!(company["company_name"], "Acme");

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/recruiters/{}/profile", recruiter_id),
        Some(json!({ "website": "not a url" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/seekers/{}", seeker_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, exists) = send(
        &app,
        Method::GET,
        &format!("/api/profiles/check/{}", seeker_id),
        None,
    )
    .await;
    assert_eq!(exists["exists"], false);
}

fn multipart_body(boundary: &str, fields: &[(&str, &str)], file: (&str, &[u8])) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                boundary, name, value
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n",
            boundary, file.0
        )
        .as_bytes(),
    );
    body.extend_from_slice(file.1);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}

async fn send_multipart(app: &Router, uri: &str, body: Vec<u8>) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            "multipart/form-data; boundary=test-boundary",
        )
        .body(Body::from(body))
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn multipart_application_stores_resume() {
    let app = app();
    let recruiter_id = signup(&app, "recruiters", "Rita", "rita@example.com").await;
    let seeker_id = signup(&app, "seekers", "Sam", "sam@example.com").await;
    let job_id = post_job(&app, recruiter_id, "Rust Engineer").await;

    let job = job_id.to_string();
    let seeker = seeker_id.to_string();
    let body = multipart_body(
        "test-boundary",
        &[("job_id", job.as_str()), ("seeker_id", seeker.as_str()), ("cover_letter", "Hi")],
        ("cv.pdf", &b"%PDF-1.4 test"[..]),
    );
    let (status, view) = send_multipart(&app, "/api/applications/upload", body).await;
    assert_eq!(status, StatusCode::CREATED, "{}", view);
    assert_eq!(view["cover_letter"], "Hi");
    assert!(view["resume_url"]
        .as_str()
        .unwrap()
        .starts_with("/uploads/resumes/"));

    let body = multipart_body("test-boundary", &[], ("notes.exe", &b"MZ"[..]));
    let (status, _) = send_multipart(&app, "/api/applications/upload-resume", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body = multipart_body("test-boundary", &[("job_id", "abc")], ("cv.pdf", &b"%PDF"[..]));
    let (status, _) = send_multipart(&app, "/api/applications/upload", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

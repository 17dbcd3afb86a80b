mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use registrard::api::{self, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

fn app() -> (TempDir, Router) {
    let (dir, db) = common::bootstrapped_store();
    (dir, api::router(AppState::new(db)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        })
        .expect("build request");

    let response = app.clone().oneshot(request).await.expect("call router");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

#[tokio::test]
async fn health_reports_version() {
    let (_dir, app) = app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let (_dir, app) = app();
    let request = Request::builder()
        .uri("/students")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("call");
    let id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header");
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn student_create_fetch_and_list() {
    let (_dir, app) = app();

    let (status, body) = post(
        &app,
        "/students",
        json!({ "name": "Ada Lovelace", "email": "ada@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["student_id"].as_i64().expect("student_id");

    let (status, body) = get(&app, &format!("/students/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "student_id": id, "name": "Ada Lovelace", "email": "ada@example.com" })
    );

    let (status, body) = get(&app, "/students").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(|a| a.len()), Some(1));
}

#[tokio::test]
async fn unknown_student_is_404_with_errors_body() {
    let (_dir, app) = app();
    let (status, body) = get(&app, "/students/77").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "errors": ["Student not found"] }));
}

#[tokio::test]
async fn invalid_fields_are_all_reported() {
    let (_dir, app) = app();
    let (status, body) = post(&app, "/students", json!({ "name": "", "email": "nope" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "errors": [
            "name - must not be empty",
            "email - must be a valid email address"
        ] })
    );
}

#[tokio::test]
async fn malformed_path_id_is_a_validation_error() {
    let (_dir, app) = app();
    let (status, body) = get(&app, "/students/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["studentId - must be an integer >= 1"] }));
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let (_dir, app) = app();
    let payload = json!({ "name": "Grace", "email": "grace@example.edu" });
    let (status, _) = post(&app, "/professors", payload.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&app, "/professors", payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "errors": ["Professor email already exists"] }));
}

#[tokio::test]
async fn course_with_unknown_professor_is_rejected() {
    let (_dir, app) = app();
    let (status, body) = post(&app, "/courses", json!({ "name": "Racoons", "professor_id": 5 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "errors": ["Professor doesn't exist"] }));

    let (_, body) = get(&app, "/courses").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn full_enrollment_and_grading_flow() {
    let (_dir, app) = app();

    let (_, body) = post(&app, "/professors", json!({ "name": "Grace", "email": "grace@example.edu" })).await;
    let prof = body["professor_id"].as_i64().expect("professor_id");

    let (status, body) = post(&app, "/courses", json!({ "name": "Compilers", "professor_id": prof })).await;
    assert_eq!(status, StatusCode::OK);
    let course = body["course_id"].as_i64().expect("course_id");

    let (_, body) = get(&app, "/courses").await;
    assert_eq!(
        body,
        json!([{
            "course_id": course,
            "course_name": "Compilers",
            "professor_id": prof,
            "name": "Grace",
            "email": "grace@example.edu"
        }])
    );
    let (_, body) = get(&app, &format!("/professors/{prof}/courses")).await;
    assert_eq!(body.as_array().map(|a| a.len()), Some(1));

    let mut ids = Vec::new();
    for (name, email) in [("Ada", "ada@example.com"), ("Alan", "alan@example.com"), ("Barbara", "barbara@example.com")] {
        let (_, body) = post(&app, "/students", json!({ "name": name, "email": email })).await;
        let id = body["student_id"].as_i64().expect("student_id");
        let (status, body) = post(&app, &format!("/courses/{course}/enroll"), json!({ "student_id": id })).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["enrollment_id"].as_i64().is_some());
        ids.push(id);
    }

    let (status, body) = post(&app, &format!("/courses/{course}/enroll"), json!({ "student_id": ids[0] })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "errors": ["Student is already enrolled"] }));

    let (_, body) = get(&app, &format!("/courses/{course}/enrollments")).await;
    assert_eq!(body.as_array().map(|a| a.len()), Some(3));

    let (status, first) = post(&app, &format!("/courses/{course}/grade/{}", ids[0]), json!({ "grade": 70 })).await;
    assert_eq!(status, StatusCode::OK);
    let grade_id = first["grade_id"].as_i64().expect("grade_id");

    let (status, body) = post(&app, &format!("/courses/{course}/grade/{}", ids[0]), json!({ "grade": 80 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "updated": true }));

    for (id, grade) in ids[1..].iter().zip([90, 100]) {
        let (status, _) = post(&app, &format!("/courses/{course}/grade/{id}"), json!({ "grade": grade })).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = get(&app, &format!("/courses/{course}/grades")).await;
    let rows = body.as_array().expect("grades array");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["grade_id"], json!(grade_id));
    assert_eq!(rows[0]["grade"], json!(80.0));

    let (status, body) = get(&app, &format!("/courses/{course}/average")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "average": 90.0 }));
}

#[tokio::test]
async fn grading_requires_enrollment_and_valid_grade() {
    let (_dir, app) = app();
    let (_, body) = post(&app, "/professors", json!({ "name": "Grace", "email": "grace@example.edu" })).await;
    let prof = body["professor_id"].as_i64().expect("professor_id");
    let (_, body) = post(&app, "/courses", json!({ "name": "Compilers", "professor_id": prof })).await;
    let course = body["course_id"].as_i64().expect("course_id");
    let (_, body) = post(&app, "/students", json!({ "name": "Ada", "email": "ada@example.com" })).await;
    let student = body["student_id"].as_i64().expect("student_id");

    let (status, body) = post(&app, &format!("/courses/{course}/grade/{student}"), json!({ "grade": 50 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "errors": ["Student isn't enrolled in that Class"] }));

    let (status, body) = post(&app, "/courses/0/grade/x", json!({ "grade": 101 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "errors": [
            "courseId - must be an integer >= 1",
            "studentId - must be an integer >= 1",
            "grade - must be an integer between 0 and 100"
        ] })
    );
}

#[tokio::test]
async fn bad_grading_path_and_body_are_reported_together() {
    let (_dir, app) = app();
    let (status, body) = post(&app, "/courses/0/grade/x", json!([{ "grade": 50 }])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "errors": [
            "courseId - must be an integer >= 1",
            "studentId - must be an integer >= 1",
            "body - must be a JSON object"
        ] })
    );
}

#[tokio::test]
async fn non_string_fields_are_named_as_such() {
    let (_dir, app) = app();
    let (status, body) = post(&app, "/students", json!({ "name": 7, "email": true })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "errors": ["name - must be a string", "email - must be a string"] })
    );
}

#[tokio::test]
async fn average_without_grades_is_null() {
    let (_dir, app) = app();
    let (status, body) = get(&app, "/courses/3/average").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "average": null }));
}

#[tokio::test]
async fn unknown_route_uses_error_shape() {
    let (_dir, app) = app();
    let (status, body) = get(&app, "/departments").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "errors": ["route not found"] }));
}

use axum::body::Body;
use axum::http::Request;
use axum::routing::{get, post};
use axum::Router;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use super::handlers::{core, courses, enrollments, grades, professors, students};
use super::types::SharedState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tags every request with a fresh UUID unless the caller sent one.
#[derive(Clone, Copy, Default)]
struct RequestUuid;

impl MakeRequestId for RequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(core::handle_health))
        .route(
            "/students",
            get(students::handle_students_list).post(students::handle_students_create),
        )
        .route("/students/:student_id", get(students::handle_students_get))
        .route(
            "/professors",
            get(professors::handle_professors_list).post(professors::handle_professors_create),
        )
        .route(
            "/professors/:professor_id",
            get(professors::handle_professors_get),
        )
        .route(
            "/professors/:professor_id/courses",
            get(professors::handle_professor_courses),
        )
        .route(
            "/courses",
            get(courses::handle_courses_list).post(courses::handle_courses_create),
        )
        .route("/courses/:course_id", get(courses::handle_courses_get))
        .route("/courses/:course_id/enroll", post(enrollments::handle_enroll))
        .route(
            "/courses/:course_id/enrollments",
            get(enrollments::handle_enrollments_list),
        )
        .route(
            "/courses/:course_id/grade/:student_id",
            post(grades::handle_grade_upsert),
        )
        .route("/courses/:course_id/grades", get(grades::handle_grades_list))
        .route(
            "/courses/:course_id/average",
            get(grades::handle_course_average),
        )
        .fallback(core::handle_not_found)
        .with_state(state)
        // Outermost layer runs first: assign the id, then open the span.
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(SetRequestIdLayer::x_request_id(RequestUuid))
}

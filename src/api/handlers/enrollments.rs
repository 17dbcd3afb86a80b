use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::api::error::ApiResult;
use crate::api::helpers::{parse_body, parse_path_id, Fields};
use crate::api::types::SharedState;
use crate::models::Student;
use crate::registry::enrollments;

pub async fn handle_enroll(
    State(state): State<SharedState>,
    Path(course_id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let course_id = parse_path_id("courseId", &course_id)?;
    let params = parse_body(&body)?;
    let mut fields = Fields::new(&params);
    let student_id = fields.id("student_id");
    fields.finish()?;

    let enrollment_id = state
        .run(move |db| enrollments::enroll(db, course_id, student_id))
        .await?;
    Ok(Json(json!({ "enrollment_id": enrollment_id })))
}

pub async fn handle_enrollments_list(
    State(state): State<SharedState>,
    Path(course_id): Path<String>,
) -> ApiResult<Json<Vec<Student>>> {
    let course_id = parse_path_id("courseId", &course_id)?;
    let rows = state
        .run(move |db| enrollments::students(db, course_id))
        .await?;
    Ok(Json(rows))
}

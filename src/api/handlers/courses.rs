use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::api::error::ApiResult;
use crate::api::helpers::{parse_body, parse_path_id, Fields};
use crate::api::types::SharedState;
use crate::models::{Course, CourseWithProfessor};
use crate::registry::courses;

pub async fn handle_courses_list(
    State(state): State<SharedState>,
) -> ApiResult<Json<Vec<CourseWithProfessor>>> {
    let rows = state.run(courses::list).await?;
    Ok(Json(rows))
}

pub async fn handle_courses_get(
    State(state): State<SharedState>,
    Path(course_id): Path<String>,
) -> ApiResult<Json<Course>> {
    let course_id = parse_path_id("courseId", &course_id)?;
    let course = state.run(move |db| courses::get(db, course_id)).await?;
    Ok(Json(course))
}

pub async fn handle_courses_create(
    State(state): State<SharedState>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let params = parse_body(&body)?;
    let mut fields = Fields::new(&params);
    let name = fields.text("name");
    let professor_id = fields.id("professor_id");
    fields.finish()?;

    let course_id = state
        .run(move |db| courses::create(db, &name, professor_id))
        .await?;
    Ok(Json(json!({ "course_id": course_id })))
}

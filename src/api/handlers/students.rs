use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::api::error::ApiResult;
use crate::api::helpers::{parse_body, parse_path_id, Fields};
use crate::api::types::SharedState;
use crate::models::Student;
use crate::registry::students;

pub async fn handle_students_list(State(state): State<SharedState>) -> ApiResult<Json<Vec<Student>>> {
    let rows = state.run(students::list).await?;
    Ok(Json(rows))
}

pub async fn handle_students_get(
    State(state): State<SharedState>,
    Path(student_id): Path<String>,
) -> ApiResult<Json<Student>> {
    let student_id = parse_path_id("studentId", &student_id)?;
    let student = state.run(move |db| students::get(db, student_id)).await?;
    Ok(Json(student))
}

pub async fn handle_students_create(
    State(state): State<SharedState>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let params = parse_body(&body)?;
    let mut fields = Fields::new(&params);
    let name = fields.text("name");
    let email = fields.email("email");
    fields.finish()?;

    let student_id = state
        .run(move |db| students::create(db, &name, &email))
        .await?;
    Ok(Json(json!({ "student_id": student_id })))
}

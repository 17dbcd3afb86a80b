use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::api::error::ApiResult;
use crate::api::helpers::{parse_body, parse_path_id, Fields};
use crate::api::types::SharedState;
use crate::models::{Course, Professor};
use crate::registry::professors;

pub async fn handle_professors_list(
    State(state): State<SharedState>,
) -> ApiResult<Json<Vec<Professor>>> {
    let rows = state.run(professors::list).await?;
    Ok(Json(rows))
}

pub async fn handle_professors_get(
    State(state): State<SharedState>,
    Path(professor_id): Path<String>,
) -> ApiResult<Json<Professor>> {
    let professor_id = parse_path_id("professorId", &professor_id)?;
    let professor = state.run(move |db| professors::get(db, professor_id)).await?;
    Ok(Json(professor))
}

pub async fn handle_professor_courses(
    State(state): State<SharedState>,
    Path(professor_id): Path<String>,
) -> ApiResult<Json<Vec<Course>>> {
    let professor_id = parse_path_id("professorId", &professor_id)?;
    let rows = state
        .run(move |db| professors::courses(db, professor_id))
        .await?;
    Ok(Json(rows))
}

pub async fn handle_professors_create(
    State(state): State<SharedState>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let params = parse_body(&body)?;
    let mut fields = Fields::new(&params);
    let name = fields.text("name");
    let email = fields.email("email");
    fields.finish()?;

    let professor_id = state
        .run(move |db| professors::create(db, &name, &email))
        .await?;
    Ok(Json(json!({ "professor_id": professor_id })))
}

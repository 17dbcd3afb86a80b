use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::{ApiError, ApiResult};
use crate::api::helpers::{parse_body, parse_path_id, Fields};
use crate::api::types::SharedState;
use crate::models::{CourseAverage, StudentGrade};
use crate::registry::grades::{self, GradeOutcome};

pub async fn handle_grade_upsert(
    State(state): State<SharedState>,
    Path((course_id, student_id)): Path<(String, String)>,
    body: Bytes,
) -> ApiResult<Json<GradeOutcome>> {
    let mut errors = Vec::new();
    let course_id = parse_path_id("courseId", &course_id)
        .map_err(|e| collect(&mut errors, e))
        .unwrap_or(0);
    let student_id = parse_path_id("studentId", &student_id)
        .map_err(|e| collect(&mut errors, e))
        .unwrap_or(0);
    let grade = match parse_body(&body) {
        Ok(params) => {
            let mut fields = Fields::new(&params);
            let grade = fields.int_in("grade", 0, 100);
            if let Err(e) = fields.finish() {
                collect(&mut errors, e);
            }
            grade
        }
        Err(e) => {
            collect(&mut errors, e);
            0
        }
    };
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let outcome = state
        .run(move |db| grades::upsert(db, course_id, student_id, grade))
        .await?;
    Ok(Json(outcome))
}

fn collect(errors: &mut Vec<String>, e: ApiError) {
    match e {
        ApiError::Validation(mut more) => errors.append(&mut more),
        other => errors.push(other.to_string()),
    }
}

pub async fn handle_grades_list(
    State(state): State<SharedState>,
    Path(course_id): Path<String>,
) -> ApiResult<Json<Vec<StudentGrade>>> {
    let course_id = parse_path_id("courseId", &course_id)?;
    let rows = state.run(move |db| grades::list(db, course_id)).await?;
    Ok(Json(rows))
}

pub async fn handle_course_average(
    State(state): State<SharedState>,
    Path(course_id): Path<String>,
) -> ApiResult<Json<CourseAverage>> {
    let course_id = parse_path_id("courseId", &course_id)?;
    let average = state.run(move |db| grades::average(db, course_id)).await?;
    Ok(Json(average))
}

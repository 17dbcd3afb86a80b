use axum::Json;
use serde_json::{json, Value};

use crate::api::error::ApiError;

pub async fn handle_health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn handle_not_found() -> ApiError {
    ApiError::RouteNotFound
}

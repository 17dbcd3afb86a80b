use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::registry::RegistryError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Field-level messages, detected before touching the store.
    #[error("invalid request: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The blocking worker running the operation panicked or was cancelled.
    #[error("worker failed: {0}")]
    Worker(String),

    #[error("route not found")]
    RouteNotFound,
}

/// Every error body has this shape.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub errors: Vec<String>,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(vec![message.into()])
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Registry(e) => match e {
                RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
                RegistryError::Conflict(_) => StatusCode::CONFLICT,
                RegistryError::UnknownReference(_) | RegistryError::NotEnrolled => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                RegistryError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn messages(self) -> Vec<String> {
        match self {
            ApiError::Validation(errors) => errors,
            other => vec![other.to_string()],
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        let body = ErrorBody {
            errors: self.messages(),
        };
        (status, Json(body)).into_response()
    }
}

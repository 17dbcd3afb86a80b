mod error;
mod handlers;
mod helpers;
mod router;
mod types;

pub use error::{ApiError, ApiResult, ErrorBody};
pub use router::router;
pub use types::{AppState, SharedState};

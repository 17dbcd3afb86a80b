use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::db::Database;
use crate::registry::RegistryResult;

/// State shared by every handler. Holds no entity data; the store is the only
/// source of truth.
pub struct AppState {
    pub db: Database,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(db: Database) -> SharedState {
        Arc::new(Self { db })
    }

    /// Run a registry operation on the blocking pool and wait for it.
    pub async fn run<T, F>(&self, op: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> RegistryResult<T> + Send + 'static,
    {
        let db = self.db.clone();
        let result = tokio::task::spawn_blocking(move || op(&db))
            .await
            .map_err(|e| ApiError::Worker(e.to_string()))?;
        Ok(result?)
    }
}

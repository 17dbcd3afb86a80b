use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::api::{self, AppState};
use crate::config::Config;
use crate::db::Database;
use crate::schema;

/// Bootstrap the schema, then serve until ctrl-c.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let db = Database::new(&config.database);
    tracing::info!(path = %db.path().display(), "using store");

    let bootstrap_db = db.clone();
    let report = tokio::task::spawn_blocking(move || schema::bootstrap(&bootstrap_db)).await?;
    for (table, message) in report.failures() {
        tracing::warn!(table = table.name(), error = message, "table unavailable after bootstrap");
    }

    let addr: SocketAddr = config
        .socket_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid listen address {}: {}", config.socket_addr(), e))?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server is running at http://{}", listener.local_addr()?);

    let app = api::router(AppState::new(db));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

use std::{net::SocketAddr, path::Path};

use axum::Router;
use common::utils::logging::init_logging;
use configs::{AppConfig, ServerConfig};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::storage::MovieStore;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Resolve host/port from the server section
fn load_bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}:{}: {e}", server.host, server.port)))
}

/// Open the configured store: file-backed when `storage.data_file` is set,
/// in-memory otherwise.
pub async fn open_store(cfg: &AppConfig) -> anyhow::Result<std::sync::Arc<MovieStore>> {
    let data_file = cfg.storage.data_file.as_deref().map(Path::new);
    common::env::ensure_env(data_file).await?;
    let store = match data_file {
        Some(path) => MovieStore::open(path).await?,
        None => MovieStore::in_memory(),
    };
    Ok(store)
}

/// Public entry: build the app and run the HTTP server until Ctrl-C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    init_logging(&cfg.logging.format);

    let store = open_store(&cfg).await?;
    let state = ServerState::new(store);

    // Build router
    let app: Router = routes::build_router(state, build_cors());

    // Bind and serve
    let addr = load_bind_addr(&cfg.server)?;
    info!(%addr, "starting movies server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("movies server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

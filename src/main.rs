mod config;
mod db;
mod extraction;
mod server;
mod types;

use std::sync::Arc;

use tracing::{error, info};

use crate::config::AppConfig;
use crate::db::IngestDbManager;
use crate::extraction::{GeminiClient, GeminiConfig};
use crate::types::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;

    let mut gemini_config = GeminiConfig::default();
    if let Some(model) = &config.gemini_model {
        gemini_config.model = model.clone();
    }
    if let Some(timeout) = config.extraction_timeout {
        gemini_config.request_timeout = timeout;
    }

    let extractor = GeminiClient::with_config(gemini_config, config.gemini_api_key.clone())?;
    let ingest_db = IngestDbManager::open(&config.db_path)?;

    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState {
        extractor,
        ingest_db,
    });

    let router = server::create_router(state);

    info!("Server listening at http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install ctrl-c handler: {e}");
        return;
    }
    info!("Shutdown signal received, stopping server");
}

use std::path::PathBuf;
use std::sync::Arc;

use beautybook::services::sessions::{SessionExpiryConfig, spawn_session_sweeper};
use beautybook::{llm, routes, state};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },
    #[error("server failed: {0}")]
    Serve(std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // A missing .env is the normal production case.
    let _ = dotenvy::dotenv();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .init();

    let port: u16 = match std::env::var("PORT") {
        Ok(raw) => raw.parse().map_err(|_| StartupError::InvalidPort(raw))?,
        Err(_) => 3000,
    };
    let site_dir = PathBuf::from(std::env::var("SITE_DIR").unwrap_or_else(|_| "site".into()));

    // Non-fatal: without an LLM every chat reply is the localized fallback.
    let llm: Option<Arc<dyn llm::LlmComplete>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), provider = ?client.provider(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured, chat will answer with fallback text");
            None
        }
    };

    let state = state::AppState::new(llm, site_dir);
    let _sweeper = spawn_session_sweeper(state.clone(), SessionExpiryConfig::from_env());
    let app = routes::app(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;

    tracing::info!(%port, "beautybook listening");
    axum::serve(listener, app)
        .await
        .map_err(StartupError::Serve)
}

//! drift-api - Emotional Drift Monitoring service
//!
//! Users submit short journal entries; each entry is scored into six
//! emotion categories (hosted inference with a local keyword fallback)
//! and persisted for timeline and distribution analytics.

use anyhow::Result;
use drift_api::auth::JwtKeys;
use drift_api::services::{EmotionAnalyzer, RemoteClassifier};
use drift_api::AppState;
use drift_common::config::ServerConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (RUST_LOG overrides, default info)
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting drift-api (Emotional Drift Monitoring)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::resolve()?;

    info!("Database: {}", config.database_path.display());
    let db_pool = drift_api::db::init_database_pool(&config.database_path).await?;
    info!("Database connection established");

    let remote = match &config.huggingface_api_key {
        Some(key) => {
            info!("Hosted inference enabled");
            Some(RemoteClassifier::new(key.clone()))
        }
        None => {
            warn!("No Hugging Face API key configured; running keyword-only classification");
            None
        }
    };
    let analyzer = EmotionAnalyzer::new(remote);
    let jwt = JwtKeys::new(&config.jwt_secret);

    let state = AppState::new(db_pool, analyzer, jwt);
    let app = drift_api::build_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Listening on http://{}:{}", config.host, config.port);

    axum::serve(listener, app).await?;

    Ok(())
}

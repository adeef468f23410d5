//! drift-api library interface
//!
//! Exposes the router, application state, and service modules for
//! integration testing.

pub mod api;
pub mod auth;
pub mod db;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use crate::auth::JwtKeys;
use crate::services::EmotionAnalyzer;
use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Emotion analysis pipeline
    pub analyzer: Arc<EmotionAnalyzer>,
    /// Access token signing and verification keys
    pub jwt: Arc<JwtKeys>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, analyzer: EmotionAnalyzer, jwt: JwtKeys) -> Self {
        Self {
            db,
            analyzer: Arc::new(analyzer),
            jwt: Arc::new(jwt),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// CORS is permissive: the browser frontend is served from another
/// origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::auth_routes())
        .merge(api::entry_routes())
        .merge(api::analytics_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

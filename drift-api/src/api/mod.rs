//! HTTP API handlers for drift-api

pub mod analytics;
pub mod auth;
pub mod entries;
pub mod health;

pub use analytics::analytics_routes;
pub use auth::auth_routes;
pub use entries::entry_routes;
pub use health::health_routes;

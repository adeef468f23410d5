//! Configuration loading and resolution
//!
//! Priority order per key: environment variable, then TOML config file,
//! then compiled default. Resolution happens once at startup and produces
//! an explicit `ServerConfig` that gets injected into constructors -- no
//! component reads ambient environment state after boot.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

/// Placeholder secret for local development. Deployments must override it.
const DEV_JWT_SECRET: &str = "drift-dev-secret-change-in-production";

/// On-disk TOML configuration. Every key is optional; missing keys fall
/// through to environment variables and compiled defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<String>,
    pub jwt_secret: Option<String>,
    pub huggingface_api_key: Option<String>,
}

impl TomlConfig {
    /// Load and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }
}

/// Fully resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// SQLite database file
    pub database_path: PathBuf,
    /// HS256 signing secret for access tokens
    pub jwt_secret: String,
    /// Hosted inference credential. When absent the service runs in
    /// keyword-only classification mode.
    pub huggingface_api_key: Option<String>,
}

impl ServerConfig {
    /// Resolve configuration from environment and TOML file
    ///
    /// The config file location itself can be overridden with
    /// `DRIFT_CONFIG`; otherwise `~/.config/drift/config.toml` is used
    /// when present.
    pub fn resolve() -> Result<Self> {
        let toml_config = match config_file_path() {
            Some(path) if path.exists() => {
                info!("Loading config file: {}", path.display());
                TomlConfig::load(&path)?
            }
            _ => TomlConfig::default(),
        };
        Self::resolve_from(&toml_config)
    }

    /// Resolve configuration against an already-loaded TOML config
    pub fn resolve_from(toml_config: &TomlConfig) -> Result<Self> {
        let host = env_var("DRIFT_HOST")
            .or_else(|| toml_config.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match env_var("DRIFT_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("Invalid DRIFT_PORT: {}", raw)))?,
            None => toml_config.port.unwrap_or(DEFAULT_PORT),
        };

        let database_path = env_var("DRIFT_DATABASE_PATH")
            .or_else(|| toml_config.database_path.clone())
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        let jwt_secret = match env_var("DRIFT_JWT_SECRET")
            .or_else(|| toml_config.jwt_secret.clone())
        {
            Some(secret) => secret,
            None => {
                warn!("No JWT secret configured; using the development default");
                DEV_JWT_SECRET.to_string()
            }
        };

        let env_key = env_var("DRIFT_HUGGINGFACE_API_KEY");
        if env_key.is_some() && toml_config.huggingface_api_key.is_some() {
            warn!(
                "Hugging Face API key set in both environment and TOML; \
                 using environment (highest priority)"
            );
        }
        let huggingface_api_key = env_key.or_else(|| toml_config.huggingface_api_key.clone());

        Ok(Self {
            host,
            port,
            database_path,
            jwt_secret,
            huggingface_api_key,
        })
    }
}

/// Non-empty environment variable, if set
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Config file path: `DRIFT_CONFIG` override, else `~/.config/drift/config.toml`
fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = env_var("DRIFT_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("drift").join("config.toml"))
}

/// Default database location: `<local data dir>/drift/drift.db`
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("drift").join("drift.db"))
        .unwrap_or_else(|| PathBuf::from("drift.db"))
}

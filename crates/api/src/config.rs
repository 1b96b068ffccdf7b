use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Default location of the JSON layout file when no database is configured.
pub const DEFAULT_LAYOUT_STORE_PATH: &str = "./data/dashboard-layouts.json";

/// Server configuration loaded from environment variables.
///
/// Defaults suit local development; production overrides via environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Upper bound on draining background services after the server stops.
    pub shutdown_timeout_secs: u64,
    /// Postgres URL. When set, layouts are stored in the database.
    pub database_url: Option<String>,
    /// JSON file used for layouts when `database_url` is unset.
    pub layout_store_path: PathBuf,
    /// Shared secret for service-to-service notification ingest. Ingest is
    /// disabled when unset.
    pub ingest_token: Option<String>,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                          |
    /// |-------------------------|----------------------------------|
    /// | `HOST`                  | `0.0.0.0`                        |
    /// | `PORT`                  | `3000`                           |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                             |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                             |
    /// | `DATABASE_URL`          | unset (file storage)             |
    /// | `LAYOUT_STORE_PATH`     | `./data/dashboard-layouts.json`  |
    /// | `INGEST_TOKEN`          | unset (ingest disabled)          |
    ///
    /// JWT settings are read by [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let database_url = non_empty_var("DATABASE_URL");

        let layout_store_path = non_empty_var("LAYOUT_STORE_PATH")
            .unwrap_or_else(|| DEFAULT_LAYOUT_STORE_PATH.into())
            .into();

        let ingest_token = non_empty_var("INGEST_TOKEN");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            database_url,
            layout_store_path,
            ingest_token,
            jwt,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

//! Server configuration
//!
//! All settings can be overridden through environment variables:
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | WORK_DIR | /var/lib/market/server | working directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | OPTIMIZER_URL | (unset) | external route optimizer endpoint |
//! | OPTIMIZER_TIMEOUT_MS | 10000 | bounded optimizer round-trip |
//! | DEFAULT_SEARCH_RADIUS_KM | 30 | radius when a search omits max_km |
//! | REQUEST_TIMEOUT_MS | 30000 | HTTP request timeout |
//! | ENVIRONMENT | development | development / staging / production |

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// External route optimizer endpoint; `None` disables the optimizer
    /// and every planning request takes the fallback path
    pub optimizer_url: Option<String>,
    /// Upper bound on one optimizer round-trip, in milliseconds
    pub optimizer_timeout_ms: u64,
    /// Search radius applied when a query omits `max_km`
    pub default_search_radius_km: f64,
    /// HTTP request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/market/server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            optimizer_url: std::env::var("OPTIMIZER_URL").ok().filter(|s| !s.is_empty()),
            optimizer_timeout_ms: std::env::var("OPTIMIZER_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10_000),
            default_search_radius_km: std::env::var("DEFAULT_SEARCH_RADIUS_KM")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30.0),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30_000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override the settings tests care about
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Directory holding the embedded database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

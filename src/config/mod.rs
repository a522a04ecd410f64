//! Configuration management module.
//!
//! Supports loading configuration from:
//! - A `.env` file in the working directory
//! - TOML files (config/default.toml, config/{profile}.toml)
//! - Environment variables with `SUBJECTS_API__<SECTION>__<KEY>` pattern

mod server;
mod storage;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::api::router::{HEALTH_PATHS, RESOURCE_PATHS};

pub use server::ServerConfig;
pub use storage::{FileStorageConfig, StorageBackend, StorageConfig};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `config/default.toml`
    /// 2. `config/{SUBJECTS_API_PROFILE}.toml` (if `SUBJECTS_API_PROFILE` is set)
    /// 3. Environment variables with `SUBJECTS_API__` prefix
    ///
    /// Variables from a `.env` file are loaded into the environment first.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is fine
        dotenvy::dotenv().ok();

        let profile =
            std::env::var("SUBJECTS_API_PROFILE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{profile}")).required(false))
            // SUBJECTS_API__SERVER__PORT=8080 -> server.port = 8080
            .add_source(
                Environment::with_prefix("SUBJECTS_API")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("server.port cannot be 0".to_string()));
        }

        let prefix = &self.server.api_prefix;
        if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
            return Err(ConfigError::Message(format!(
                "server.api_prefix must start with '/' and not end with '/': {prefix:?}"
            )));
        }

        let metrics_path = &self.observability.metrics_path;
        if !metrics_path.starts_with('/') {
            return Err(ConfigError::Message(
                "observability.metrics_path must start with '/'".to_string(),
            ));
        }

        if metrics_path.contains(['{', '}']) {
            return Err(ConfigError::Message(format!(
                "observability.metrics_path must be a static path: {metrics_path:?}"
            )));
        }

        let taken = HEALTH_PATHS
            .iter()
            .map(|path| (*path).to_string())
            .chain(RESOURCE_PATHS.iter().map(|path| format!("{prefix}{path}")))
            .any(|path| path == *metrics_path);
        if taken {
            return Err(ConfigError::Message(format!(
                "observability.metrics_path collides with an existing route: {metrics_path:?}"
            )));
        }

        if !matches!(self.observability.log_format.as_str(), "text" | "json") {
            return Err(ConfigError::Message(format!(
                "observability.log_format must be \"text\" or \"json\": {:?}",
                self.observability.log_format
            )));
        }

        Ok(())
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "text" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Enable Prometheus metrics endpoint.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,

    /// Metrics endpoint path.
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

const fn default_metrics_enabled() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            metrics_enabled: default_metrics_enabled(),
            metrics_path: default_metrics_path(),
        }
    }
}

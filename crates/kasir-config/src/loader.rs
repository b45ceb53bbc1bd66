//! Configuration loader with layered sources.

use crate::{AppConfig, CacheBackend};
use config::{Config, ConfigError, Environment, File};
use kasir_core::KasirError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `KASIR__` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, KasirError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, KasirError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), KasirError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, KasirError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment = std::env::var("KASIR_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{config_dir}/{name}.toml");
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("KASIR")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_kasir_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_kasir_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Gets a specific configuration value by key path.
    pub async fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let config = self.config.read().await;
        let json = serde_json::to_value(&*config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

/// Rejects configurations the service cannot run with.
pub fn validate_config(config: &AppConfig) -> Result<(), KasirError> {
    if config.database.url.trim().is_empty() {
        return Err(KasirError::Configuration("Database URL is required".to_string()));
    }
    url::Url::parse(&config.database.url)
        .map_err(|e| KasirError::Configuration(format!("Invalid database URL: {e}")))?;

    if config.database.query_timeout_secs == 0 {
        return Err(KasirError::Configuration(
            "database.query_timeout_secs must be greater than zero".to_string(),
        ));
    }

    if config.database.max_connections == 0 {
        return Err(KasirError::Configuration(
            "database.max_connections must be greater than zero".to_string(),
        ));
    }

    if config.redis.backend == CacheBackend::Redis {
        url::Url::parse(&config.redis.url)
            .map_err(|e| KasirError::Configuration(format!("Invalid Redis URL: {e}")))?;
    }

    if config.redis.ttl_secs == 0 {
        return Err(KasirError::Configuration(
            "redis.ttl_secs must be greater than zero".to_string(),
        ));
    }

    if config.redis.timeout_secs == 0 {
        return Err(KasirError::Configuration(
            "redis.timeout_secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn config_error_to_kasir_error(err: ConfigError) -> KasirError {
    KasirError::Configuration(err.to_string())
}

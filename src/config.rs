//! Runtime configuration.
//!
//! Loaded from a TOML file, with `DASHBOARD_API_URL` overriding the API base
//! URL. Every section has defaults pointing at the public demo API, so an empty
//! file is a valid configuration.
//!
//! ```toml
//! [api]
//! base_url = "https://dummyjson.com"
//! timeout_secs = 10
//!
//! [ids]
//! product_remote_max = 30
//! cart_local_min = 100
//! cart_placeholder_id = 51
//!
//! [store]
//! buffer_size = 32
//!
//! [logging]
//! level = "info"
//! ```

use crate::model::IdPolicy;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable naming a config file to load.
pub const CONFIG_PATH_ENV: &str = "DASHBOARD_CONFIG";
/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "DASHBOARD_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub api: ApiConfig,
    pub ids: IdPolicy,
    pub store: StoreSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// No timeout unless set.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dummyjson.com".into(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Channel capacity of each store actor.
    pub buffer_size: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self { buffer_size: 32 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl StoreConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `.env`, then the file named by `DASHBOARD_CONFIG` (defaults if
    /// unset), then applies `DASHBOARD_API_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load(path)?,
            Err(_) => Self::default(),
        };
        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.api.base_url = url;
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api.base_url cannot be empty".into()));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must be an http(s) URL, got {}",
                self.api.base_url
            )));
        }
        if self.store.buffer_size == 0 {
            return Err(ConfigError::Invalid("store.buffer_size must be positive".into()));
        }
        if self.ids.cart_local_min <= self.ids.cart_placeholder_id {
            return Err(ConfigError::Invalid(
                "ids.cart_local_min must be above ids.cart_placeholder_id".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = StoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.api.base_url, "https://dummyjson.com");
        assert_eq!(config.ids.product_remote_max, 30);
        assert_eq!(config.api.timeout_secs, None);
    }

    #[test]
    fn test_partial_sections() {
        let config = StoreConfig::from_toml_str(
            r#"
            [api]
            timeout_secs = 5

            [ids]
            product_remote_max = 100
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://dummyjson.com");
        assert_eq!(config.api.timeout_secs, Some(5));
        assert_eq!(config.ids.product_remote_max, 100);
        assert_eq!(config.ids.cart_placeholder_id, 51);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            StoreConfig::from_toml_str("[api]\nbase_url = \"\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            StoreConfig::from_toml_str("[store]\nbuffer_size = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            StoreConfig::from_toml_str("[api]\nbase_url = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://localhost:8080\"").unwrap();

        let config = StoreConfig::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
    }
}

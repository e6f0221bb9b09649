//! Client configuration
//!
//! [`ClientConfig`] holds everything the client needs to reach the backend
//! and to find its durable storage. [`ConfigLoader`] assembles one from
//! defaults, a config file, environment variables and command-line
//! overrides, later sources winning.

mod loader;

pub use loader::{ConfigLoader, ConfigSource};

use crate::error::{FoodwebError, FoodwebResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default configuration file name used by the CLI
pub const DEFAULT_CONFIG_FILE: &str = "foodweb.toml";

/// Default backend origin
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Overall deadline for a single request (10 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding the backend origin
pub const ENV_BASE_URL: &str = "FOODWEB_BASE_URL";

/// Environment variable overriding the request deadline
pub const ENV_TIMEOUT_SECS: &str = "FOODWEB_TIMEOUT_SECS";

/// Environment variable overriding the storage directory
pub const ENV_STORAGE_DIR: &str = "FOODWEB_STORAGE_DIR";

/// Resolved client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend origin; API paths are joined onto it
    pub base_url: String,

    /// Overall request deadline in seconds
    pub timeout_secs: u64,

    /// Directory used for durable client storage
    pub storage_dir: PathBuf,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            storage_dir: default_storage_dir(),
            user_agent: format!("foodweb/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a configuration pointing at `base_url`, defaults elsewhere
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the storage directory
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    /// Set the request deadline
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Request deadline as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Apply the fields set in `overlay`
    pub fn merge(&mut self, overlay: ConfigOverlay) {
        if let Some(base_url) = overlay.base_url {
            self.base_url = base_url;
        }
        if let Some(timeout_secs) = overlay.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        if let Some(storage_dir) = overlay.storage_dir {
            self.storage_dir = storage_dir;
        }
        if let Some(user_agent) = overlay.user_agent {
            self.user_agent = user_agent;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> FoodwebResult<()> {
        let base = url::Url::parse(&self.base_url).map_err(|e| {
            FoodwebError::config(format!("Invalid base_url '{}': {}", self.base_url, e))
        })?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(FoodwebError::config(format!(
                "base_url must use http or https, got '{}'",
                base.scheme()
            )));
        }

        if self.timeout_secs == 0 {
            return Err(FoodwebError::config("timeout_secs must be greater than 0"));
        }

        Ok(())
    }

    /// Render as TOML, used by `config init` and `config show`
    pub fn to_toml(&self) -> FoodwebResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| FoodwebError::config(format!("Failed to serialize config: {}", e)))
    }
}

/// Partial configuration produced by a single source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverlay {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub storage_dir: Option<PathBuf>,
    pub user_agent: Option<String>,
}

fn default_storage_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".foodweb")
        .join("storage")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.storage_dir.ends_with(".foodweb/storage"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_only_overrides_set_fields() {
        let mut config = ClientConfig::default();
        config.merge(ConfigOverlay {
            base_url: Some("https://food.example.com".to_string()),
            ..Default::default()
        });

        assert_eq!(config.base_url, "https://food.example.com");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ClientConfig::new("").validate().is_err());
        assert!(ClientConfig::new("ftp://food.example.com").validate().is_err());
        assert!(
            ClientConfig::default()
                .with_timeout_secs(0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ClientConfig::new("http://127.0.0.1:9000").with_storage_dir("/tmp/fw");
        let rendered = config.to_toml().unwrap();
        let parsed: ClientConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}

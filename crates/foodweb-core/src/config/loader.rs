//! Configuration loading from multiple sources

use super::{ClientConfig, ConfigOverlay, ENV_BASE_URL, ENV_STORAGE_DIR, ENV_TIMEOUT_SECS};
use crate::error::{FoodwebError, FoodwebResult};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Source of configuration data
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Configuration from a file; a missing file contributes nothing
    File(PathBuf),
    /// Configuration from `FOODWEB_*` environment variables
    Environment,
    /// Configuration from command line arguments
    CommandLine(HashMap<String, String>),
}

/// Configuration loader with support for multiple sources
///
/// Sources are applied on top of [`ClientConfig::default`] in the order they
/// were added.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a configuration source
    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Add a file source
    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_source(ConfigSource::File(path.as_ref().to_path_buf()))
    }

    /// Add environment variables source
    pub fn with_env(self) -> Self {
        self.add_source(ConfigSource::Environment)
    }

    /// Add command line arguments source
    pub fn with_args(self, args: HashMap<String, String>) -> Self {
        self.add_source(ConfigSource::CommandLine(args))
    }

    /// Load configuration from all sources
    pub fn load(self) -> FoodwebResult<ClientConfig> {
        let mut config = ClientConfig::default();

        for source in &self.sources {
            let overlay = load_from_source(source)?;
            config.merge(overlay);
        }

        config.validate()?;
        tracing::debug!(
            "Loaded config: base_url={}, timeout={}s, storage={}",
            config.base_url,
            config.timeout_secs,
            config.storage_dir.display()
        );
        Ok(config)
    }
}

fn load_from_source(source: &ConfigSource) -> FoodwebResult<ConfigOverlay> {
    match source {
        ConfigSource::File(path) => {
            tracing::debug!("Loading config from file: {}", path.display());
            load_from_file(path)
        }
        ConfigSource::Environment => {
            tracing::debug!("Loading config from environment");
            load_from_vars(|name| std::env::var(name).ok())
        }
        ConfigSource::CommandLine(args) => {
            tracing::debug!("Loading config from command line");
            load_from_vars(|name| args.get(arg_name(name)).cloned())
        }
    }
}

fn load_from_file(path: &Path) -> FoodwebResult<ConfigOverlay> {
    if !path.exists() {
        return Ok(ConfigOverlay::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        FoodwebError::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|e| {
            FoodwebError::config(format!(
                "Failed to parse JSON config '{}': {}",
                path.display(),
                e
            ))
        }),
        _ => toml::from_str(&content).map_err(|e| {
            FoodwebError::config(format!(
                "Failed to parse TOML config '{}': {}",
                path.display(),
                e
            ))
        }),
    }
}

/// Command-line overrides use the field names instead of the env names.
fn arg_name(env_name: &str) -> &str {
    match env_name {
        ENV_BASE_URL => "base_url",
        ENV_TIMEOUT_SECS => "timeout_secs",
        ENV_STORAGE_DIR => "storage_dir",
        other => other,
    }
}

fn load_from_vars(lookup: impl Fn(&str) -> Option<String>) -> FoodwebResult<ConfigOverlay> {
    let mut overlay = ConfigOverlay::default();

    if let Some(base_url) = lookup(ENV_BASE_URL) {
        overlay.base_url = Some(base_url);
    }

    if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
        let secs: u64 = timeout.trim().parse().map_err(|_| {
            FoodwebError::config(format!("Invalid {} value '{}'", ENV_TIMEOUT_SECS, timeout))
        })?;
        overlay.timeout_secs = Some(secs);
    }

    if let Some(dir) = lookup(ENV_STORAGE_DIR) {
        overlay.storage_dir = Some(PathBuf::from(dir));
    }

    Ok(overlay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = ConfigLoader::new()
            .with_file("/definitely/not/here/foodweb.toml")
            .load()
            .unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_toml_file_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foodweb.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "base_url = \"https://api.food.test\"").unwrap();
        writeln!(file, "timeout_secs = 3").unwrap();

        let config = ConfigLoader::new().with_file(&path).load().unwrap();
        assert_eq!(config.base_url, "https://api.food.test");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_json_file_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foodweb.json");
        fs::write(&path, r#"{"storage_dir": "/var/lib/foodweb"}"#).unwrap();

        let config = ConfigLoader::new().with_file(&path).load().unwrap();
        assert_eq!(config.storage_dir, PathBuf::from("/var/lib/foodweb"));
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foodweb.toml");
        fs::write(&path, "base_url = ").unwrap();

        let err = ConfigLoader::new().with_file(&path).load().unwrap_err();
        assert!(matches!(err, FoodwebError::Config { .. }));
    }

    #[test]
    fn test_vars_overlay() {
        let vars: HashMap<&str, &str> = [
            (ENV_BASE_URL, "http://10.0.0.2:8080"),
            (ENV_TIMEOUT_SECS, "25"),
        ]
        .into_iter()
        .collect();

        let overlay = load_from_vars(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(overlay.base_url.as_deref(), Some("http://10.0.0.2:8080"));
        assert_eq!(overlay.timeout_secs, Some(25));
        assert_eq!(overlay.storage_dir, None);
    }

    #[test]
    fn test_vars_reject_bad_timeout() {
        let result = load_from_vars(|k| (k == ENV_TIMEOUT_SECS).then(|| "soon".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_command_line_wins_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foodweb.toml");
        fs::write(&path, "base_url = \"https://from-file.test\"\n").unwrap();

        let args: HashMap<String, String> =
            [("base_url".to_string(), "https://from-args.test".to_string())]
                .into_iter()
                .collect();

        let config = ConfigLoader::new()
            .with_file(&path)
            .with_args(args)
            .load()
            .unwrap();
        assert_eq!(config.base_url, "https://from-args.test");
    }
}

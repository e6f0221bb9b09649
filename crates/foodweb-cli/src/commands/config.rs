//! Configuration management commands

use crate::args::Cli;
use crate::console::CliConsole;
use crate::router::load_config;
use foodweb_core::config::ClientConfig;
use foodweb_core::error::{FoodwebError, FoodwebResult};
use std::path::Path;

/// Show the effective configuration
pub fn show(cli: &Cli, console: &CliConsole) -> FoodwebResult<()> {
    console.print_header("Configuration");

    if Path::new(&cli.config_file).exists() {
        console.success(&format!("Loaded configuration from: {}", cli.config_file));
    } else {
        console.warn(&format!("Configuration file not found: {}", cli.config_file));
        console.info("Using defaults and environment");
    }

    let config = load_config(cli)?;
    print_config(console, &config);
    Ok(())
}

/// Write a configuration file with default values
pub async fn init(
    config_file: &str,
    base_url: Option<&str>,
    force: bool,
    console: &CliConsole,
) -> FoodwebResult<()> {
    console.print_header("Configuration Initialization");

    if Path::new(config_file).exists() && !force {
        console.info("Use --force to overwrite");
        return Err(FoodwebError::config(format!(
            "Configuration file already exists: {}",
            config_file
        )));
    }

    let config = match base_url {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::default(),
    };
    config.validate()?;

    tokio::fs::write(config_file, config.to_toml()?)
        .await
        .map_err(|e| FoodwebError::config(format!("Failed to write configuration file: {}", e)))?;

    console.success(&format!("Created configuration file: {}", config_file));
    Ok(())
}

fn print_config(console: &CliConsole, config: &ClientConfig) {
    console.field("base_url", &config.base_url);
    console.field("timeout", format!("{}s", config.timeout_secs));
    console.field("storage_dir", config.storage_dir.display());
    console.field("user_agent", &config.user_agent);
}

//! Foodweb CLI application
//!
//! Command-line client for the food recommendation platform. Every command
//! runs against the backend configured in `foodweb.toml`, `FOODWEB_*`
//! environment variables or `--base-url`.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/foodweb-cli
//! ```
//!
//! # Commands
//!
//! - `foodweb login -u <name>`: sign in; the session survives between runs
//! - `foodweb dish hot`, `foodweb dish search --title tofu`: browse
//! - `foodweb category add Desserts`: back-office management (admin)
//! - `foodweb open /admin/dishes`: show where the router would land
//!
//! Set `RUST_LOG=debug` (or pass `--verbose`) to see request logs.

mod args;
mod commands;
mod console;
mod router;

use args::Cli;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins; --verbose only changes the default
    let default_level = if cli.verbose { "debug" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    router::route(cli).await
}

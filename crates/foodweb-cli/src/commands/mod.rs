//! Command handlers, one module per resource

pub mod auth;
pub mod category;
pub mod config;
pub mod dish;
pub mod open;
pub mod upload;
pub mod user;

use foodweb_core::error::{FoodwebError, FoodwebResult};

/// Ask before a destructive call unless `--yes` was given
pub(crate) fn confirm(prompt: &str, assume_yes: bool) -> FoodwebResult<bool> {
    if assume_yes {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| FoodwebError::invalid_input(format!("Could not read confirmation: {}", e)))
}

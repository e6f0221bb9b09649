//! Category administration

use super::confirm;
use crate::console::CliConsole;
use foodweb_core::context::FoodwebContext;
use foodweb_core::error::{FoodwebError, FoodwebResult};
use foodweb_core::services;

pub async fn list(ctx: &FoodwebContext, console: &CliConsole) -> FoodwebResult<()> {
    let categories = ctx.client().send(services::category::get_all_categories()).await?;

    console.print_header(&format!("Categories ({})", categories.len()));
    for category in &categories {
        console.row(category.category_id, &category.name, "");
    }
    Ok(())
}

pub async fn show(ctx: &FoodwebContext, console: &CliConsole, id: i64) -> FoodwebResult<()> {
    let category = ctx
        .client()
        .send(services::category::get_category_by_id(id))
        .await?;

    console.print_header(&category.name);
    console.field("id", category.category_id);
    if let Some(created) = &category.created_at {
        console.field("created", created);
    }
    if let Some(updated) = &category.updated_at {
        console.field("updated", updated);
    }
    Ok(())
}

pub async fn add(ctx: &FoodwebContext, console: &CliConsole, name: &str) -> FoodwebResult<()> {
    let name = required_name(name)?;
    let response = ctx.client().send(services::category::add_category(name)).await?;
    console.success(&format!("Added category '{}'", name));
    console.json(&response);
    Ok(())
}

pub async fn update(
    ctx: &FoodwebContext,
    console: &CliConsole,
    id: i64,
    name: &str,
) -> FoodwebResult<()> {
    let name = required_name(name)?;
    ctx.client()
        .send(services::category::update_category(id, name))
        .await?;
    console.success(&format!("Renamed category {} to '{}'", id, name));
    Ok(())
}

pub async fn delete(
    ctx: &FoodwebContext,
    console: &CliConsole,
    id: i64,
    yes: bool,
) -> FoodwebResult<()> {
    if !confirm(&format!("Delete category {}?", id), yes)? {
        console.warn("Cancelled");
        return Ok(());
    }
    ctx.client()
        .send(services::category::delete_category(id))
        .await?;
    console.success(&format!("Deleted category {}", id));
    Ok(())
}

fn required_name(name: &str) -> FoodwebResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FoodwebError::invalid_input("category name must not be empty"));
    }
    Ok(name)
}

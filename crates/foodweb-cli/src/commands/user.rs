//! User administration

use crate::console::CliConsole;
use foodweb_core::context::FoodwebContext;
use foodweb_core::error::FoodwebResult;
use foodweb_core::services;
use foodweb_core::types::{PageResponse, User};

pub async fn list(
    ctx: &FoodwebContext,
    console: &CliConsole,
    page: u32,
    size: u32,
) -> FoodwebResult<()> {
    let users = ctx
        .client()
        .send(services::user::get_all_users(page, size))
        .await?;

    console.print_header(&heading(page, &users));
    for user in &users.content {
        console.row(
            user.user_id,
            &user.username,
            &format!("{} {}", user.role, user.email),
        );
    }
    if let Some(next) = next_page(page, &users) {
        console.info(&format!("Next page: --page {}", next));
    }
    Ok(())
}

/// `page` is the zero-based index that was requested
fn heading(page: u32, users: &PageResponse<User>) -> String {
    format!(
        "Users (page {} of {}, {} total)",
        page.saturating_add(1),
        users.total_pages.max(1),
        users.total_elements
    )
}

fn next_page(page: u32, users: &PageResponse<User>) -> Option<u32> {
    let next = page.checked_add(1)?;
    (next < users.total_pages).then_some(next)
}

pub async fn show(ctx: &FoodwebContext, console: &CliConsole, id: i64) -> FoodwebResult<()> {
    let user = ctx.client().send(services::user::get_user_by_id(id)).await?;

    console.print_header(&user.username);
    console.field("id", user.user_id);
    console.field("role", user.role);
    console.field("email", &user.email);
    if let Some(phone) = &user.phone {
        console.field("phone", phone);
    }
    if let Some(created) = &user.created_at {
        console.field("created", created);
    }
    if let Some(updated) = &user.updated_at {
        console.field("updated", updated);
    }
    Ok(())
}

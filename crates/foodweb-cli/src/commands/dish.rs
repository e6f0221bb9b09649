//! Dish browsing and management

use super::confirm;
use crate::args::DishFields;
use crate::console::CliConsole;
use foodweb_core::context::FoodwebContext;
use foodweb_core::error::{FoodwebError, FoodwebResult};
use foodweb_core::services;
use foodweb_core::types::{Dish, DishRequest, DishSearchParams};

pub async fn list(ctx: &FoodwebContext, console: &CliConsole) -> FoodwebResult<()> {
    let dishes = ctx.client().send(services::dish::get_all_dishes()).await?;
    print_dishes(console, &format!("Dishes ({})", dishes.len()), &dishes);
    Ok(())
}

pub async fn hot(ctx: &FoodwebContext, console: &CliConsole) -> FoodwebResult<()> {
    let dishes = ctx.client().send(services::dish::get_hot_dishes()).await?;
    print_dishes(console, "Hot dishes", &dishes);
    Ok(())
}

pub async fn show(ctx: &FoodwebContext, console: &CliConsole, id: i64) -> FoodwebResult<()> {
    let dish = ctx.client().send(services::dish::get_dish_by_id(id)).await?;

    console.print_header(&dish.title);
    console.field("id", dish.dish_id);
    match &dish.category {
        Some(category) => console.field("category", &category.name),
        None => console.field("category", dish.category_id),
    }
    match &dish.user {
        Some(user) => console.field("author", &user.username),
        None => console.field("author", dish.user_id),
    }
    console.field("clicks", dish.clicks);
    if !dish.cover_image.is_empty() {
        console.field("cover", &dish.cover_image);
    }
    if let Some(created) = &dish.created_at {
        console.field("created", created);
    }
    if let Some(content) = dish.markdown_content.as_deref().filter(|c| !c.is_empty()) {
        println!();
        println!("{}", content);
    }
    Ok(())
}

pub async fn search(
    ctx: &FoodwebContext,
    console: &CliConsole,
    params: &DishSearchParams,
) -> FoodwebResult<()> {
    let page = ctx.client().send(services::dish::search_dishes(params)).await?;

    let title = format!(
        "Search results ({} found, page {} of {})",
        page.total_elements,
        page.display_number(),
        page.total_pages.max(1)
    );
    print_dishes(console, &title, &page.content);
    if let Some(next) = page.next_page() {
        console.info(&format!("Next page: --page {}", next));
    }
    Ok(())
}

pub async fn add(
    ctx: &FoodwebContext,
    console: &CliConsole,
    fields: &DishFields,
) -> FoodwebResult<()> {
    let user_id = ctx
        .sessions()
        .user_id()
        .ok_or_else(|| FoodwebError::invalid_input("log in before adding dishes"))?;
    let title = fields
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| FoodwebError::invalid_input("--title is required"))?;
    let category_id = fields
        .category
        .ok_or_else(|| FoodwebError::invalid_input("--category is required"))?;

    let request = DishRequest {
        title,
        cover_image: fields.cover.clone().unwrap_or_default(),
        markdown_content: read_content(fields).await?.unwrap_or_default(),
        user_id,
        category_id,
        dish_id: None,
    };
    let response = ctx.client().send(services::dish::add_dish(&request)).await?;

    console.success(&format!("Added dish '{}'", request.title));
    console.json(&response);
    Ok(())
}

/// Fetch the dish, apply the given fields, send it back
pub async fn update(
    ctx: &FoodwebContext,
    console: &CliConsole,
    id: i64,
    fields: &DishFields,
) -> FoodwebResult<()> {
    let current = ctx.client().send(services::dish::get_dish_by_id(id)).await?;
    let content = read_content(fields).await?;
    let request = merge(current, fields, content);

    ctx.client().send(services::dish::update_dish(&request)).await?;
    console.success(&format!("Updated dish {}", id));
    Ok(())
}

pub async fn delete(
    ctx: &FoodwebContext,
    console: &CliConsole,
    id: i64,
    yes: bool,
) -> FoodwebResult<()> {
    if !confirm(&format!("Delete dish {}?", id), yes)? {
        console.warn("Cancelled");
        return Ok(());
    }
    ctx.client().send(services::dish::delete_dish(id)).await?;
    console.success(&format!("Deleted dish {}", id));
    Ok(())
}

async fn read_content(fields: &DishFields) -> FoodwebResult<Option<String>> {
    if let Some(path) = &fields.content_file {
        return Ok(Some(tokio::fs::read_to_string(path).await?));
    }
    Ok(fields.content.clone())
}

fn merge(current: Dish, fields: &DishFields, content: Option<String>) -> DishRequest {
    DishRequest {
        title: fields.title.clone().unwrap_or(current.title),
        cover_image: fields.cover.clone().unwrap_or(current.cover_image),
        markdown_content: content
            .or(current.markdown_content)
            .unwrap_or_default(),
        user_id: current.user_id,
        category_id: fields.category.unwrap_or(current.category_id),
        dish_id: Some(current.dish_id),
    }
}

fn print_dishes(console: &CliConsole, title: &str, dishes: &[Dish]) {
    console.print_header(title);
    for dish in dishes {
        let category = dish
            .category
            .as_ref()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("category {}", dish.category_id));
        console.row(
            dish.dish_id,
            &dish.title,
            &format!("{} · {} clicks", category, dish.clicks),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish() -> Dish {
        serde_json::from_value(serde_json::json!({
            "dishId": 7,
            "title": "Mapo Tofu",
            "coverImage": "/uploads/mapo.png",
            "markdownContent": "spicy",
            "userId": 3,
            "categoryId": 2,
            "clicks": 40
        }))
        .unwrap()
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let fields = DishFields {
            title: Some("Mapo Tofu (mild)".to_string()),
            ..DishFields::default()
        };
        let request = merge(dish(), &fields, None);

        assert_eq!(request.title, "Mapo Tofu (mild)");
        assert_eq!(request.cover_image, "/uploads/mapo.png");
        assert_eq!(request.markdown_content, "spicy");
        assert_eq!(request.user_id, 3);
        assert_eq!(request.category_id, 2);
        assert_eq!(request.dish_id, Some(7));
    }

    #[test]
    fn test_merge_replaces_content_and_category() {
        let fields = DishFields {
            category: Some(5),
            ..DishFields::default()
        };
        let request = merge(dish(), &fields, Some("new body".to_string()));
        assert_eq!(request.category_id, 5);
        assert_eq!(request.markdown_content, "new body");
    }
}

//! Dishes

use super::{Category, Timestamp, User};
use serde::{Deserialize, Serialize};

/// Dish record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub dish_id: i64,
    pub title: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub markdown_content: Option<String>,
    pub user_id: i64,
    pub category_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    /// View count
    #[serde(default)]
    pub clicks: u64,
}

/// Body for creating or editing a dish; `dish_id` is set only for edits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishRequest {
    pub title: String,
    pub cover_image: String,
    pub markdown_content: String,
    pub user_id: i64,
    pub category_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish_id: Option<i64>,
}

/// Dish search filters
///
/// Unset filters are left out of the query string entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishSearchParams {
    pub title: Option<String>,
    pub category_id: Option<i64>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl DishSearchParams {
    /// Query pairs in backend order
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            query.push(("size".to_string(), size.to_string()));
        }
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            query.push(("title".to_string(), title.to_string()));
        }
        if let Some(category_id) = self.category_id {
            query.push(("categoryId".to_string(), category_id.to_string()));
        }
        query
    }
}

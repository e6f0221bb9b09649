//! `/api/admin/dish`

use crate::http::{ApiRequest, RequestSpec};
use crate::types::{Dish, DishRequest, DishSearchParams, PageResponse};
use serde_json::{Value, json};

const BASE: &str = "/api/admin/dish";

pub fn get_all_dishes() -> ApiRequest<Vec<Dish>> {
    RequestSpec::get(BASE).into()
}

pub fn get_dish_by_id(dish_id: i64) -> ApiRequest<Dish> {
    RequestSpec::get(format!("{}/{}", BASE, dish_id)).into()
}

/// Paged search; unset filters are omitted from the query
pub fn search_dishes(params: &DishSearchParams) -> ApiRequest<PageResponse<Dish>> {
    RequestSpec::get(format!("{}/search", BASE))
        .with_query_pairs(params.to_query())
        .into()
}

/// Most-clicked dishes
pub fn get_hot_dishes() -> ApiRequest<Vec<Dish>> {
    RequestSpec::get(format!("{}/hot", BASE)).into()
}

pub fn add_dish(dish: &DishRequest) -> ApiRequest<Value> {
    RequestSpec::post(BASE).with_json(json!(dish)).into()
}

/// Edit a dish; `dish.dish_id` identifies it
pub fn update_dish(dish: &DishRequest) -> ApiRequest<Value> {
    RequestSpec::put(BASE).with_json(json!(dish)).into()
}

pub fn delete_dish(dish_id: i64) -> ApiRequest<Value> {
    RequestSpec::delete(format!("{}/{}", BASE, dish_id)).into()
}

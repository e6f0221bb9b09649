//! `/api/admin/category`

use crate::http::{ApiRequest, RequestSpec};
use crate::types::{Category, CategoryRequest};
use serde_json::{Value, json};

const BASE: &str = "/api/admin/category";

pub fn get_all_categories() -> ApiRequest<Vec<Category>> {
    RequestSpec::get(BASE).into()
}

pub fn get_category_by_id(category_id: i64) -> ApiRequest<Category> {
    RequestSpec::get(format!("{}/{}", BASE, category_id)).into()
}

pub fn add_category(name: &str) -> ApiRequest<Value> {
    let body = CategoryRequest {
        category_id: None,
        name: name.to_string(),
    };
    RequestSpec::post(BASE).with_json(json!(body)).into()
}

pub fn update_category(category_id: i64, name: &str) -> ApiRequest<Value> {
    let body = CategoryRequest {
        category_id: Some(category_id),
        name: name.to_string(),
    };
    RequestSpec::put(BASE).with_json(json!(body)).into()
}

pub fn delete_category(category_id: i64) -> ApiRequest<Value> {
    RequestSpec::delete(format!("{}/{}", BASE, category_id)).into()
}

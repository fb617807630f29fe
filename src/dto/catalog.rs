use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Dish, Menu, Price};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMenuRequest {
    pub restaurant_id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMenuRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuList {
    pub items: Vec<Menu>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDishRequest {
    pub menu_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDishRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DishList {
    pub items: Vec<Dish>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePriceRequest {
    pub dish_id: i64,
    pub amount_cents: i64,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub price_type: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePriceRequest {
    pub amount_cents: Option<i64>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub price_type: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PriceList {
    pub items: Vec<Price>,
}

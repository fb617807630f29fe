use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::OrderStatus;

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCartItemRequest {
    pub restaurant_id: i64,
    pub dish_id: i64,
    pub price_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub address_id: i64,
    pub delivery_agent_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub order_id: i64,
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemView {
    pub item_id: i64,
    pub dish_id: i64,
    pub dish_name: String,
    pub dish_description: Option<String>,
    pub unit_price_cents: i64,
    pub quantity: i32,
    pub note: Option<String>,
    pub item_total_cents: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub order_id: Option<i64>,
    pub restaurant_id: Option<i64>,
    pub restaurant_name: Option<String>,
    pub items: Vec<CartItemView>,
    pub subtotal_cents: i64,
    pub item_count: i64,
}

impl CartView {
    pub fn empty() -> Self {
        Self {
            order_id: None,
            restaurant_id: None,
            restaurant_name: None,
            items: Vec::new(),
            subtotal_cents: 0,
            item_count: 0,
        }
    }
}

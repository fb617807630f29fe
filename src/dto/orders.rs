use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Address, DeliveryAgent, Order, OrderStatus, Restaurant};
use crate::routes::params::{Pagination, SortOrder};

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderListQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub status: Option<OrderStatus>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemDetail {
    pub item_id: i64,
    pub quantity: i32,
    pub note: Option<String>,
    pub dish_id: i64,
    pub dish_name: Option<String>,
    pub dish_category: Option<String>,
    pub price_id: i64,
    pub unit_price_cents: Option<i64>,
    pub line_total_cents: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetail {
    pub order: Order,
    pub restaurant: Option<Restaurant>,
    pub delivery_agent: Option<DeliveryAgent>,
    pub delivery_address: Option<Address>,
    pub items: Vec<OrderItemDetail>,
    pub total_cents: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderStatusView {
    pub order_id: i64,
    pub status: OrderStatus,
}

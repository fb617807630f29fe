use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use crate::entity::orders::OrderStatus;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Address {
    pub id: i64,
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub address_id: Option<i64>,
    pub birth_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub initials: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Critic {
    pub id: i64,
    pub customer_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeliveryAgent {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub classification: Option<String>,
    pub address_id: Option<i64>,
    pub phone: Option<String>,
    pub head_chef: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Menu {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Dish {
    pub id: i64,
    pub menu_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Price {
    pub id: i64,
    pub dish_id: i64,
    pub amount_cents: i64,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub price_type: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub restaurant_id: Option<i64>,
    pub delivery_agent_id: Option<i64>,
    pub address_id: Option<i64>,
    pub status: OrderStatus,
    pub ordered_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub dish_id: i64,
    pub price_id: i64,
    pub quantity: i32,
    pub note: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerRating {
    pub id: i64,
    pub customer_id: i64,
    pub dish_id: i64,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CriticRating {
    pub id: i64,
    pub critic_id: i64,
    pub dish_id: i64,
    pub rating: i16,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OpeningHoursTemplate {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OpeningHoursDetail {
    pub id: i64,
    pub template_id: i64,
    pub weekday: i16,
    pub opens_at: NaiveTime,
    pub closes_at: NaiveTime,
}

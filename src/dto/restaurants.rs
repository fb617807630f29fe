use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Address, Dish, Menu, Price, Restaurant};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub classification: Option<String>,
    pub address_id: Option<i64>,
    pub phone: Option<String>,
    pub head_chef: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRestaurantRequest {
    pub name: Option<String>,
    pub classification: Option<String>,
    pub address_id: Option<i64>,
    pub phone: Option<String>,
    pub head_chef: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RestaurantQuery {
    pub name: Option<String>,
    pub classification: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantList {
    pub items: Vec<Restaurant>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DishWithPrices {
    pub dish: Dish,
    pub prices: Vec<Price>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuWithDishes {
    pub menu: Menu,
    pub dishes: Vec<DishWithPrices>,
}

/// Restaurant with its address and the full menu tree.
#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantDetail {
    pub restaurant: Restaurant,
    pub address: Option<Address>,
    pub menus: Vec<MenuWithDishes>,
}

use axum::Router;

use crate::state::AppState;

pub mod addresses;
pub mod cart;
pub mod catalog;
pub mod customers;
pub mod doc;
pub mod health;
pub mod hours;
pub mod orders;
pub mod params;
pub mod ratings;
pub mod restaurants;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/addresses", addresses::router())
        .nest("/customers", customers::router())
        .nest("/critics", customers::critics_router())
        .nest("/delivery-agents", customers::delivery_agents_router())
        .nest("/restaurants", restaurants::router())
        .nest("/menus", catalog::menus_router())
        .nest("/dishes", catalog::dishes_router())
        .nest("/prices", catalog::prices_router())
        .nest("/cart", cart::router())
        .nest("/orders", orders::router())
        .nest("/customer-ratings", ratings::customer_router())
        .nest("/critic-ratings", ratings::critic_router())
        .nest("/hours-templates", hours::router())
}

pub mod address_service;
pub mod cart_service;
pub mod catalog_service;
pub mod customer_service;
pub mod hours_service;
pub mod order_service;
pub mod rating_service;
pub mod restaurant_service;

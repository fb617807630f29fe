pub mod addresses;
pub mod cart;
pub mod catalog;
pub mod customers;
pub mod hours;
pub mod orders;
pub mod ratings;
pub mod restaurants;

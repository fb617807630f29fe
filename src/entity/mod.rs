pub mod addresses;
pub mod critic_ratings;
pub mod critics;
pub mod customer_ratings;
pub mod customers;
pub mod delivery_agents;
pub mod dishes;
pub mod menus;
pub mod opening_hours_details;
pub mod opening_hours_templates;
pub mod order_items;
pub mod orders;
pub mod prices;
pub mod restaurant_hours;
pub mod restaurants;

pub use addresses::Entity as Addresses;
pub use critic_ratings::Entity as CriticRatings;
pub use critics::Entity as Critics;
pub use customer_ratings::Entity as CustomerRatings;
pub use customers::Entity as Customers;
pub use delivery_agents::Entity as DeliveryAgents;
pub use dishes::Entity as Dishes;
pub use menus::Entity as Menus;
pub use opening_hours_details::Entity as OpeningHoursDetails;
pub use opening_hours_templates::Entity as OpeningHoursTemplates;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use prices::Entity as Prices;
pub use restaurant_hours::Entity as RestaurantHours;
pub use restaurants::Entity as Restaurants;

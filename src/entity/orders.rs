use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Order lifecycle. `Cart` marks the customer's single draft order; checkout
/// moves it to `Received` and from there it only advances through delivery.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[sea_orm(string_value = "cart")]
    Cart,
    #[sea_orm(string_value = "received")]
    Received,
    #[sea_orm(string_value = "in_delivery")]
    InDelivery,
    #[sea_orm(string_value = "delivered")]
    Delivered,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    /// Legal transitions. There is deliberately no way back to `Cart`.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Cart, Received)
                | (Received, InDelivery)
                | (Received, Cancelled)
                | (InDelivery, Delivered)
                | (InDelivery, Cancelled)
        )
    }

    pub fn is_draft(self) -> bool {
        self == OrderStatus::Cart
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub customer_id: i64,
    pub restaurant_id: Option<i64>,
    pub delivery_agent_id: Option<i64>,
    pub address_id: Option<i64>,
    pub status: OrderStatus,
    pub ordered_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id"
    )]
    Customers,
    #[sea_orm(
        belongs_to = "super::restaurants::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurants::Column::Id"
    )]
    Restaurants,
    #[sea_orm(
        belongs_to = "super::delivery_agents::Entity",
        from = "Column::DeliveryAgentId",
        to = "super::delivery_agents::Column::Id"
    )]
    DeliveryAgents,
    #[sea_orm(
        belongs_to = "super::addresses::Entity",
        from = "Column::AddressId",
        to = "super::addresses::Column::Id"
    )]
    Addresses,
    #[sea_orm(has_many = "super::order_items::Entity")]
    OrderItems,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl Related<super::restaurants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurants.def()
    }
}

impl Related<super::delivery_agents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeliveryAgents.def()
    }
}

impl Related<super::addresses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Addresses.def()
    }
}

impl Related<super::order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::OrderStatus;

    #[test]
    fn checkout_is_the_only_way_out_of_the_cart() {
        assert!(OrderStatus::Cart.can_transition_to(OrderStatus::Received));
        assert!(!OrderStatus::Cart.can_transition_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Cart.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn placed_orders_never_return_to_cart() {
        for status in [
            OrderStatus::Received,
            OrderStatus::InDelivery,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert!(!status.can_transition_to(OrderStatus::Cart));
        }
    }

    #[test]
    fn delivery_progression() {
        assert!(OrderStatus::Received.can_transition_to(OrderStatus::InDelivery));
        assert!(OrderStatus::InDelivery.can_transition_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::InDelivery));
    }
}

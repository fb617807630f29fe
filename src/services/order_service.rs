use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::{
    dto::orders::{
        OrderDetail, OrderItemDetail, OrderList, OrderListQuery, OrderStatusView,
        UpdateOrderStatusRequest,
    },
    entity::{
        delivery_agents, dishes, prices, restaurants,
        order_items::{Column as ItemCol, Entity as OrderItems, Model as OrderItemModel},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders,
                 Model as OrderModel, OrderStatus},
        Addresses, DeliveryAgents, Dishes, Prices, Restaurants,
    },
    error::{AppError, AppResult},
    models::{DeliveryAgent, Order, Restaurant},
    response::{ApiResponse, Meta},
    routes::params::SortOrder,
    services::address_service::address_from_entity,
    state::AppState,
};

pub async fn list_orders(
    state: &AppState,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination.normalize();

    let mut condition = Condition::all();
    match query.status {
        Some(status) => condition = condition.add(OrderCol::Status.eq(status)),
        // Drafts are carts, not orders.
        None => condition = condition.add(OrderCol::Status.ne(OrderStatus::Cart)),
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    let mut finder = Orders::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(OrderCol::OrderedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::OrderedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("OK", OrderList { items }, Some(meta)))
}

pub async fn list_by_customer(
    state: &AppState,
    customer_id: i64,
) -> AppResult<ApiResponse<OrderList>> {
    let items = Orders::find()
        .filter(OrderCol::CustomerId.eq(customer_id))
        .filter(OrderCol::Status.ne(OrderStatus::Cart))
        .order_by_desc(OrderCol::OrderedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();
    Ok(ApiResponse::success("OK", OrderList { items }, Some(Meta::empty())))
}

pub async fn get_order(state: &AppState, id: i64) -> AppResult<ApiResponse<Order>> {
    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", order_from_entity(order), None))
}

pub async fn get_order_detail(state: &AppState, id: i64) -> AppResult<ApiResponse<OrderDetail>> {
    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let items = OrderItems::find()
        .filter(ItemCol::OrderId.eq(order.id))
        .all(&state.orm)
        .await?;

    let dish_ids: Vec<i64> = items.iter().map(|i| i.dish_id).collect();
    let price_ids: Vec<i64> = items.iter().map(|i| i.price_id).collect();

    let dish_map: HashMap<i64, dishes::Model> = Dishes::find()
        .filter(dishes::Column::Id.is_in(dish_ids))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|d| (d.id, d))
        .collect();
    let price_map: HashMap<i64, prices::Model> = Prices::find()
        .filter(prices::Column::Id.is_in(price_ids))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let item_details: Vec<OrderItemDetail> = items
        .iter()
        .map(|item| item_detail(item, &dish_map, &price_map))
        .collect();
    let total_cents = order_total(&item_details);

    let restaurant = match order.restaurant_id {
        Some(rid) => Restaurants::find_by_id(rid)
            .one(&state.orm)
            .await?
            .map(restaurant_from_entity),
        None => None,
    };
    let delivery_agent = match order.delivery_agent_id {
        Some(aid) => DeliveryAgents::find_by_id(aid)
            .one(&state.orm)
            .await?
            .map(agent_from_entity),
        None => None,
    };
    let delivery_address = match order.address_id {
        Some(addr) => Addresses::find_by_id(addr)
            .one(&state.orm)
            .await?
            .map(address_from_entity),
        None => None,
    };

    let detail = OrderDetail {
        order: order_from_entity(order),
        restaurant,
        delivery_agent,
        delivery_address,
        items: item_details,
        total_cents,
    };
    Ok(ApiResponse::success("OK", detail, Some(Meta::empty())))
}

pub async fn update_status(
    state: &AppState,
    id: i64,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<OrderStatusView>> {
    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if !order.status.can_transition_to(payload.status) {
        return Err(AppError::BadRequest(format!(
            "cannot transition order from {:?} to {:?}",
            order.status, payload.status
        )));
    }

    let order_id = order.id;
    let mut active: OrderActive = order.into();
    active.status = Set(payload.status);
    let updated = active.update(&state.orm).await?;

    tracing::info!(order_id, status = ?updated.status, "order status updated");

    Ok(ApiResponse::success(
        "Status updated",
        OrderStatusView {
            order_id: updated.id,
            status: updated.status,
        },
        None,
    ))
}

fn item_detail(
    item: &OrderItemModel,
    dish_map: &HashMap<i64, dishes::Model>,
    price_map: &HashMap<i64, prices::Model>,
) -> OrderItemDetail {
    let dish = dish_map.get(&item.dish_id);
    let unit_price_cents = price_map.get(&item.price_id).map(|p| p.amount_cents);
    if unit_price_cents.is_none() {
        // A missing price contributes zero to the total; the warning is the
        // only observable effect.
        tracing::warn!(
            item_id = item.id,
            price_id = item.price_id,
            "order item has no price record, counting it as zero"
        );
    }
    OrderItemDetail {
        item_id: item.id,
        quantity: item.quantity,
        note: item.note.clone(),
        dish_id: item.dish_id,
        dish_name: dish.map(|d| d.name.clone()),
        dish_category: dish.and_then(|d| d.category.clone()),
        price_id: item.price_id,
        unit_price_cents,
        line_total_cents: line_total(unit_price_cents, item.quantity),
    }
}

fn line_total(unit_price_cents: Option<i64>, quantity: i32) -> i64 {
    unit_price_cents
        .map(|cents| cents * quantity as i64)
        .unwrap_or(0)
}

fn order_total(items: &[OrderItemDetail]) -> i64 {
    items.iter().map(|i| i.line_total_cents).sum()
}

pub fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        customer_id: model.customer_id,
        restaurant_id: model.restaurant_id,
        delivery_agent_id: model.delivery_agent_id,
        address_id: model.address_id,
        status: model.status,
        ordered_at: model.ordered_at.with_timezone(&Utc),
    }
}

pub fn restaurant_from_entity(model: restaurants::Model) -> Restaurant {
    Restaurant {
        id: model.id,
        name: model.name,
        classification: model.classification,
        address_id: model.address_id,
        phone: model.phone,
        head_chef: model.head_chef,
    }
}

pub fn agent_from_entity(model: delivery_agents::Model) -> DeliveryAgent {
    DeliveryAgent {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        phone: model.phone,
    }
}

#[cfg(test)]
mod tests {
    use super::{line_total, order_total};
    use crate::dto::orders::OrderItemDetail;

    fn detail(quantity: i32, unit_price_cents: Option<i64>) -> OrderItemDetail {
        OrderItemDetail {
            item_id: 0,
            quantity,
            note: None,
            dish_id: 0,
            dish_name: None,
            dish_category: None,
            price_id: 0,
            unit_price_cents,
            line_total_cents: line_total(unit_price_cents, quantity),
        }
    }

    #[test]
    fn missing_price_contributes_zero() {
        assert_eq!(line_total(None, 3), 0);
        let items = vec![detail(2, Some(500)), detail(3, None)];
        assert_eq!(order_total(&items), 1000);
    }

    #[test]
    fn total_multiplies_quantity() {
        let items = vec![detail(2, Some(950)), detail(1, Some(1250))];
        assert_eq!(order_total(&items), 2 * 950 + 1250);
    }
}

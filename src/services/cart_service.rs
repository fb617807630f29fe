use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QuerySelect, Set, TransactionTrait,
};
use sqlx::FromRow;

use crate::{
    dto::cart::{
        AddCartItemRequest, CartItemView, CartView, CheckoutRequest, CheckoutResponse,
        UpdateNoteRequest, UpdateQuantityRequest,
    },
    entity::{
        order_items::{ActiveModel as OrderItemActive, Column as ItemCol, Entity as OrderItems},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders,
                 Model as OrderModel, OrderStatus},
        Addresses, DeliveryAgents, Dishes, Prices, Restaurants,
    },
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(FromRow)]
struct CartRow {
    item_id: i64,
    quantity: i32,
    note: Option<String>,
    dish_id: i64,
    dish_name: String,
    dish_description: Option<String>,
    unit_price_cents: i64,
}

/// Find the customer's draft order, or create an empty one. Idempotent.
async fn get_or_create_draft<C: ConnectionTrait>(
    conn: &C,
    customer_id: i64,
) -> Result<OrderModel, AppError> {
    if let Some(draft) = find_draft(conn, customer_id).await? {
        return Ok(draft);
    }

    let draft = OrderActive {
        id: NotSet,
        customer_id: Set(customer_id),
        restaurant_id: Set(None),
        delivery_agent_id: Set(None),
        address_id: Set(None),
        status: Set(OrderStatus::Cart),
        ordered_at: Set(Utc::now().into()),
    }
    .insert(conn)
    .await?;
    Ok(draft)
}

async fn find_draft<C: ConnectionTrait>(
    conn: &C,
    customer_id: i64,
) -> Result<Option<OrderModel>, AppError> {
    let draft = Orders::find()
        .filter(OrderCol::CustomerId.eq(customer_id))
        .filter(OrderCol::Status.eq(OrderStatus::Cart))
        .one(conn)
        .await?;
    Ok(draft)
}

pub async fn get_cart(state: &AppState, customer_id: i64) -> AppResult<ApiResponse<CartView>> {
    let draft = get_or_create_draft(&state.orm, customer_id).await?;
    let view = build_cart_view(state, &draft).await?;
    Ok(ApiResponse::success("OK", view, Some(Meta::empty())))
}

pub async fn add_item(
    state: &AppState,
    customer_id: i64,
    payload: AddCartItemRequest,
) -> AppResult<ApiResponse<CartView>> {
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    let txn = state.orm.begin().await?;

    let dish = Dishes::find_by_id(payload.dish_id).one(&txn).await?;
    if dish.is_none() {
        return Err(AppError::BadRequest("dish not found".to_string()));
    }
    let price = Prices::find_by_id(payload.price_id).one(&txn).await?;
    match price {
        None => return Err(AppError::BadRequest("price not found".to_string())),
        Some(ref p) if p.dish_id != payload.dish_id => {
            return Err(AppError::BadRequest(
                "price does not belong to the dish".to_string(),
            ));
        }
        Some(_) => {}
    }

    let mut draft = get_or_create_draft(&txn, customer_id).await?;

    let item_count = OrderItems::find()
        .filter(ItemCol::OrderId.eq(draft.id))
        .count(&txn)
        .await?;

    if item_count == 0 {
        // First item adopts the restaurant.
        let mut active: OrderActive = draft.into();
        active.restaurant_id = Set(Some(payload.restaurant_id));
        draft = active.update(&txn).await?;
    } else if draft.restaurant_id != Some(payload.restaurant_id) {
        // Dropping the transaction rolls back, so nothing is mutated.
        return Err(AppError::BadRequest(
            "cannot add items from different restaurants to one cart".to_string(),
        ));
    }

    let existing = OrderItems::find()
        .filter(ItemCol::OrderId.eq(draft.id))
        .filter(ItemCol::DishId.eq(payload.dish_id))
        .filter(ItemCol::PriceId.eq(payload.price_id))
        .one(&txn)
        .await?;

    if let Some(item) = existing {
        let quantity = item.quantity + payload.quantity;
        let mut active: OrderItemActive = item.into();
        active.quantity = Set(quantity);
        if payload.note.is_some() {
            active.note = Set(payload.note.clone());
        }
        active.update(&txn).await?;
    } else {
        OrderItemActive {
            id: NotSet,
            order_id: Set(draft.id),
            dish_id: Set(payload.dish_id),
            price_id: Set(payload.price_id),
            quantity: Set(payload.quantity),
            note: Set(payload.note.clone()),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    let view = build_cart_view(state, &draft).await?;
    Ok(ApiResponse::success("Item added", view, Some(Meta::empty())))
}

pub async fn update_quantity(
    state: &AppState,
    customer_id: i64,
    item_id: i64,
    payload: UpdateQuantityRequest,
) -> AppResult<ApiResponse<CartView>> {
    let txn = state.orm.begin().await?;

    let draft = find_draft(&txn, customer_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let item = OrderItems::find_by_id(item_id)
        .filter(ItemCol::OrderId.eq(draft.id))
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    if payload.quantity <= 0 {
        item.delete(&txn).await?;
    } else {
        let mut active: OrderItemActive = item.into();
        active.quantity = Set(payload.quantity);
        active.update(&txn).await?;
    }

    let draft = reset_restaurant_if_empty(&txn, draft).await?;
    txn.commit().await?;

    let view = build_cart_view(state, &draft).await?;
    Ok(ApiResponse::success("Quantity updated", view, Some(Meta::empty())))
}

pub async fn update_note(
    state: &AppState,
    customer_id: i64,
    item_id: i64,
    payload: UpdateNoteRequest,
) -> AppResult<ApiResponse<CartView>> {
    let txn = state.orm.begin().await?;

    let draft = find_draft(&txn, customer_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let item = OrderItems::find_by_id(item_id)
        .filter(ItemCol::OrderId.eq(draft.id))
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: OrderItemActive = item.into();
    active.note = Set(payload.note);
    active.update(&txn).await?;

    txn.commit().await?;

    let view = build_cart_view(state, &draft).await?;
    Ok(ApiResponse::success("Note updated", view, Some(Meta::empty())))
}

pub async fn remove_item(
    state: &AppState,
    customer_id: i64,
    item_id: i64,
) -> AppResult<ApiResponse<CartView>> {
    let txn = state.orm.begin().await?;

    let draft = find_draft(&txn, customer_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let item = OrderItems::find_by_id(item_id)
        .filter(ItemCol::OrderId.eq(draft.id))
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    item.delete(&txn).await?;

    let draft = reset_restaurant_if_empty(&txn, draft).await?;
    txn.commit().await?;

    let view = build_cart_view(state, &draft).await?;
    Ok(ApiResponse::success("Item removed", view, Some(Meta::empty())))
}

/// Deletes the line items and the draft row itself; "no draft" is a valid
/// empty state here, not an error.
pub async fn clear_cart(state: &AppState, customer_id: i64) -> AppResult<ApiResponse<CartView>> {
    let Some(draft) = find_draft(&state.orm, customer_id).await? else {
        return Ok(ApiResponse::success(
            "Cart already empty",
            CartView::empty(),
            Some(Meta::empty()),
        ));
    };

    let txn = state.orm.begin().await?;
    OrderItems::delete_many()
        .filter(ItemCol::OrderId.eq(draft.id))
        .exec(&txn)
        .await?;
    Orders::delete_by_id(draft.id).exec(&txn).await?;
    txn.commit().await?;

    Ok(ApiResponse::success(
        "Cart cleared",
        CartView::empty(),
        Some(Meta::empty()),
    ))
}

pub async fn checkout(
    state: &AppState,
    customer_id: i64,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<CheckoutResponse>> {
    let txn = state.orm.begin().await?;

    if Addresses::find_by_id(payload.address_id).one(&txn).await?.is_none() {
        return Err(AppError::NotFound);
    }
    if DeliveryAgents::find_by_id(payload.delivery_agent_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound);
    }

    // Lock the draft row so two concurrent checkouts cannot both transition.
    let draft = Orders::find()
        .filter(OrderCol::CustomerId.eq(customer_id))
        .filter(OrderCol::Status.eq(OrderStatus::Cart))
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::BadRequest("Cart is empty".to_string()))?;

    let item_count = OrderItems::find()
        .filter(ItemCol::OrderId.eq(draft.id))
        .count(&txn)
        .await?;
    if item_count == 0 {
        return Err(AppError::BadRequest("Cart is empty".to_string()));
    }

    let mut active: OrderActive = draft.into();
    active.status = Set(OrderStatus::Received);
    active.address_id = Set(Some(payload.address_id));
    active.delivery_agent_id = Set(Some(payload.delivery_agent_id));
    active.ordered_at = Set(Utc::now().into());
    let order = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(order_id = order.id, customer_id, "cart checked out");

    Ok(ApiResponse::success(
        "Checkout success",
        CheckoutResponse {
            order_id: order.id,
            status: order.status,
        },
        Some(Meta::empty()),
    ))
}

async fn reset_restaurant_if_empty<C: ConnectionTrait>(
    conn: &C,
    draft: OrderModel,
) -> Result<OrderModel, AppError> {
    let remaining = OrderItems::find()
        .filter(ItemCol::OrderId.eq(draft.id))
        .count(conn)
        .await?;
    if remaining == 0 && draft.restaurant_id.is_some() {
        let mut active: OrderActive = draft.into();
        active.restaurant_id = Set(None);
        let updated = active.update(conn).await?;
        return Ok(updated);
    }
    Ok(draft)
}

/// Joins each line item with its dish and price snapshot. Items whose dish or
/// price row has gone missing drop out of the join and therefore out of the
/// totals; that only rates a warning.
async fn build_cart_view(state: &AppState, draft: &OrderModel) -> AppResult<CartView> {
    let rows = sqlx::query_as::<_, CartRow>(
        r#"
        SELECT oi.id AS item_id, oi.quantity, oi.note,
               d.id AS dish_id, d.name AS dish_name, d.description AS dish_description,
               p.amount_cents AS unit_price_cents
        FROM order_items oi
        JOIN dishes d ON d.id = oi.dish_id
        JOIN prices p ON p.id = oi.price_id
        WHERE oi.order_id = $1
        ORDER BY oi.id
        "#,
    )
    .bind(draft.id)
    .fetch_all(&state.pool)
    .await?;

    let raw_count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM order_items WHERE order_id = $1")
            .bind(draft.id)
            .fetch_one(&state.pool)
            .await?;
    if raw_count.0 != rows.len() as i64 {
        tracing::warn!(
            order_id = draft.id,
            missing = raw_count.0 - rows.len() as i64,
            "cart items without dish or price omitted from view"
        );
    }

    let items: Vec<CartItemView> = rows
        .into_iter()
        .map(|row| CartItemView {
            item_id: row.item_id,
            dish_id: row.dish_id,
            dish_name: row.dish_name,
            dish_description: row.dish_description,
            unit_price_cents: row.unit_price_cents,
            quantity: row.quantity,
            note: row.note,
            item_total_cents: row.unit_price_cents * row.quantity as i64,
        })
        .collect();

    let (subtotal_cents, item_count) = cart_totals(&items);

    let restaurant_name = match draft.restaurant_id {
        Some(restaurant_id) => Restaurants::find_by_id(restaurant_id)
            .one(&state.orm)
            .await?
            .map(|r| r.name),
        None => None,
    };

    Ok(CartView {
        order_id: Some(draft.id),
        restaurant_id: draft.restaurant_id,
        restaurant_name,
        items,
        subtotal_cents,
        item_count,
    })
}

fn cart_totals(items: &[CartItemView]) -> (i64, i64) {
    let subtotal = items.iter().map(|i| i.item_total_cents).sum();
    let count = items.iter().map(|i| i.quantity as i64).sum();
    (subtotal, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i32, unit_price_cents: i64) -> CartItemView {
        CartItemView {
            item_id: 1,
            dish_id: 10,
            dish_name: "Maultaschen".into(),
            dish_description: None,
            unit_price_cents,
            quantity,
            note: None,
            item_total_cents: unit_price_cents * quantity as i64,
        }
    }

    #[test]
    fn totals_sum_lines_and_units() {
        let items = vec![item(2, 950), item(1, 1250)];
        let (subtotal, count) = cart_totals(&items);
        assert_eq!(subtotal, 2 * 950 + 1250);
        assert_eq!(count, 3);
    }

    #[test]
    fn totals_of_empty_cart_are_zero() {
        let (subtotal, count) = cart_totals(&[]);
        assert_eq!(subtotal, 0);
        assert_eq!(count, 0);
    }
}

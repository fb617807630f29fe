use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::orders::{OrderDetail, OrderList, OrderListQuery, OrderStatusView, UpdateOrderStatusRequest},
    error::AppResult,
    models::Order,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders))
        .route("/{id}", get(get_order))
        .route("/{id}/detail", get(get_order_detail))
        .route("/{id}/status", axum::routing::patch(update_status))
        .route("/customer/{customer_id}", get(list_by_customer))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "Filter by status, drafts excluded by default"),
        ("sort_order" = Option<String>, Query, description = "asc or desc by order date"),
    ),
    responses(
        (status = 200, description = "Placed orders, newest first", body = ApiResponse<OrderList>)
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    Ok(Json(order_service::list_orders(&state, query).await?))
}

#[utoipa::path(
    get,
    path = "/api/orders/customer/{customer_id}",
    params(("customer_id" = i64, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Placed orders of one customer", body = ApiResponse<OrderList>)
    ),
    tag = "Orders"
)]
pub async fn list_by_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    Ok(Json(order_service::list_by_customer(&state, customer_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "OK", body = ApiResponse<Order>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Order>>> {
    Ok(Json(order_service::get_order(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}/detail",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with lines, restaurant, agent and address", body = ApiResponse<OrderDetail>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn get_order_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    Ok(Json(order_service::get_order_detail(&state, id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    params(("id" = i64, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status advanced", body = ApiResponse<OrderStatusView>),
        (status = 400, description = "Transition not allowed"),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<OrderStatusView>>> {
    Ok(Json(order_service::update_status(&state, id, payload).await?))
}

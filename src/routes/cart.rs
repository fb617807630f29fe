use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post, put},
};

use crate::{
    dto::cart::{
        AddCartItemRequest, CartView, CheckoutRequest, CheckoutResponse, UpdateNoteRequest,
        UpdateQuantityRequest,
    },
    error::AppResult,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{customer_id}", get(get_cart))
        .route("/{customer_id}/items", post(add_item))
        .route("/{customer_id}/items/{item_id}", delete(remove_item))
        .route("/{customer_id}/items/{item_id}/quantity", put(update_quantity))
        .route("/{customer_id}/items/{item_id}/notes", put(update_note))
        .route("/{customer_id}/clear", delete(clear_cart))
        .route("/{customer_id}/checkout", post(checkout))
}

#[utoipa::path(
    get,
    path = "/api/cart/{customer_id}",
    params(("customer_id" = i64, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Current cart, created empty on first access", body = ApiResponse<CartView>),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(cart_service::get_cart(&state, customer_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/cart/{customer_id}/items",
    params(("customer_id" = i64, Path, description = "Customer ID")),
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "Item added, same dish and price merge into one line", body = ApiResponse<CartView>),
        (status = 400, description = "Unknown dish or price, or a second restaurant"),
    ),
    tag = "Cart"
)]
pub async fn add_item(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
    Json(payload): Json<AddCartItemRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(cart_service::add_item(&state, customer_id, payload).await?))
}

#[utoipa::path(
    put,
    path = "/api/cart/{customer_id}/items/{item_id}/quantity",
    params(
        ("customer_id" = i64, Path, description = "Customer ID"),
        ("item_id" = i64, Path, description = "Cart line ID"),
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Quantity updated, zero or less removes the line", body = ApiResponse<CartView>),
        (status = 404, description = "Cart line not found"),
    ),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    Path((customer_id, item_id)): Path<(i64, i64)>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(
        cart_service::update_quantity(&state, customer_id, item_id, payload).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/cart/{customer_id}/items/{item_id}/notes",
    params(
        ("customer_id" = i64, Path, description = "Customer ID"),
        ("item_id" = i64, Path, description = "Cart line ID"),
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note replaced, null clears it", body = ApiResponse<CartView>),
        (status = 404, description = "Cart line not found"),
    ),
    tag = "Cart"
)]
pub async fn update_note(
    State(state): State<AppState>,
    Path((customer_id, item_id)): Path<(i64, i64)>,
    Json(payload): Json<UpdateNoteRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(
        cart_service::update_note(&state, customer_id, item_id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{customer_id}/items/{item_id}",
    params(
        ("customer_id" = i64, Path, description = "Customer ID"),
        ("item_id" = i64, Path, description = "Cart line ID"),
    ),
    responses(
        (status = 200, description = "Line removed", body = ApiResponse<CartView>),
        (status = 404, description = "Cart line not found"),
    ),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    Path((customer_id, item_id)): Path<(i64, i64)>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(cart_service::remove_item(&state, customer_id, item_id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{customer_id}/clear",
    params(("customer_id" = i64, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Cart emptied and draft discarded", body = ApiResponse<CartView>),
    ),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(cart_service::clear_cart(&state, customer_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/cart/{customer_id}/checkout",
    params(("customer_id" = i64, Path, description = "Customer ID")),
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Cart turned into a placed order", body = ApiResponse<CheckoutResponse>),
        (status = 400, description = "Cart is empty"),
        (status = 404, description = "Address or delivery agent not found"),
    ),
    tag = "Cart"
)]
pub async fn checkout(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<CheckoutResponse>>> {
    Ok(Json(cart_service::checkout(&state, customer_id, payload).await?))
}

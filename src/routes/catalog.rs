use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    dto::catalog::{
        CreateDishRequest, CreateMenuRequest, CreatePriceRequest, DishList, MenuList, PriceList,
        UpdateDishRequest, UpdateMenuRequest, UpdatePriceRequest,
    },
    error::AppResult,
    models::{Dish, Menu, Price},
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct MenuListQuery {
    pub restaurant_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DishListQuery {
    pub menu_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PriceListQuery {
    pub dish_id: Option<i64>,
}

pub fn menus_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_menus).post(create_menu))
        .route("/{id}", get(get_menu).patch(update_menu).delete(delete_menu))
}

pub fn dishes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_dishes).post(create_dish))
        .route("/{id}", get(get_dish).patch(update_dish).delete(delete_dish))
        .route("/{id}/active-price", get(get_active_price))
}

pub fn prices_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_prices).post(create_price))
        .route("/{id}", get(get_price).patch(update_price).delete(delete_price))
}

// ===== menus =====

#[utoipa::path(
    get,
    path = "/api/menus",
    params(
        ("restaurant_id" = Option<i64>, Query, description = "Only menus of one restaurant")
    ),
    responses(
        (status = 200, description = "List menus", body = ApiResponse<MenuList>)
    ),
    tag = "Catalog"
)]
pub async fn list_menus(
    State(state): State<AppState>,
    Query(query): Query<MenuListQuery>,
) -> AppResult<Json<ApiResponse<MenuList>>> {
    Ok(Json(catalog_service::list_menus(&state, query.restaurant_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/menus/{id}",
    params(("id" = i64, Path, description = "Menu ID")),
    responses(
        (status = 200, description = "OK", body = ApiResponse<Menu>),
        (status = 404, description = "Menu not found"),
    ),
    tag = "Catalog"
)]
pub async fn get_menu(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Menu>>> {
    Ok(Json(catalog_service::get_menu(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/menus",
    request_body = CreateMenuRequest,
    responses(
        (status = 200, description = "Menu created", body = ApiResponse<Menu>),
    ),
    tag = "Catalog"
)]
pub async fn create_menu(
    State(state): State<AppState>,
    Json(payload): Json<CreateMenuRequest>,
) -> AppResult<Json<ApiResponse<Menu>>> {
    Ok(Json(catalog_service::create_menu(&state, payload).await?))
}

#[utoipa::path(
    patch,
    path = "/api/menus/{id}",
    params(("id" = i64, Path, description = "Menu ID")),
    request_body = UpdateMenuRequest,
    responses(
        (status = 200, description = "Menu updated", body = ApiResponse<Menu>),
        (status = 404, description = "Menu not found"),
    ),
    tag = "Catalog"
)]
pub async fn update_menu(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateMenuRequest>,
) -> AppResult<Json<ApiResponse<Menu>>> {
    Ok(Json(catalog_service::update_menu(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/menus/{id}",
    params(("id" = i64, Path, description = "Menu ID")),
    responses(
        (status = 200, description = "Menu deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Menu not found"),
    ),
    tag = "Catalog"
)]
pub async fn delete_menu(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(catalog_service::delete_menu(&state, id).await?))
}

// ===== dishes =====

#[utoipa::path(
    get,
    path = "/api/dishes",
    params(
        ("menu_id" = Option<i64>, Query, description = "Only dishes of one menu")
    ),
    responses(
        (status = 200, description = "List dishes", body = ApiResponse<DishList>)
    ),
    tag = "Catalog"
)]
pub async fn list_dishes(
    State(state): State<AppState>,
    Query(query): Query<DishListQuery>,
) -> AppResult<Json<ApiResponse<DishList>>> {
    Ok(Json(catalog_service::list_dishes(&state, query.menu_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/dishes/{id}",
    params(("id" = i64, Path, description = "Dish ID")),
    responses(
        (status = 200, description = "OK", body = ApiResponse<Dish>),
        (status = 404, description = "Dish not found"),
    ),
    tag = "Catalog"
)]
pub async fn get_dish(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Dish>>> {
    Ok(Json(catalog_service::get_dish(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/dishes",
    request_body = CreateDishRequest,
    responses(
        (status = 200, description = "Dish created", body = ApiResponse<Dish>),
    ),
    tag = "Catalog"
)]
pub async fn create_dish(
    State(state): State<AppState>,
    Json(payload): Json<CreateDishRequest>,
) -> AppResult<Json<ApiResponse<Dish>>> {
    Ok(Json(catalog_service::create_dish(&state, payload).await?))
}

#[utoipa::path(
    patch,
    path = "/api/dishes/{id}",
    params(("id" = i64, Path, description = "Dish ID")),
    request_body = UpdateDishRequest,
    responses(
        (status = 200, description = "Dish updated", body = ApiResponse<Dish>),
        (status = 404, description = "Dish not found"),
    ),
    tag = "Catalog"
)]
pub async fn update_dish(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateDishRequest>,
) -> AppResult<Json<ApiResponse<Dish>>> {
    Ok(Json(catalog_service::update_dish(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/dishes/{id}",
    params(("id" = i64, Path, description = "Dish ID")),
    responses(
        (status = 200, description = "Dish deactivated, history stays intact", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Dish not found"),
    ),
    tag = "Catalog"
)]
pub async fn delete_dish(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(catalog_service::delete_dish(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/dishes/{id}/active-price",
    params(("id" = i64, Path, description = "Dish ID")),
    responses(
        (status = 200, description = "The active price of the dish", body = ApiResponse<Price>),
        (status = 404, description = "Dish has no active price"),
    ),
    tag = "Catalog"
)]
pub async fn get_active_price(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Price>>> {
    Ok(Json(catalog_service::get_active_price(&state, id).await?))
}

// ===== prices =====

#[utoipa::path(
    get,
    path = "/api/prices",
    params(
        ("dish_id" = Option<i64>, Query, description = "Only prices of one dish")
    ),
    responses(
        (status = 200, description = "List prices", body = ApiResponse<PriceList>)
    ),
    tag = "Catalog"
)]
pub async fn list_prices(
    State(state): State<AppState>,
    Query(query): Query<PriceListQuery>,
) -> AppResult<Json<ApiResponse<PriceList>>> {
    Ok(Json(catalog_service::list_prices(&state, query.dish_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/prices/{id}",
    params(("id" = i64, Path, description = "Price ID")),
    responses(
        (status = 200, description = "OK", body = ApiResponse<Price>),
        (status = 404, description = "Price not found"),
    ),
    tag = "Catalog"
)]
pub async fn get_price(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Price>>> {
    Ok(Json(catalog_service::get_price(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/prices",
    request_body = CreatePriceRequest,
    responses(
        (status = 200, description = "Price created, an active one displaces the previous", body = ApiResponse<Price>),
        (status = 400, description = "Negative amount"),
    ),
    tag = "Catalog"
)]
pub async fn create_price(
    State(state): State<AppState>,
    Json(payload): Json<CreatePriceRequest>,
) -> AppResult<Json<ApiResponse<Price>>> {
    Ok(Json(catalog_service::create_price(&state, payload).await?))
}

#[utoipa::path(
    patch,
    path = "/api/prices/{id}",
    params(("id" = i64, Path, description = "Price ID")),
    request_body = UpdatePriceRequest,
    responses(
        (status = 200, description = "Price updated", body = ApiResponse<Price>),
        (status = 400, description = "Negative amount"),
        (status = 404, description = "Price not found"),
    ),
    tag = "Catalog"
)]
pub async fn update_price(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePriceRequest>,
) -> AppResult<Json<ApiResponse<Price>>> {
    Ok(Json(catalog_service::update_price(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/prices/{id}",
    params(("id" = i64, Path, description = "Price ID")),
    responses(
        (status = 200, description = "Price deactivated", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Price not found"),
    ),
    tag = "Catalog"
)]
pub async fn delete_price(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(catalog_service::delete_price(&state, id).await?))
}

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::addresses::{AddressList, CreateAddressRequest, PostalCodeQuery, UpdateAddressRequest},
    error::AppResult,
    models::Address,
    response::ApiResponse,
    services::address_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_addresses).post(create_address))
        .route("/search", get(search_addresses))
        .route(
            "/{id}",
            get(get_address).patch(update_address).delete(delete_address),
        )
}

#[utoipa::path(
    get,
    path = "/api/addresses",
    responses(
        (status = 200, description = "List all addresses", body = ApiResponse<AddressList>)
    ),
    tag = "Addresses"
)]
pub async fn list_addresses(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<AddressList>>> {
    Ok(Json(address_service::list_addresses(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/addresses/search",
    params(
        ("postal_code" = String, Query, description = "Exact postal code")
    ),
    responses(
        (status = 200, description = "Addresses matching the postal code", body = ApiResponse<AddressList>)
    ),
    tag = "Addresses"
)]
pub async fn search_addresses(
    State(state): State<AppState>,
    Query(query): Query<PostalCodeQuery>,
) -> AppResult<Json<ApiResponse<AddressList>>> {
    Ok(Json(
        address_service::search_by_postal_code(&state, &query.postal_code).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/addresses/{id}",
    params(("id" = i64, Path, description = "Address ID")),
    responses(
        (status = 200, description = "OK", body = ApiResponse<Address>),
        (status = 404, description = "Address not found"),
    ),
    tag = "Addresses"
)]
pub async fn get_address(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Address>>> {
    Ok(Json(address_service::get_address(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/addresses",
    request_body = CreateAddressRequest,
    responses(
        (status = 200, description = "Address created", body = ApiResponse<Address>),
    ),
    tag = "Addresses"
)]
pub async fn create_address(
    State(state): State<AppState>,
    Json(payload): Json<CreateAddressRequest>,
) -> AppResult<Json<ApiResponse<Address>>> {
    Ok(Json(address_service::create_address(&state, payload).await?))
}

#[utoipa::path(
    patch,
    path = "/api/addresses/{id}",
    params(("id" = i64, Path, description = "Address ID")),
    request_body = UpdateAddressRequest,
    responses(
        (status = 200, description = "Updated address; a shared address comes back with a new id", body = ApiResponse<Address>),
        (status = 404, description = "Address not found"),
    ),
    tag = "Addresses"
)]
pub async fn update_address(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAddressRequest>,
) -> AppResult<Json<ApiResponse<Address>>> {
    Ok(Json(address_service::update_address(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/addresses/{id}",
    params(("id" = i64, Path, description = "Address ID")),
    responses(
        (status = 200, description = "Address deleted", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Address is still referenced"),
        (status = 404, description = "Address not found"),
    ),
    tag = "Addresses"
)]
pub async fn delete_address(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(address_service::delete_address(&state, id).await?))
}

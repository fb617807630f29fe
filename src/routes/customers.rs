use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};

use crate::{
    dto::customers::{
        AddressPayload, CreateCriticRequest, CreateCustomerRequest, CreateDeliveryAgentRequest,
        CriticList, CustomerList, DeliveryAgentList, UpdateCriticRequest, UpdateCustomerRequest,
        UpdateDeliveryAgentRequest,
    },
    error::AppResult,
    models::{Address, Critic, Customer, DeliveryAgent},
    response::ApiResponse,
    services::customer_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/{id}",
            get(get_customer).patch(update_customer).delete(delete_customer),
        )
        .route("/{id}/address", put(update_customer_address))
}

pub fn critics_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_critics).post(create_critic))
        .route(
            "/{id}",
            get(get_critic).patch(update_critic).delete(delete_critic),
        )
}

pub fn delivery_agents_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_delivery_agents).post(create_delivery_agent))
        .route(
            "/{id}",
            get(get_delivery_agent)
                .patch(update_delivery_agent)
                .delete(delete_delivery_agent),
        )
}

// ===== customers =====

#[utoipa::path(
    get,
    path = "/api/customers",
    responses(
        (status = 200, description = "List all customers", body = ApiResponse<CustomerList>)
    ),
    tag = "Customers"
)]
pub async fn list_customers(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CustomerList>>> {
    Ok(Json(customer_service::list_customers(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    params(("id" = i64, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "OK", body = ApiResponse<Customer>),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Customers"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    Ok(Json(customer_service::get_customer(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 200, description = "Customer created", body = ApiResponse<Customer>),
        (status = 400, description = "Referenced address does not exist"),
    ),
    tag = "Customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerRequest>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    Ok(Json(customer_service::create_customer(&state, payload).await?))
}

#[utoipa::path(
    patch,
    path = "/api/customers/{id}",
    params(("id" = i64, Path, description = "Customer ID")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = ApiResponse<Customer>),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Customers"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    Ok(Json(customer_service::update_customer(&state, id, payload).await?))
}

#[utoipa::path(
    put,
    path = "/api/customers/{id}/address",
    params(("id" = i64, Path, description = "Customer ID")),
    request_body = AddressPayload,
    responses(
        (status = 200, description = "Address linked or rewritten copy-on-write", body = ApiResponse<Address>),
        (status = 400, description = "Referenced address does not exist"),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Customers"
)]
pub async fn update_customer_address(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AddressPayload>,
) -> AppResult<Json<ApiResponse<Address>>> {
    Ok(Json(
        customer_service::update_customer_address(&state, id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    params(("id" = i64, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Customers"
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(customer_service::delete_customer(&state, id).await?))
}

// ===== critics =====

#[utoipa::path(
    get,
    path = "/api/critics",
    responses(
        (status = 200, description = "List all critics", body = ApiResponse<CriticList>)
    ),
    tag = "Critics"
)]
pub async fn list_critics(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CriticList>>> {
    Ok(Json(customer_service::list_critics(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/critics/{id}",
    params(("id" = i64, Path, description = "Critic ID")),
    responses(
        (status = 200, description = "OK", body = ApiResponse<Critic>),
        (status = 404, description = "Critic not found"),
    ),
    tag = "Critics"
)]
pub async fn get_critic(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Critic>>> {
    Ok(Json(customer_service::get_critic(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/critics",
    request_body = CreateCriticRequest,
    responses(
        (status = 200, description = "Critic created", body = ApiResponse<Critic>),
        (status = 400, description = "Referenced customer does not exist"),
    ),
    tag = "Critics"
)]
pub async fn create_critic(
    State(state): State<AppState>,
    Json(payload): Json<CreateCriticRequest>,
) -> AppResult<Json<ApiResponse<Critic>>> {
    Ok(Json(customer_service::create_critic(&state, payload).await?))
}

#[utoipa::path(
    patch,
    path = "/api/critics/{id}",
    params(("id" = i64, Path, description = "Critic ID")),
    request_body = UpdateCriticRequest,
    responses(
        (status = 200, description = "Critic updated", body = ApiResponse<Critic>),
        (status = 404, description = "Critic not found"),
    ),
    tag = "Critics"
)]
pub async fn update_critic(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCriticRequest>,
) -> AppResult<Json<ApiResponse<Critic>>> {
    Ok(Json(customer_service::update_critic(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/critics/{id}",
    params(("id" = i64, Path, description = "Critic ID")),
    responses(
        (status = 200, description = "Critic deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Critic not found"),
    ),
    tag = "Critics"
)]
pub async fn delete_critic(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(customer_service::delete_critic(&state, id).await?))
}

// ===== delivery agents =====

#[utoipa::path(
    get,
    path = "/api/delivery-agents",
    responses(
        (status = 200, description = "List all delivery agents", body = ApiResponse<DeliveryAgentList>)
    ),
    tag = "DeliveryAgents"
)]
pub async fn list_delivery_agents(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DeliveryAgentList>>> {
    Ok(Json(customer_service::list_delivery_agents(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/delivery-agents/{id}",
    params(("id" = i64, Path, description = "Delivery agent ID")),
    responses(
        (status = 200, description = "OK", body = ApiResponse<DeliveryAgent>),
        (status = 404, description = "Delivery agent not found"),
    ),
    tag = "DeliveryAgents"
)]
pub async fn get_delivery_agent(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<DeliveryAgent>>> {
    Ok(Json(customer_service::get_delivery_agent(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/delivery-agents",
    request_body = CreateDeliveryAgentRequest,
    responses(
        (status = 200, description = "Delivery agent created", body = ApiResponse<DeliveryAgent>),
    ),
    tag = "DeliveryAgents"
)]
pub async fn create_delivery_agent(
    State(state): State<AppState>,
    Json(payload): Json<CreateDeliveryAgentRequest>,
) -> AppResult<Json<ApiResponse<DeliveryAgent>>> {
    Ok(Json(
        customer_service::create_delivery_agent(&state, payload).await?,
    ))
}

#[utoipa::path(
    patch,
    path = "/api/delivery-agents/{id}",
    params(("id" = i64, Path, description = "Delivery agent ID")),
    request_body = UpdateDeliveryAgentRequest,
    responses(
        (status = 200, description = "Delivery agent updated", body = ApiResponse<DeliveryAgent>),
        (status = 404, description = "Delivery agent not found"),
    ),
    tag = "DeliveryAgents"
)]
pub async fn update_delivery_agent(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateDeliveryAgentRequest>,
) -> AppResult<Json<ApiResponse<DeliveryAgent>>> {
    Ok(Json(
        customer_service::update_delivery_agent(&state, id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/delivery-agents/{id}",
    params(("id" = i64, Path, description = "Delivery agent ID")),
    responses(
        (status = 200, description = "Delivery agent deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Delivery agent not found"),
    ),
    tag = "DeliveryAgents"
)]
pub async fn delete_delivery_agent(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(customer_service::delete_delivery_agent(&state, id).await?))
}

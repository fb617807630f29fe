use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::ratings::{
        CreateCriticRatingRequest, CreateCustomerRatingRequest, CriticRatingList,
        CustomerRatingList, UpdateCriticRatingRequest, UpdateCustomerRatingRequest,
    },
    error::AppResult,
    models::{CriticRating, CustomerRating},
    response::ApiResponse,
    services::rating_service,
    state::AppState,
};

pub fn customer_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customer_ratings).post(create_customer_rating))
        .route(
            "/{id}",
            get(get_customer_rating)
                .patch(update_customer_rating)
                .delete(delete_customer_rating),
        )
}

pub fn critic_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_critic_ratings).post(create_critic_rating))
        .route(
            "/{id}",
            get(get_critic_rating)
                .patch(update_critic_rating)
                .delete(delete_critic_rating),
        )
}

// ===== customer ratings =====

#[utoipa::path(
    get,
    path = "/api/customer-ratings",
    responses(
        (status = 200, description = "List active customer ratings", body = ApiResponse<CustomerRatingList>)
    ),
    tag = "Ratings"
)]
pub async fn list_customer_ratings(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CustomerRatingList>>> {
    Ok(Json(rating_service::list_customer_ratings(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/customer-ratings/{id}",
    params(("id" = i64, Path, description = "Rating ID")),
    responses(
        (status = 200, description = "OK", body = ApiResponse<CustomerRating>),
        (status = 404, description = "Rating not found"),
    ),
    tag = "Ratings"
)]
pub async fn get_customer_rating(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<CustomerRating>>> {
    Ok(Json(rating_service::get_customer_rating(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/customer-ratings",
    request_body = CreateCustomerRatingRequest,
    responses(
        (status = 200, description = "Rating created", body = ApiResponse<CustomerRating>),
        (status = 400, description = "Score outside 1 to 5"),
    ),
    tag = "Ratings"
)]
pub async fn create_customer_rating(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerRatingRequest>,
) -> AppResult<Json<ApiResponse<CustomerRating>>> {
    Ok(Json(rating_service::create_customer_rating(&state, payload).await?))
}

#[utoipa::path(
    patch,
    path = "/api/customer-ratings/{id}",
    params(("id" = i64, Path, description = "Rating ID")),
    request_body = UpdateCustomerRatingRequest,
    responses(
        (status = 200, description = "Rating updated", body = ApiResponse<CustomerRating>),
        (status = 400, description = "Score outside 1 to 5"),
        (status = 404, description = "Rating not found"),
    ),
    tag = "Ratings"
)]
pub async fn update_customer_rating(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCustomerRatingRequest>,
) -> AppResult<Json<ApiResponse<CustomerRating>>> {
    Ok(Json(
        rating_service::update_customer_rating(&state, id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/customer-ratings/{id}",
    params(("id" = i64, Path, description = "Rating ID")),
    responses(
        (status = 200, description = "Rating retired from aggregates", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Rating not found"),
    ),
    tag = "Ratings"
)]
pub async fn delete_customer_rating(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(rating_service::delete_customer_rating(&state, id).await?))
}

// ===== critic ratings =====

#[utoipa::path(
    get,
    path = "/api/critic-ratings",
    responses(
        (status = 200, description = "List active critic ratings", body = ApiResponse<CriticRatingList>)
    ),
    tag = "Ratings"
)]
pub async fn list_critic_ratings(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CriticRatingList>>> {
    Ok(Json(rating_service::list_critic_ratings(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/critic-ratings/{id}",
    params(("id" = i64, Path, description = "Rating ID")),
    responses(
        (status = 200, description = "OK", body = ApiResponse<CriticRating>),
        (status = 404, description = "Rating not found"),
    ),
    tag = "Ratings"
)]
pub async fn get_critic_rating(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<CriticRating>>> {
    Ok(Json(rating_service::get_critic_rating(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/critic-ratings",
    request_body = CreateCriticRatingRequest,
    responses(
        (status = 200, description = "Rating created", body = ApiResponse<CriticRating>),
        (status = 400, description = "Score outside 1 to 5"),
    ),
    tag = "Ratings"
)]
pub async fn create_critic_rating(
    State(state): State<AppState>,
    Json(payload): Json<CreateCriticRatingRequest>,
) -> AppResult<Json<ApiResponse<CriticRating>>> {
    Ok(Json(rating_service::create_critic_rating(&state, payload).await?))
}

#[utoipa::path(
    patch,
    path = "/api/critic-ratings/{id}",
    params(("id" = i64, Path, description = "Rating ID")),
    request_body = UpdateCriticRatingRequest,
    responses(
        (status = 200, description = "Rating updated", body = ApiResponse<CriticRating>),
        (status = 400, description = "Score outside 1 to 5"),
        (status = 404, description = "Rating not found"),
    ),
    tag = "Ratings"
)]
pub async fn update_critic_rating(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCriticRatingRequest>,
) -> AppResult<Json<ApiResponse<CriticRating>>> {
    Ok(Json(
        rating_service::update_critic_rating(&state, id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/critic-ratings/{id}",
    params(("id" = i64, Path, description = "Rating ID")),
    responses(
        (status = 200, description = "Rating retired from aggregates", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Rating not found"),
    ),
    tag = "Ratings"
)]
pub async fn delete_critic_rating(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(rating_service::delete_critic_rating(&state, id).await?))
}

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};

use crate::{
    dto::{
        hours::{AssignTemplateRequest, TemplateWithDetails},
        ratings::{
            BulkSummaryRequest, CriticHighlightList, CustomerFavoriteList, RatingsSummary,
            RatingsSummaryList,
        },
        restaurants::{
            CreateRestaurantRequest, RestaurantDetail, RestaurantList, RestaurantQuery,
            UpdateRestaurantRequest,
        },
    },
    error::AppResult,
    models::Restaurant,
    response::ApiResponse,
    services::{rating_service, restaurant_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_restaurants).post(create_restaurant))
        .route("/ratings-summary", post(ratings_summary_bulk))
        .route(
            "/{id}",
            get(get_restaurant)
                .patch(update_restaurant)
                .delete(delete_restaurant),
        )
        .route("/{id}/detail", get(get_restaurant_detail))
        .route("/{id}/hours", get(get_restaurant_hours).put(assign_hours_template))
        .route("/{id}/ratings-summary", get(ratings_summary))
        .route("/{id}/critic-highlights", get(critic_highlights))
        .route("/{id}/customer-favorites", get(customer_favorites))
}

#[utoipa::path(
    get,
    path = "/api/restaurants",
    params(
        ("name" = Option<String>, Query, description = "Case-insensitive name fragment"),
        ("classification" = Option<String>, Query, description = "Exact classification"),
    ),
    responses(
        (status = 200, description = "List restaurants", body = ApiResponse<RestaurantList>)
    ),
    tag = "Restaurants"
)]
pub async fn list_restaurants(
    State(state): State<AppState>,
    Query(query): Query<RestaurantQuery>,
) -> AppResult<Json<ApiResponse<RestaurantList>>> {
    Ok(Json(restaurant_service::list_restaurants(&state, query).await?))
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}",
    params(("id" = i64, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "OK", body = ApiResponse<Restaurant>),
        (status = 404, description = "Restaurant not found"),
    ),
    tag = "Restaurants"
)]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    Ok(Json(restaurant_service::get_restaurant(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/detail",
    params(("id" = i64, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Restaurant with address and full menu tree", body = ApiResponse<RestaurantDetail>),
        (status = 404, description = "Restaurant not found"),
    ),
    tag = "Restaurants"
)]
pub async fn get_restaurant_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<RestaurantDetail>>> {
    Ok(Json(restaurant_service::get_restaurant_detail(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/restaurants",
    request_body = CreateRestaurantRequest,
    responses(
        (status = 200, description = "Restaurant created", body = ApiResponse<Restaurant>),
    ),
    tag = "Restaurants"
)]
pub async fn create_restaurant(
    State(state): State<AppState>,
    Json(payload): Json<CreateRestaurantRequest>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    Ok(Json(restaurant_service::create_restaurant(&state, payload).await?))
}

#[utoipa::path(
    patch,
    path = "/api/restaurants/{id}",
    params(("id" = i64, Path, description = "Restaurant ID")),
    request_body = UpdateRestaurantRequest,
    responses(
        (status = 200, description = "Restaurant updated", body = ApiResponse<Restaurant>),
        (status = 404, description = "Restaurant not found"),
    ),
    tag = "Restaurants"
)]
pub async fn update_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRestaurantRequest>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    Ok(Json(
        restaurant_service::update_restaurant(&state, id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/restaurants/{id}",
    params(("id" = i64, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Restaurant deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Restaurant not found"),
    ),
    tag = "Restaurants"
)]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(restaurant_service::delete_restaurant(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/hours",
    params(("id" = i64, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Opening hours templates assigned to the restaurant", body = ApiResponse<Vec<TemplateWithDetails>>),
        (status = 404, description = "Restaurant not found"),
    ),
    tag = "Restaurants"
)]
pub async fn get_restaurant_hours(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Vec<TemplateWithDetails>>>> {
    Ok(Json(restaurant_service::get_restaurant_hours(&state, id).await?))
}

#[utoipa::path(
    put,
    path = "/api/restaurants/{id}/hours",
    params(("id" = i64, Path, description = "Restaurant ID")),
    request_body = AssignTemplateRequest,
    responses(
        (status = 200, description = "Template assigned", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Restaurant or template not found"),
    ),
    tag = "Restaurants"
)]
pub async fn assign_hours_template(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AssignTemplateRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(
        restaurant_service::assign_hours_template(&state, id, payload.template_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/ratings-summary",
    params(("id" = i64, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Customer and critic rating aggregates", body = ApiResponse<RatingsSummary>),
        (status = 404, description = "Restaurant not found"),
    ),
    tag = "Ratings"
)]
pub async fn ratings_summary(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<RatingsSummary>>> {
    Ok(Json(rating_service::ratings_summary(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/restaurants/ratings-summary",
    request_body = BulkSummaryRequest,
    responses(
        (status = 200, description = "Rating aggregates for many restaurants at once", body = ApiResponse<RatingsSummaryList>),
    ),
    tag = "Ratings"
)]
pub async fn ratings_summary_bulk(
    State(state): State<AppState>,
    Json(payload): Json<BulkSummaryRequest>,
) -> AppResult<Json<ApiResponse<RatingsSummaryList>>> {
    Ok(Json(rating_service::ratings_summary_bulk(&state, payload).await?))
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/critic-highlights",
    params(("id" = i64, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Up to five critic-approved dishes rated 4.0 or better", body = ApiResponse<CriticHighlightList>),
        (status = 404, description = "Restaurant not found"),
    ),
    tag = "Ratings"
)]
pub async fn critic_highlights(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<CriticHighlightList>>> {
    Ok(Json(rating_service::critic_highlights(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/customer-favorites",
    params(("id" = i64, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Top customer-rated dishes with sample comments", body = ApiResponse<CustomerFavoriteList>),
        (status = 404, description = "Restaurant not found"),
    ),
    tag = "Ratings"
)]
pub async fn customer_favorites(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<CustomerFavoriteList>>> {
    Ok(Json(rating_service::customer_favorites(&state, id).await?))
}

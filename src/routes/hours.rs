use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::hours::{CreateTemplateRequest, TemplateList, TemplateWithDetails, UpdateTemplateRequest},
    error::AppResult,
    response::ApiResponse,
    services::hours_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_templates).post(create_template))
        .route(
            "/{id}",
            get(get_template).patch(update_template).delete(delete_template),
        )
}

#[utoipa::path(
    get,
    path = "/api/hours-templates",
    responses(
        (status = 200, description = "List opening hours templates", body = ApiResponse<TemplateList>)
    ),
    tag = "OpeningHours"
)]
pub async fn list_templates(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<TemplateList>>> {
    Ok(Json(hours_service::list_templates(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/hours-templates/{id}",
    params(("id" = i64, Path, description = "Template ID")),
    responses(
        (status = 200, description = "OK", body = ApiResponse<TemplateWithDetails>),
        (status = 404, description = "Template not found"),
    ),
    tag = "OpeningHours"
)]
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<TemplateWithDetails>>> {
    Ok(Json(hours_service::get_template(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/hours-templates",
    request_body = CreateTemplateRequest,
    responses(
        (status = 200, description = "Template created with its weekday slots", body = ApiResponse<TemplateWithDetails>),
        (status = 400, description = "Weekday out of range or inverted time window"),
    ),
    tag = "OpeningHours"
)]
pub async fn create_template(
    State(state): State<AppState>,
    Json(payload): Json<CreateTemplateRequest>,
) -> AppResult<Json<ApiResponse<TemplateWithDetails>>> {
    Ok(Json(hours_service::create_template(&state, payload).await?))
}

#[utoipa::path(
    patch,
    path = "/api/hours-templates/{id}",
    params(("id" = i64, Path, description = "Template ID")),
    request_body = UpdateTemplateRequest,
    responses(
        (status = 200, description = "Template updated, supplied slots replace the old set", body = ApiResponse<TemplateWithDetails>),
        (status = 404, description = "Template not found"),
    ),
    tag = "OpeningHours"
)]
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTemplateRequest>,
) -> AppResult<Json<ApiResponse<TemplateWithDetails>>> {
    Ok(Json(hours_service::update_template(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/hours-templates/{id}",
    params(("id" = i64, Path, description = "Template ID")),
    responses(
        (status = 200, description = "Template deleted", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Template is still assigned"),
        (status = 404, description = "Template not found"),
    ),
    tag = "OpeningHours"
)]
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(hours_service::delete_template(&state, id).await?))
}

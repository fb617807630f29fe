use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::{
    dto::hours::{
        CreateTemplateRequest, DetailInput, TemplateList, TemplateWithDetails,
        UpdateTemplateRequest,
    },
    entity::{
        opening_hours_details::{
            ActiveModel as DetailActive, Column as DetailCol, Entity as OpeningHoursDetails,
            Model as DetailModel,
        },
        opening_hours_templates::{
            ActiveModel as TemplateActive, Entity as OpeningHoursTemplates,
            Model as TemplateModel,
        },
        restaurant_hours::{Column as LinkCol, Entity as RestaurantHours},
    },
    error::{AppError, AppResult},
    models::{OpeningHoursDetail, OpeningHoursTemplate},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_templates(state: &AppState) -> AppResult<ApiResponse<TemplateList>> {
    let templates = OpeningHoursTemplates::find().all(&state.orm).await?;
    let mut items = Vec::with_capacity(templates.len());
    for template in templates {
        items.push(template_with_details(state, template).await?);
    }
    Ok(ApiResponse::success("OK", TemplateList { items }, Some(Meta::empty())))
}

pub async fn get_template(state: &AppState, id: i64) -> AppResult<ApiResponse<TemplateWithDetails>> {
    let template = OpeningHoursTemplates::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let detailed = template_with_details(state, template).await?;
    Ok(ApiResponse::success("OK", detailed, None))
}

pub async fn create_template(
    state: &AppState,
    payload: CreateTemplateRequest,
) -> AppResult<ApiResponse<TemplateWithDetails>> {
    validate_details(&payload.details)?;

    let txn = state.orm.begin().await?;
    let template = TemplateActive {
        id: NotSet,
        name: Set(payload.name),
        description: Set(payload.description),
    }
    .insert(&txn)
    .await?;
    let details = insert_details(&txn, template.id, &payload.details).await?;
    txn.commit().await?;

    Ok(ApiResponse::success(
        "Template created",
        TemplateWithDetails {
            template: template_from_entity(template),
            details: details.into_iter().map(detail_from_entity).collect(),
        },
        None,
    ))
}

pub async fn update_template(
    state: &AppState,
    id: i64,
    payload: UpdateTemplateRequest,
) -> AppResult<ApiResponse<TemplateWithDetails>> {
    let template = OpeningHoursTemplates::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let txn = state.orm.begin().await?;
    let mut active: TemplateActive = template.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    let updated = active.update(&txn).await?;

    if let Some(details) = payload.details {
        validate_details(&details)?;
        OpeningHoursDetails::delete_many()
            .filter(DetailCol::TemplateId.eq(id))
            .exec(&txn)
            .await?;
        insert_details(&txn, id, &details).await?;
    }
    txn.commit().await?;

    let detailed = template_with_details(state, updated).await?;
    Ok(ApiResponse::success("Template updated", detailed, None))
}

pub async fn delete_template(
    state: &AppState,
    id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let template = OpeningHoursTemplates::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let assigned = RestaurantHours::find()
        .filter(LinkCol::TemplateId.eq(id))
        .count(&state.orm)
        .await?;
    if assigned > 0 {
        return Err(AppError::BadRequest(
            "Template is still assigned to a restaurant".to_string(),
        ));
    }

    template.delete(&state.orm).await?;
    Ok(ApiResponse::success(
        "Template deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn template_with_details(
    state: &AppState,
    template: TemplateModel,
) -> AppResult<TemplateWithDetails> {
    let details = OpeningHoursDetails::find()
        .filter(DetailCol::TemplateId.eq(template.id))
        .order_by_asc(DetailCol::Weekday)
        .order_by_asc(DetailCol::OpensAt)
        .all(&state.orm)
        .await?;
    Ok(TemplateWithDetails {
        template: template_from_entity(template),
        details: details.into_iter().map(detail_from_entity).collect(),
    })
}

async fn insert_details<C: ConnectionTrait>(
    conn: &C,
    template_id: i64,
    details: &[DetailInput],
) -> Result<Vec<DetailModel>, AppError> {
    let mut inserted = Vec::with_capacity(details.len());
    for detail in details {
        let model = DetailActive {
            id: NotSet,
            template_id: Set(template_id),
            weekday: Set(detail.weekday),
            opens_at: Set(detail.opens_at),
            closes_at: Set(detail.closes_at),
        }
        .insert(conn)
        .await?;
        inserted.push(model);
    }
    Ok(inserted)
}

fn validate_details(details: &[DetailInput]) -> Result<(), AppError> {
    for detail in details {
        if !(0..=6).contains(&detail.weekday) {
            return Err(AppError::BadRequest(
                "weekday must be between 0 and 6".to_string(),
            ));
        }
        if detail.closes_at <= detail.opens_at {
            return Err(AppError::BadRequest(
                "closing time must come after opening time".to_string(),
            ));
        }
    }
    Ok(())
}

pub fn template_from_entity(model: TemplateModel) -> OpeningHoursTemplate {
    OpeningHoursTemplate {
        id: model.id,
        name: model.name,
        description: model.description,
    }
}

pub fn detail_from_entity(model: DetailModel) -> OpeningHoursDetail {
    OpeningHoursDetail {
        id: model.id,
        template_id: model.template_id,
        weekday: model.weekday,
        opens_at: model.opens_at,
        closes_at: model.closes_at,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;

    fn detail(weekday: i16, opens: (u32, u32), closes: (u32, u32)) -> DetailInput {
        DetailInput {
            weekday,
            opens_at: NaiveTime::from_hms_opt(opens.0, opens.1, 0).unwrap(),
            closes_at: NaiveTime::from_hms_opt(closes.0, closes.1, 0).unwrap(),
        }
    }

    #[test]
    fn rejects_weekday_out_of_range() {
        let result = validate_details(&[detail(7, (9, 0), (17, 0))]);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn rejects_inverted_time_window() {
        let result = validate_details(&[detail(0, (18, 0), (9, 0))]);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn accepts_regular_week() {
        let details: Vec<_> = (0..5).map(|d| detail(d, (11, 30), (22, 0))).collect();
        assert!(validate_details(&details).is_ok());
    }
}

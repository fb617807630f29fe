use std::collections::HashMap;

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::{
    dto::ratings::{
        BulkSummaryRequest, CreateCriticRatingRequest, CreateCustomerRatingRequest,
        CriticHighlight, CriticHighlightList, CriticRatingList, CustomerFavorite,
        CustomerFavoriteList, CustomerRatingList, RatingsSummary, RatingsSummaryList,
        SourceAggregate, UpdateCriticRatingRequest, UpdateCustomerRatingRequest,
    },
    entity::{
        critic_ratings::{ActiveModel as CriticRatingActive, Column as CriticRatingCol,
                         Entity as CriticRatings, Model as CriticRatingModel},
        customer_ratings::{ActiveModel as CustomerRatingActive, Column as CustomerRatingCol,
                           Entity as CustomerRatings, Model as CustomerRatingModel},
        dishes, Dishes, Restaurants,
    },
    error::{AppError, AppResult},
    models::{CriticRating, CustomerRating},
    response::{ApiResponse, Meta},
    state::AppState,
};

const HIGHLIGHT_THRESHOLD: f64 = 4.0;
const HIGHLIGHT_LIMIT: usize = 5;
const SAMPLE_COMMENTS: usize = 3;

// ===== customer rating CRUD =====

pub async fn list_customer_ratings(state: &AppState) -> AppResult<ApiResponse<CustomerRatingList>> {
    let items = CustomerRatings::find()
        .filter(CustomerRatingCol::IsActive.eq(true))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(customer_rating_from_entity)
        .collect();
    Ok(ApiResponse::success("OK", CustomerRatingList { items }, Some(Meta::empty())))
}

pub async fn get_customer_rating(
    state: &AppState,
    id: i64,
) -> AppResult<ApiResponse<CustomerRating>> {
    let rating = CustomerRatings::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", customer_rating_from_entity(rating), None))
}

pub async fn create_customer_rating(
    state: &AppState,
    payload: CreateCustomerRatingRequest,
) -> AppResult<ApiResponse<CustomerRating>> {
    check_score(payload.rating)?;
    let rating = CustomerRatingActive {
        id: NotSet,
        customer_id: Set(payload.customer_id),
        dish_id: Set(payload.dish_id),
        rating: Set(payload.rating),
        comment: Set(payload.comment),
        created_at: Set(Utc::now().into()),
        is_active: Set(true),
    }
    .insert(&state.orm)
    .await?;
    Ok(ApiResponse::success(
        "Rating created",
        customer_rating_from_entity(rating),
        None,
    ))
}

pub async fn update_customer_rating(
    state: &AppState,
    id: i64,
    payload: UpdateCustomerRatingRequest,
) -> AppResult<ApiResponse<CustomerRating>> {
    let rating = CustomerRatings::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: CustomerRatingActive = rating.into();
    if let Some(score) = payload.rating {
        check_score(score)?;
        active.rating = Set(score);
    }
    if let Some(comment) = payload.comment {
        active.comment = Set(Some(comment));
    }
    let updated = active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Rating updated",
        customer_rating_from_entity(updated),
        None,
    ))
}

/// Soft delete; aggregation and listings only look at active rows.
pub async fn delete_customer_rating(
    state: &AppState,
    id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let rating = CustomerRatings::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut active: CustomerRatingActive = rating.into();
    active.is_active = Set(false);
    active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Rating deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

// ===== critic rating CRUD =====

pub async fn list_critic_ratings(state: &AppState) -> AppResult<ApiResponse<CriticRatingList>> {
    let items = CriticRatings::find()
        .filter(CriticRatingCol::IsActive.eq(true))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(critic_rating_from_entity)
        .collect();
    Ok(ApiResponse::success("OK", CriticRatingList { items }, Some(Meta::empty())))
}

pub async fn get_critic_rating(state: &AppState, id: i64) -> AppResult<ApiResponse<CriticRating>> {
    let rating = CriticRatings::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", critic_rating_from_entity(rating), None))
}

pub async fn create_critic_rating(
    state: &AppState,
    payload: CreateCriticRatingRequest,
) -> AppResult<ApiResponse<CriticRating>> {
    check_score(payload.rating)?;
    let rating = CriticRatingActive {
        id: NotSet,
        critic_id: Set(payload.critic_id),
        dish_id: Set(payload.dish_id),
        rating: Set(payload.rating),
        is_active: Set(true),
    }
    .insert(&state.orm)
    .await?;
    Ok(ApiResponse::success(
        "Rating created",
        critic_rating_from_entity(rating),
        None,
    ))
}

pub async fn update_critic_rating(
    state: &AppState,
    id: i64,
    payload: UpdateCriticRatingRequest,
) -> AppResult<ApiResponse<CriticRating>> {
    let rating = CriticRatings::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut active: CriticRatingActive = rating.into();
    if let Some(score) = payload.rating {
        check_score(score)?;
        active.rating = Set(score);
    }
    let updated = active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Rating updated",
        critic_rating_from_entity(updated),
        None,
    ))
}

pub async fn delete_critic_rating(
    state: &AppState,
    id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let rating = CriticRatings::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut active: CriticRatingActive = rating.into();
    active.is_active = Set(false);
    active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Rating deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

// ===== aggregation =====

pub async fn ratings_summary(
    state: &AppState,
    restaurant_id: i64,
) -> AppResult<ApiResponse<RatingsSummary>> {
    if Restaurants::find_by_id(restaurant_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound);
    }

    let mut summaries = summarize(state, &[restaurant_id]).await?;
    let summary = summaries.pop().ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", summary, Some(Meta::empty())))
}

pub async fn ratings_summary_bulk(
    state: &AppState,
    payload: BulkSummaryRequest,
) -> AppResult<ApiResponse<RatingsSummaryList>> {
    let items = summarize(state, &payload.restaurant_ids).await?;
    Ok(ApiResponse::success("OK", RatingsSummaryList { items }, Some(Meta::empty())))
}

/// Three queries regardless of how many restaurants are asked for: the
/// restaurant→dish mapping, then all customer and all critic ratings over the
/// full dish-id set. Grouping happens in memory.
async fn summarize(state: &AppState, restaurant_ids: &[i64]) -> AppResult<Vec<RatingsSummary>> {
    let ids: Vec<i64> = restaurant_ids.to_vec();
    let dish_owners: Vec<(i64, i64)> = sqlx::query_as(
        r#"
        SELECT d.id, m.restaurant_id
        FROM dishes d
        JOIN menus m ON m.id = d.menu_id
        WHERE m.restaurant_id = ANY($1) AND d.is_active
        "#,
    )
    .bind(&ids)
    .fetch_all(&state.pool)
    .await?;

    let dish_ids: Vec<i64> = dish_owners.iter().map(|(dish_id, _)| *dish_id).collect();

    let customer_rows: Vec<(i64, i16)> = sqlx::query_as(
        "SELECT dish_id, rating FROM customer_ratings WHERE dish_id = ANY($1) AND is_active",
    )
    .bind(&dish_ids)
    .fetch_all(&state.pool)
    .await?;

    let critic_rows: Vec<(i64, i16)> = sqlx::query_as(
        "SELECT dish_id, rating FROM critic_ratings WHERE dish_id = ANY($1) AND is_active",
    )
    .bind(&dish_ids)
    .fetch_all(&state.pool)
    .await?;

    Ok(summarize_in_memory(
        &ids,
        &dish_owners,
        &customer_rows,
        &critic_rows,
    ))
}

pub async fn critic_highlights(
    state: &AppState,
    restaurant_id: i64,
) -> AppResult<ApiResponse<CriticHighlightList>> {
    let dish_ids = restaurant_dish_ids(state, restaurant_id).await?;
    let rows: Vec<(i64, i16)> = sqlx::query_as(
        "SELECT dish_id, rating FROM critic_ratings WHERE dish_id = ANY($1) AND is_active",
    )
    .bind(&dish_ids)
    .fetch_all(&state.pool)
    .await?;

    let top = top_dishes(&rows, HIGHLIGHT_THRESHOLD, HIGHLIGHT_LIMIT);
    let names = dish_names(state, top.iter().map(|t| t.dish_id)).await?;

    let items = top
        .into_iter()
        .map(|t| CriticHighlight {
            dish_id: t.dish_id,
            dish_name: names.get(&t.dish_id).cloned().unwrap_or_default(),
            average: t.average,
            count: t.count,
        })
        .collect();
    Ok(ApiResponse::success("OK", CriticHighlightList { items }, Some(Meta::empty())))
}

pub async fn customer_favorites(
    state: &AppState,
    restaurant_id: i64,
) -> AppResult<ApiResponse<CustomerFavoriteList>> {
    let dish_ids = restaurant_dish_ids(state, restaurant_id).await?;
    let rows: Vec<(i64, i16)> = sqlx::query_as(
        "SELECT dish_id, rating FROM customer_ratings WHERE dish_id = ANY($1) AND is_active",
    )
    .bind(&dish_ids)
    .fetch_all(&state.pool)
    .await?;

    let top = top_dishes(&rows, HIGHLIGHT_THRESHOLD, HIGHLIGHT_LIMIT);
    let top_ids: Vec<i64> = top.iter().map(|t| t.dish_id).collect();
    let names = dish_names(state, top_ids.iter().copied()).await?;

    let comment_rows: Vec<(i64, String)> = sqlx::query_as(
        r#"
        SELECT dish_id, comment FROM customer_ratings
        WHERE dish_id = ANY($1) AND is_active AND comment IS NOT NULL
        ORDER BY rating DESC, id
        "#,
    )
    .bind(&top_ids)
    .fetch_all(&state.pool)
    .await?;
    let comments = sample_comments(&comment_rows, SAMPLE_COMMENTS);

    let items = top
        .into_iter()
        .map(|t| CustomerFavorite {
            dish_id: t.dish_id,
            dish_name: names.get(&t.dish_id).cloned().unwrap_or_default(),
            average: t.average,
            count: t.count,
            comments: comments.get(&t.dish_id).cloned().unwrap_or_default(),
        })
        .collect();
    Ok(ApiResponse::success("OK", CustomerFavoriteList { items }, Some(Meta::empty())))
}

async fn restaurant_dish_ids(state: &AppState, restaurant_id: i64) -> AppResult<Vec<i64>> {
    if Restaurants::find_by_id(restaurant_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound);
    }
    let rows: Vec<(i64,)> = sqlx::query_as(
        r#"
        SELECT d.id
        FROM dishes d
        JOIN menus m ON m.id = d.menu_id
        WHERE m.restaurant_id = $1 AND d.is_active
        "#,
    )
    .bind(restaurant_id)
    .fetch_all(&state.pool)
    .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

async fn dish_names(
    state: &AppState,
    ids: impl Iterator<Item = i64>,
) -> AppResult<HashMap<i64, String>> {
    let ids: Vec<i64> = ids.collect();
    let map = Dishes::find()
        .filter(dishes::Column::Id.is_in(ids))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|d| (d.id, d.name))
        .collect();
    Ok(map)
}

// ===== pure aggregation =====

#[derive(Debug, Default, Clone, Copy)]
struct Accum {
    count: i64,
    sum: i64,
}

impl Accum {
    fn add(&mut self, score: i16) {
        self.count += 1;
        self.sum += score as i64;
    }

    fn aggregate(self) -> SourceAggregate {
        SourceAggregate {
            count: self.count,
            average: (self.count > 0).then(|| self.sum as f64 / self.count as f64),
        }
    }
}

fn summarize_in_memory(
    restaurant_ids: &[i64],
    dish_owners: &[(i64, i64)],
    customer_rows: &[(i64, i16)],
    critic_rows: &[(i64, i16)],
) -> Vec<RatingsSummary> {
    let owner_of: HashMap<i64, i64> = dish_owners.iter().copied().collect();

    let mut customer: HashMap<i64, Accum> = HashMap::new();
    for (dish_id, score) in customer_rows {
        if let Some(restaurant_id) = owner_of.get(dish_id) {
            customer.entry(*restaurant_id).or_default().add(*score);
        }
    }
    let mut critic: HashMap<i64, Accum> = HashMap::new();
    for (dish_id, score) in critic_rows {
        if let Some(restaurant_id) = owner_of.get(dish_id) {
            critic.entry(*restaurant_id).or_default().add(*score);
        }
    }

    restaurant_ids
        .iter()
        .map(|restaurant_id| {
            let c = customer.get(restaurant_id).copied().unwrap_or_default();
            let k = critic.get(restaurant_id).copied().unwrap_or_default();
            let overall_count = c.count + k.count;
            // Weighting each source's average by its count is the same as
            // averaging the pooled raw scores.
            let overall_average =
                (overall_count > 0).then(|| (c.sum + k.sum) as f64 / overall_count as f64);
            RatingsSummary {
                restaurant_id: *restaurant_id,
                customer: c.aggregate(),
                critic: k.aggregate(),
                overall_average,
                overall_count,
            }
        })
        .collect()
}

#[derive(Debug, PartialEq)]
struct TopDish {
    dish_id: i64,
    average: f64,
    count: i64,
}

fn top_dishes(rows: &[(i64, i16)], threshold: f64, limit: usize) -> Vec<TopDish> {
    let mut per_dish: HashMap<i64, Accum> = HashMap::new();
    for (dish_id, score) in rows {
        per_dish.entry(*dish_id).or_default().add(*score);
    }

    let mut top: Vec<TopDish> = per_dish
        .into_iter()
        .map(|(dish_id, accum)| TopDish {
            dish_id,
            average: accum.sum as f64 / accum.count as f64,
            count: accum.count,
        })
        .filter(|t| t.average >= threshold)
        .collect();

    top.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.count.cmp(&a.count))
            .then(a.dish_id.cmp(&b.dish_id))
    });
    top.truncate(limit);
    top
}

/// `rows` arrive ordered best-rated first; keep the first `limit` per dish.
fn sample_comments(rows: &[(i64, String)], limit: usize) -> HashMap<i64, Vec<String>> {
    let mut comments: HashMap<i64, Vec<String>> = HashMap::new();
    for (dish_id, comment) in rows {
        let entry = comments.entry(*dish_id).or_default();
        if entry.len() < limit {
            entry.push(comment.clone());
        }
    }
    comments
}

fn check_score(score: i16) -> AppResult<()> {
    if !(1..=5).contains(&score) {
        return Err(AppError::BadRequest(
            "rating must be between 1 and 5".to_string(),
        ));
    }
    Ok(())
}

fn customer_rating_from_entity(model: CustomerRatingModel) -> CustomerRating {
    CustomerRating {
        id: model.id,
        customer_id: model.customer_id,
        dish_id: model.dish_id,
        rating: model.rating,
        comment: model.comment,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn critic_rating_from_entity(model: CriticRatingModel) -> CriticRating {
    CriticRating {
        id: model.id,
        critic_id: model.critic_id,
        dish_id: model.dish_id,
        rating: model.rating,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pooled_average_matches_count_weighting() {
        // customer ratings [4, 5] and critic rating [3] -> (4+5+3)/3 = 4.0
        let dish_owners = vec![(10, 5), (11, 5)];
        let customer_rows = vec![(10, 4), (11, 5)];
        let critic_rows = vec![(10, 3)];
        let summaries = summarize_in_memory(&[5], &dish_owners, &customer_rows, &critic_rows);

        assert_eq!(summaries.len(), 1);
        let s = &summaries[0];
        assert_eq!(s.customer.count, 2);
        assert_eq!(s.customer.average, Some(4.5));
        assert_eq!(s.critic.count, 1);
        assert_eq!(s.critic.average, Some(3.0));
        assert_eq!(s.overall_count, 3);
        assert_eq!(s.overall_average, Some(4.0));
    }

    #[test]
    fn restaurant_without_ratings_has_null_averages() {
        let summaries = summarize_in_memory(&[1], &[(10, 1)], &[], &[]);
        let s = &summaries[0];
        assert_eq!(s.customer.count, 0);
        assert_eq!(s.customer.average, None);
        assert_eq!(s.overall_average, None);
        assert_eq!(s.overall_count, 0);
    }

    #[test]
    fn ratings_for_foreign_dishes_are_ignored() {
        // dish 99 belongs to nobody in the requested set
        let summaries = summarize_in_memory(&[1], &[(10, 1)], &[(99, 5), (10, 4)], &[]);
        let s = &summaries[0];
        assert_eq!(s.customer.count, 1);
        assert_eq!(s.customer.average, Some(4.0));
    }

    #[test]
    fn bulk_summary_keeps_restaurants_separate() {
        let dish_owners = vec![(10, 1), (20, 2)];
        let customer_rows = vec![(10, 5), (20, 1)];
        let summaries = summarize_in_memory(&[1, 2], &dish_owners, &customer_rows, &[]);
        assert_eq!(summaries[0].overall_average, Some(5.0));
        assert_eq!(summaries[1].overall_average, Some(1.0));
    }

    #[test]
    fn highlights_apply_threshold_and_limit() {
        let rows = vec![
            (1, 5),
            (1, 5), // avg 5.0
            (2, 4), // avg 4.0, right on the threshold
            (3, 3), // below threshold
            (4, 5),
            (4, 4), // avg 4.5
        ];
        let top = top_dishes(&rows, 4.0, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].dish_id, 1);
        assert_eq!(top[0].average, 5.0);
        assert_eq!(top[1].dish_id, 4);
        assert_eq!(top[1].average, 4.5);
    }

    #[test]
    fn highlight_ties_fall_back_to_count() {
        let rows = vec![(1, 4), (2, 4), (2, 4)];
        let top = top_dishes(&rows, 4.0, 5);
        assert_eq!(top[0].dish_id, 2);
        assert_eq!(top[0].count, 2);
        assert_eq!(top[1].dish_id, 1);
    }

    #[test]
    fn at_most_three_comments_per_dish() {
        let rows: Vec<(i64, String)> = (0..5).map(|i| (7, format!("comment {i}"))).collect();
        let comments = sample_comments(&rows, 3);
        assert_eq!(comments.get(&7).map(Vec::len), Some(3));
        assert_eq!(comments[&7][0], "comment 0");
    }
}

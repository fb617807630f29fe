use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{CriticRating, CustomerRating};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCustomerRatingRequest {
    pub customer_id: i64,
    pub dish_id: i64,
    pub rating: i16,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCustomerRatingRequest {
    pub rating: Option<i16>,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCriticRatingRequest {
    pub critic_id: i64,
    pub dish_id: i64,
    pub rating: i16,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCriticRatingRequest {
    pub rating: Option<i16>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerRatingList {
    pub items: Vec<CustomerRating>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CriticRatingList {
    pub items: Vec<CriticRating>,
}

/// Aggregate over one rating source (customers or critics).
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SourceAggregate {
    pub count: i64,
    pub average: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingsSummary {
    pub restaurant_id: i64,
    pub customer: SourceAggregate,
    pub critic: SourceAggregate,
    pub overall_average: Option<f64>,
    pub overall_count: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkSummaryRequest {
    pub restaurant_ids: Vec<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingsSummaryList {
    pub items: Vec<RatingsSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CriticHighlight {
    pub dish_id: i64,
    pub dish_name: String,
    pub average: f64,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerFavorite {
    pub dish_id: i64,
    pub dish_name: String,
    pub average: f64,
    pub count: i64,
    /// Up to three sample comments, best-rated first.
    pub comments: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CriticHighlightList {
    pub items: Vec<CriticHighlight>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerFavoriteList {
    pub items: Vec<CustomerFavorite>,
}

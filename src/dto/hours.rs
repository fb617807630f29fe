use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{OpeningHoursDetail, OpeningHoursTemplate};

#[derive(Debug, Deserialize, ToSchema)]
pub struct DetailInput {
    pub weekday: i16,
    pub opens_at: NaiveTime,
    pub closes_at: NaiveTime,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTemplateRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub details: Vec<DetailInput>,
}

/// Supplying `details` replaces the whole set; omitting it leaves them alone.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub details: Option<Vec<DetailInput>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TemplateWithDetails {
    pub template: OpeningHoursTemplate,
    pub details: Vec<OpeningHoursDetail>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TemplateList {
    pub items: Vec<TemplateWithDetails>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignTemplateRequest {
    pub template_id: i64,
}

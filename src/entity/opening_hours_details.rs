use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "opening_hours_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub template_id: i64,
    /// 0 = Monday .. 6 = Sunday.
    pub weekday: i16,
    pub opens_at: Time,
    pub closes_at: Time,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::opening_hours_templates::Entity",
        from = "Column::TemplateId",
        to = "super::opening_hours_templates::Column::Id"
    )]
    OpeningHoursTemplates,
}

impl Related<super::opening_hours_templates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OpeningHoursTemplates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "restaurant_hours")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub restaurant_id: i64,
    pub template_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::restaurants::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurants::Column::Id"
    )]
    Restaurants,
    #[sea_orm(
        belongs_to = "super::opening_hours_templates::Entity",
        from = "Column::TemplateId",
        to = "super::opening_hours_templates::Column::Id"
    )]
    OpeningHoursTemplates,
}

impl Related<super::restaurants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurants.def()
    }
}

impl Related<super::opening_hours_templates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OpeningHoursTemplates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

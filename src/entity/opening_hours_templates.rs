use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "opening_hours_templates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::opening_hours_details::Entity")]
    OpeningHoursDetails,
    #[sea_orm(has_many = "super::restaurant_hours::Entity")]
    RestaurantHours,
}

impl Related<super::opening_hours_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OpeningHoursDetails.def()
    }
}

impl Related<super::restaurant_hours::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RestaurantHours.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

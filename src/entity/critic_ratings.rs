use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "critic_ratings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub critic_id: i64,
    pub dish_id: i64,
    pub rating: i16,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::critics::Entity",
        from = "Column::CriticId",
        to = "super::critics::Column::Id"
    )]
    Critics,
    #[sea_orm(
        belongs_to = "super::dishes::Entity",
        from = "Column::DishId",
        to = "super::dishes::Column::Id"
    )]
    Dishes,
}

impl Related<super::critics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Critics.def()
    }
}

impl Related<super::dishes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dishes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

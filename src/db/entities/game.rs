//! Game entity, owned by a console via `console_id`

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub console_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::console::Entity",
        from = "Column::ConsoleId",
        to = "super::console::Column::Id"
    )]
    Console,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::console::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Console.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

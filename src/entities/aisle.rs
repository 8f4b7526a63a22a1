use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{LocationEntity, NestedLocationEntity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "aisles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub room_id: i32,
    pub deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id"
    )]
    Room,
    #[sea_orm(has_many = "super::shelf::Entity")]
    Shelves,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::shelf::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shelves.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl LocationEntity for Entity {
    const LEVEL: &'static str = "Aisle";

    fn id_column() -> Column {
        Column::Id
    }

    fn deleted_column() -> Column {
        Column::Deleted
    }

    fn id_of(model: &Model) -> i32 {
        model.id
    }
}

impl NestedLocationEntity for Entity {
    fn parent_column() -> Column {
        Column::RoomId
    }

    fn parent_of(model: &Model) -> i32 {
        model.room_id
    }
}

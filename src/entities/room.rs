use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{LocationEntity, NestedLocationEntity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub capacity: Option<i32>,
    pub floor_id: i32,
    pub deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::floor::Entity",
        from = "Column::FloorId",
        to = "super::floor::Column::Id"
    )]
    Floor,
    #[sea_orm(has_many = "super::aisle::Entity")]
    Aisles,
}

impl Related<super::floor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Floor.def()
    }
}

impl Related<super::aisle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Aisles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl LocationEntity for Entity {
    const LEVEL: &'static str = "Room";

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
        Column::FloorId
    }

    fn parent_of(model: &Model) -> i32 {
        model.floor_id
    }
}

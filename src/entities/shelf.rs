use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{LocationEntity, NestedLocationEntity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shelves")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub aisle_id: i32,
    pub deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::aisle::Entity",
        from = "Column::AisleId",
        to = "super::aisle::Column::Id"
    )]
    Aisle,
    #[sea_orm(has_many = "super::bin::Entity")]
    Bins,
}

impl Related<super::aisle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Aisle.def()
    }
}

impl Related<super::bin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bins.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl LocationEntity for Entity {
    const LEVEL: &'static str = "Shelf";

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
        Column::AisleId
    }

    fn parent_of(model: &Model) -> i32 {
        model.aisle_id
    }
}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{LocationEntity, NestedLocationEntity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub shelf_id: i32,
    pub deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::shelf::Entity",
        from = "Column::ShelfId",
        to = "super::shelf::Column::Id"
    )]
    Shelf,
    #[sea_orm(has_many = "super::inventory_location::Entity")]
    InventoryLocations,
}

impl Related<super::shelf::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shelf.def()
    }
}

impl Related<super::inventory_location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryLocations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl LocationEntity for Entity {
    const LEVEL: &'static str = "Bin";

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
        Column::ShelfId
    }

    fn parent_of(model: &Model) -> i32 {
        model.shelf_id
    }
}

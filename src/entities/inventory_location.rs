use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Placement of one inventory record at a full warehouse path.
///
/// The path columns are denormalized on purpose so a bin's contents can be
/// looked up without walking the hierarchy. `inventory_id` is unique.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub inventory_id: i32,
    pub warehouse_id: i32,
    pub floor_id: i32,
    pub room_id: i32,
    pub aisle_id: i32,
    pub shelf_id: i32,
    pub bin_id: i32,
    pub placed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inventory::Entity",
        from = "Column::InventoryId",
        to = "super::inventory::Column::Id"
    )]
    Inventory,
    #[sea_orm(
        belongs_to = "super::bin::Entity",
        from = "Column::BinId",
        to = "super::bin::Column::Id"
    )]
    Bin,
}

impl Related<super::inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

impl Related<super::bin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bin.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

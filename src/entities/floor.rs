use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{LocationEntity, NestedLocationEntity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "floors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub warehouse_id: i32,
    pub deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::WarehouseId",
        to = "super::warehouse::Column::Id"
    )]
    Warehouse,
    #[sea_orm(has_many = "super::room::Entity")]
    Rooms,
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouse.def()
    }
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rooms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl LocationEntity for Entity {
    const LEVEL: &'static str = "Floor";

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
        Column::WarehouseId
    }

    fn parent_of(model: &Model) -> i32 {
        model.warehouse_id
    }
}

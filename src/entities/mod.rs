//! SeaORM entities for the location hierarchy and inventory placement.

use sea_orm::EntityTrait;

pub mod aisle;
pub mod bin;
pub mod floor;
pub mod inventory;
pub mod inventory_location;
pub mod room;
pub mod shelf;
pub mod warehouse;

/// A soft-deletable table with an integer primary key.
pub trait LocationEntity: EntityTrait {
    /// Human readable level name used in messages and logs.
    const LEVEL: &'static str;

    fn id_column() -> Self::Column;
    fn deleted_column() -> Self::Column;
    fn id_of(model: &Self::Model) -> i32;
}

/// A level whose rows hang off a parent level through a foreign key.
pub trait NestedLocationEntity: LocationEntity {
    fn parent_column() -> Self::Column;
    fn parent_of(model: &Self::Model) -> i32;
}

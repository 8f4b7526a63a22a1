//! Stores for each level of the location hierarchy.
//!
//! The five nested levels share their create/get/delete algorithm through
//! [`level::LevelStore`]; warehouses sit on top as the aggregate root.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::entities::{LocationEntity, NestedLocationEntity};
use crate::errors::ServiceError;

pub mod aisle_repository;
pub mod bin_repository;
pub mod floor_repository;
pub mod inventory_repository;
pub mod level;
pub mod room_repository;
pub mod shelf_repository;
pub mod warehouse_repository;

pub use aisle_repository::AisleStore;
pub use bin_repository::BinStore;
pub use floor_repository::FloorStore;
pub use level::LevelStore;
pub use room_repository::RoomStore;
pub use shelf_repository::ShelfStore;
pub use warehouse_repository::WarehouseStore;

/// Repository trait for common database operations
pub trait Repository {
    fn get_db(&self) -> &DatabaseConnection;
}

/// Fetches a row by id unless it is missing or soft-deleted.
pub async fn find_live<E, C>(conn: &C, id: i32) -> Result<Option<E::Model>, DbErr>
where
    E: LocationEntity,
    C: ConnectionTrait,
{
    E::find()
        .filter(E::id_column().eq(id))
        .filter(E::deleted_column().eq(false))
        .one(conn)
        .await
}

/// Like [`find_live`] but a missing row is a `NotFound` error.
pub async fn require_live<E, C>(conn: &C, id: i32) -> Result<E::Model, ServiceError>
where
    E: LocationEntity,
    C: ConnectionTrait,
{
    find_live::<E, C>(conn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found(E::LEVEL, id))
}

/// Live rows hanging off any of `parent_ids`, oldest first.
pub async fn live_children<E, C>(conn: &C, parent_ids: &[i32]) -> Result<Vec<E::Model>, DbErr>
where
    E: NestedLocationEntity,
    C: ConnectionTrait,
{
    if parent_ids.is_empty() {
        return Ok(Vec::new());
    }
    E::find()
        .filter(E::parent_column().is_in(parent_ids.iter().copied()))
        .filter(E::deleted_column().eq(false))
        .order_by_asc(E::id_column())
        .all(conn)
        .await
}

/// Marks `ids` deleted and returns how many rows changed.
pub async fn soft_delete<E, C>(conn: &C, ids: &[i32]) -> Result<u64, DbErr>
where
    E: LocationEntity,
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(0);
    }
    let result = E::update_many()
        .col_expr(E::deleted_column(), Expr::value(true))
        .filter(E::id_column().is_in(ids.iter().copied()))
        .filter(E::deleted_column().eq(false))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

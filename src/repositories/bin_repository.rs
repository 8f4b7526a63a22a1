use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, Set,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::inventory_repository::bin_occupancy;
use super::{require_live, LevelStore, Repository};
use crate::db::UnitOfWork;
use crate::dto::locations::{BinNode, BinOccupancy, CreateBinRequest, UpdateBinRequest};
use crate::entities::{aisle, bin, floor, inventory_location, room, shelf};
use crate::errors::ServiceError;

/// Leaf store. Bins carry a capacity and refuse deletion while they hold
/// stock.
#[derive(Debug, Clone)]
pub struct BinStore {
    db: Arc<DatabaseConnection>,
}

impl BinStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Declared capacity of a live bin.
    pub async fn capacity(&self, bin_id: i32) -> Result<i32, ServiceError> {
        let bin = require_live::<bin::Entity, _>(self.db.as_ref(), bin_id).await?;
        Ok(bin.capacity)
    }

    /// Capacity against the stock currently placed in the bin.
    #[instrument(skip(self))]
    pub async fn occupancy(&self, bin_id: i32) -> Result<BinOccupancy, ServiceError> {
        let bin = require_live::<bin::Entity, _>(self.db.as_ref(), bin_id).await?;
        let current_stock = bin_occupancy(self.db.as_ref(), &[bin_id])
            .await?
            .get(&bin_id)
            .copied()
            .unwrap_or(0);
        Ok(BinOccupancy {
            bin_id,
            capacity: bin.capacity,
            current_stock,
            available: i64::from(bin.capacity) - current_stock,
        })
    }

    /// Renames, recapacitates or moves a bin in its own transaction.
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i32, request: &UpdateBinRequest) -> Result<BinNode, ServiceError> {
        let uow = UnitOfWork::begin(self.db.as_ref(), None).await?;
        let result = self.update_within(id, request, uow.txn()).await;
        uow.finish(result, "Bin").await?;
        self.get(id).await
    }

    pub(crate) async fn update_within(
        &self,
        id: i32,
        request: &UpdateBinRequest,
        txn: &DatabaseTransaction,
    ) -> Result<(), ServiceError> {
        let existing = require_live::<bin::Entity, _>(txn, id).await?;

        let target_shelf = match request.shelf_id {
            Some(shelf_id) if shelf_id != existing.shelf_id => {
                Some(require_live::<shelf::Entity, _>(txn, shelf_id).await?)
            }
            Some(shelf_id) => {
                require_live::<shelf::Entity, _>(txn, shelf_id).await?;
                None
            }
            None => None,
        };

        if let Some(capacity) = request.capacity {
            validate_capacity(capacity)?;
            let occupied = bin_occupancy(txn, &[id])
                .await?
                .get(&id)
                .copied()
                .unwrap_or(0);
            if i64::from(capacity) < occupied {
                warn!(bin_id = id, capacity, occupied, "Rejected capacity below occupancy");
                return Err(ServiceError::Conflict(format!(
                    "Bin {} holds {} units; capacity {} is too small",
                    id, occupied, capacity
                )));
            }
        }

        let mut active: bin::ActiveModel = existing.into();
        if let Some(name) = &request.name {
            active.name = Set(name.clone());
        }
        if let Some(capacity) = request.capacity {
            active.capacity = Set(capacity);
        }
        if let Some(shelf_id) = request.shelf_id {
            active.shelf_id = Set(shelf_id);
        }
        active.update(txn).await?;

        if let Some(shelf) = target_shelf {
            let moved = self.repath_placements(id, &shelf, txn).await?;
            info!(bin_id = id, shelf_id = shelf.id, placements = moved, "Bin moved");
        }

        info!(bin_id = id, "Bin updated");
        Ok(())
    }

    /// Points every placement in `bin_id` at the path of `shelf`.
    async fn repath_placements(
        &self,
        bin_id: i32,
        shelf: &shelf::Model,
        txn: &DatabaseTransaction,
    ) -> Result<u64, ServiceError> {
        let aisle = require_live::<aisle::Entity, _>(txn, shelf.aisle_id).await?;
        let room = require_live::<room::Entity, _>(txn, aisle.room_id).await?;
        let floor = require_live::<floor::Entity, _>(txn, room.floor_id).await?;

        let result = inventory_location::Entity::update_many()
            .col_expr(
                inventory_location::Column::WarehouseId,
                Expr::value(floor.warehouse_id),
            )
            .col_expr(inventory_location::Column::FloorId, Expr::value(floor.id))
            .col_expr(inventory_location::Column::RoomId, Expr::value(room.id))
            .col_expr(inventory_location::Column::AisleId, Expr::value(aisle.id))
            .col_expr(inventory_location::Column::ShelfId, Expr::value(shelf.id))
            .filter(inventory_location::Column::BinId.eq(bin_id))
            .exec(txn)
            .await?;
        Ok(result.rows_affected)
    }
}

fn validate_capacity(capacity: i32) -> Result<(), ServiceError> {
    if capacity < 0 {
        return Err(ServiceError::ValidationError(format!(
            "Bin capacity must not be negative, got {}",
            capacity
        )));
    }
    Ok(())
}

impl Repository for BinStore {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl LevelStore for BinStore {
    type Entity = bin::Entity;
    type Parent = shelf::Entity;
    type Create = CreateBinRequest;
    type Node = BinNode;

    async fn insert_row(
        &self,
        shelf_id: i32,
        request: &CreateBinRequest,
        txn: &DatabaseTransaction,
    ) -> Result<i32, ServiceError> {
        validate_capacity(request.capacity)?;
        let bin = bin::ActiveModel {
            name: Set(request.name.clone()),
            capacity: Set(request.capacity),
            shelf_id: Set(shelf_id),
            deleted: Set(false),
            ..Default::default()
        }
        .insert(txn)
        .await?;
        Ok(bin.id)
    }

    async fn to_node(&self, model: bin::Model) -> Result<BinNode, ServiceError> {
        let current_stock = bin_occupancy(self.db.as_ref(), &[model.id])
            .await?
            .get(&model.id)
            .copied()
            .unwrap_or(0);
        Ok(BinNode {
            id: model.id,
            name: model.name,
            capacity: model.capacity,
            shelf_id: model.shelf_id,
            current_stock,
        })
    }

    /// Placements left in the bins hold no stock by now; drop them so no
    /// row points at a deleted bin.
    async fn delete_children(&self, ids: &[i32], txn: &DatabaseTransaction) -> Result<(), ServiceError> {
        let cleared = inventory_location::Entity::delete_many()
            .filter(inventory_location::Column::BinId.is_in(ids.iter().copied()))
            .exec(txn)
            .await?;
        if cleared.rows_affected > 0 {
            info!(?ids, placements = cleared.rows_affected, "Cleared empty placements");
        }
        Ok(())
    }

    async fn before_delete(&self, ids: &[i32], txn: &DatabaseTransaction) -> Result<(), ServiceError> {
        let occupied: BTreeSet<i32> = bin_occupancy(txn, ids)
            .await?
            .into_iter()
            .filter(|(_, stock)| *stock > 0)
            .map(|(bin_id, _)| bin_id)
            .collect();
        if occupied.is_empty() {
            return Ok(());
        }
        warn!(?occupied, "Rejected delete of occupied bins");
        Err(ServiceError::Conflict(format!(
            "bin still contains items (bins {:?})",
            occupied
        )))
    }
}

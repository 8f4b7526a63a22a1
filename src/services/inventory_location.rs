//! Placement of inventory records into bins.
//!
//! A placement pins one inventory record to a full warehouse path. Capacity is
//! checked when placing: the stock being placed plus the stock other records
//! already hold in the bin must fit. Stock changes after placement are not
//! re-validated.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::dto::inventory_location::{InventoryLocationPath, PathSegment, PlaceInventoryRequest};
use crate::entities::{aisle, bin, floor, inventory_location, room, shelf, warehouse, LocationEntity};
use crate::errors::ServiceError;
use crate::repositories::inventory_repository::placements_in_bins;
use crate::repositories::require_live;
use crate::services::inventory::InventoryStore;

const LEVEL: &str = "InventoryLocation";

#[derive(Clone)]
pub struct InventoryLocationAssigner {
    db: Arc<DatabaseConnection>,
    inventory: Arc<dyn InventoryStore>,
}

impl InventoryLocationAssigner {
    pub fn new(db: Arc<DatabaseConnection>, inventory: Arc<dyn InventoryStore>) -> Self {
        Self { db, inventory }
    }

    /// Places an inventory record at the requested path, moving it if it is
    /// already placed somewhere else.
    #[instrument(skip(self, request), fields(inventory_id = request.inventory_id, bin_id = request.bin_id))]
    pub async fn place(
        &self,
        request: &PlaceInventoryRequest,
    ) -> Result<InventoryLocationPath, ServiceError> {
        let db = self.db.as_ref();
        let bin = self.resolve_path(request).await?;
        let stock = self.inventory.get_stock(request.inventory_id).await?;

        let others: Vec<i32> = placements_in_bins(db, &[bin.id])
            .await?
            .into_iter()
            .map(|p| p.inventory_id)
            .filter(|id| *id != request.inventory_id)
            .collect();
        let already_placed: i64 = if others.is_empty() {
            0
        } else {
            self.inventory.stock_for(others).await?.values().sum()
        };

        let required = i64::from(stock) + already_placed;
        if required > i64::from(bin.capacity) {
            warn!(
                stock,
                already_placed,
                capacity = bin.capacity,
                "Placement rejected, bin capacity exceeded"
            );
            return Err(ServiceError::Conflict(format!(
                "Inventory {} with stock {} does not fit in bin {} (capacity {}, already placed {})",
                request.inventory_id, stock, bin.id, bin.capacity, already_placed
            )));
        }

        let existing = inventory_location::Entity::find()
            .filter(inventory_location::Column::InventoryId.eq(request.inventory_id))
            .one(db)
            .await?;

        let location = match existing {
            Some(row) => {
                let mut active: inventory_location::ActiveModel = row.into();
                active.warehouse_id = Set(request.warehouse_id);
                active.floor_id = Set(request.floor_id);
                active.room_id = Set(request.room_id);
                active.aisle_id = Set(request.aisle_id);
                active.shelf_id = Set(request.shelf_id);
                active.bin_id = Set(request.bin_id);
                active.placed_at = Set(Utc::now());
                active.update(db).await?
            }
            None => {
                inventory_location::ActiveModel {
                    inventory_id: Set(request.inventory_id),
                    warehouse_id: Set(request.warehouse_id),
                    floor_id: Set(request.floor_id),
                    room_id: Set(request.room_id),
                    aisle_id: Set(request.aisle_id),
                    shelf_id: Set(request.shelf_id),
                    bin_id: Set(request.bin_id),
                    placed_at: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(db)
                .await?
            }
        };

        info!(location_id = location.id, "Inventory placed");
        self.path_of(location).await
    }

    /// Placement by its own id.
    pub async fn get(&self, location_id: i32) -> Result<InventoryLocationPath, ServiceError> {
        let location = inventory_location::Entity::find_by_id(location_id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::not_found(LEVEL, location_id))?;
        self.path_of(location).await
    }

    /// Placement of an inventory record.
    pub async fn get_by_inventory(
        &self,
        inventory_id: i32,
    ) -> Result<InventoryLocationPath, ServiceError> {
        let location = inventory_location::Entity::find()
            .filter(inventory_location::Column::InventoryId.eq(inventory_id))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("No location for inventory {}", inventory_id))
            })?;
        self.path_of(location).await
    }

    /// Removes a placement row, freeing its bin.
    #[instrument(skip(self))]
    pub async fn remove(&self, location_id: i32) -> Result<(), ServiceError> {
        let location = inventory_location::Entity::find_by_id(location_id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::not_found(LEVEL, location_id))?;
        let inventory_id = location.inventory_id;
        location.delete(self.db.as_ref()).await?;
        info!(location_id, inventory_id, "Inventory location removed");
        Ok(())
    }

    /// Checks every level of the requested path is live and hangs off the next
    /// one up. Returns the target bin.
    async fn resolve_path(&self, request: &PlaceInventoryRequest) -> Result<bin::Model, ServiceError> {
        let db = self.db.as_ref();
        require_live::<warehouse::Entity, _>(db, request.warehouse_id).await?;

        let floor = require_live::<floor::Entity, _>(db, request.floor_id).await?;
        expect_parent("Floor", floor.id, floor.warehouse_id, "warehouse", request.warehouse_id)?;

        let room = require_live::<room::Entity, _>(db, request.room_id).await?;
        expect_parent("Room", room.id, room.floor_id, "floor", request.floor_id)?;

        let aisle = require_live::<aisle::Entity, _>(db, request.aisle_id).await?;
        expect_parent("Aisle", aisle.id, aisle.room_id, "room", request.room_id)?;

        let shelf = require_live::<shelf::Entity, _>(db, request.shelf_id).await?;
        expect_parent("Shelf", shelf.id, shelf.aisle_id, "aisle", request.aisle_id)?;

        let bin = require_live::<bin::Entity, _>(db, request.bin_id).await?;
        expect_parent("Bin", bin.id, bin.shelf_id, "shelf", request.shelf_id)?;

        Ok(bin)
    }

    async fn path_of(
        &self,
        location: inventory_location::Model,
    ) -> Result<InventoryLocationPath, ServiceError> {
        let db = self.db.as_ref();
        Ok(InventoryLocationPath {
            id: location.id,
            inventory_id: location.inventory_id,
            warehouse: segment::<warehouse::Entity, _>(db, location.warehouse_id, |m| m.name).await?,
            floor: segment::<floor::Entity, _>(db, location.floor_id, |m| m.name).await?,
            room: segment::<room::Entity, _>(db, location.room_id, |m| m.name).await?,
            aisle: segment::<aisle::Entity, _>(db, location.aisle_id, |m| m.name).await?,
            shelf: segment::<shelf::Entity, _>(db, location.shelf_id, |m| m.name).await?,
            bin: segment::<bin::Entity, _>(db, location.bin_id, |m| m.name).await?,
            placed_at: location.placed_at,
        })
    }
}

fn expect_parent(
    level: &str,
    id: i32,
    actual_parent: i32,
    parent_level: &str,
    expected_parent: i32,
) -> Result<(), ServiceError> {
    if actual_parent != expected_parent {
        return Err(ServiceError::ValidationError(format!(
            "{} {} does not belong to {} {}",
            level, id, parent_level, expected_parent
        )));
    }
    Ok(())
}

/// Resolves one path level by id. Soft-deleted rows still resolve so existing
/// placements stay readable.
async fn segment<E, F>(db: &DatabaseConnection, id: i32, name: F) -> Result<PathSegment, ServiceError>
where
    E: LocationEntity,
    F: FnOnce(E::Model) -> String,
{
    let model = E::find()
        .filter(E::id_column().eq(id))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found(E::LEVEL, id))?;
    Ok(PathSegment {
        id,
        name: name(model),
    })
}

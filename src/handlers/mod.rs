use std::sync::Arc;

use crate::db::DbPool;
use crate::repositories::{AisleStore, BinStore, FloorStore, RoomStore, ShelfStore, WarehouseStore};
use crate::services::inventory::{InventoryStore, SeaOrmInventoryStore};
use crate::services::inventory_location::InventoryLocationAssigner;

pub use crate::AppState;

pub mod aisles;
pub mod bins;
pub mod common;
pub mod floors;
pub mod inventory_locations;
pub mod rooms;
pub mod shelves;
pub mod warehouses;

/// Stores and services shared by the handlers.
#[derive(Clone)]
pub struct AppServices {
    pub warehouses: Arc<WarehouseStore>,
    pub floors: Arc<FloorStore>,
    pub rooms: Arc<RoomStore>,
    pub aisles: Arc<AisleStore>,
    pub shelves: Arc<ShelfStore>,
    pub bins: Arc<BinStore>,
    pub inventory: Arc<SeaOrmInventoryStore>,
    pub inventory_locations: Arc<InventoryLocationAssigner>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        let inventory = Arc::new(SeaOrmInventoryStore::new(db_pool.clone()));
        let inventory_store: Arc<dyn InventoryStore> = inventory.clone();

        Self {
            warehouses: Arc::new(WarehouseStore::new(db_pool.clone())),
            floors: Arc::new(FloorStore::new(db_pool.clone())),
            rooms: Arc::new(RoomStore::new(db_pool.clone())),
            aisles: Arc::new(AisleStore::new(db_pool.clone())),
            shelves: Arc::new(ShelfStore::new(db_pool.clone())),
            bins: Arc::new(BinStore::new(db_pool.clone())),
            inventory_locations: Arc::new(InventoryLocationAssigner::new(
                db_pool,
                inventory_store,
            )),
            inventory,
        }
    }
}

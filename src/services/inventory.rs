//! Inventory stock lookups used by placement.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::entities::inventory;
use crate::errors::ServiceError;
use crate::repositories::inventory_repository::stock_by_id;
use crate::repositories::require_live;

/// Read access to inventory stock levels.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Current stock of one inventory record. Missing records are `NotFound`.
    async fn get_stock(&self, inventory_id: i32) -> Result<i32, ServiceError>;

    /// Stock of several records at once; unknown ids are absent from the map.
    async fn stock_for(&self, inventory_ids: Vec<i32>) -> Result<HashMap<i32, i64>, ServiceError>;
}

/// `InventoryStore` over the `inventories` table.
#[derive(Debug, Clone)]
pub struct SeaOrmInventoryStore {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmInventoryStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Registers an inventory record.
    #[instrument(skip(self))]
    pub async fn create(&self, name: &str, stock: i32) -> Result<inventory::Model, ServiceError> {
        let model = inventory::ActiveModel {
            name: Set(name.to_string()),
            stock: Set(stock),
            deleted: Set(false),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;
        info!(inventory_id = model.id, stock, "Inventory created");
        Ok(model)
    }

    /// Overwrites the stock of an inventory record. Placement capacity is not
    /// re-checked here.
    #[instrument(skip(self))]
    pub async fn set_stock(&self, inventory_id: i32, stock: i32) -> Result<(), ServiceError> {
        let existing = require_live::<inventory::Entity, _>(self.db.as_ref(), inventory_id).await?;
        let mut active: inventory::ActiveModel = existing.into();
        active.stock = Set(stock);
        active.update(self.db.as_ref()).await?;
        Ok(())
    }
}

#[async_trait]
impl InventoryStore for SeaOrmInventoryStore {
    async fn get_stock(&self, inventory_id: i32) -> Result<i32, ServiceError> {
        let row = require_live::<inventory::Entity, _>(self.db.as_ref(), inventory_id).await?;
        Ok(row.stock)
    }

    async fn stock_for(&self, inventory_ids: Vec<i32>) -> Result<HashMap<i32, i64>, ServiceError> {
        Ok(stock_by_id(self.db.as_ref(), &inventory_ids).await?)
    }
}

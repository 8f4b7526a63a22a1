use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{live_children, require_live, soft_delete, FloorStore, LevelStore};
use crate::db::UnitOfWork;
use crate::dto::locations::{
    CreateWarehouseRequest, UpdateWarehouseRequest, WarehouseNode, WarehouseSummary,
};
use crate::entities::{floor, warehouse};
use crate::errors::ServiceError;

/// Aggregate root of the hierarchy. A warehouse create or delete spans the
/// whole subtree in a single transaction.
#[derive(Debug, Clone)]
pub struct WarehouseStore {
    db: Arc<DatabaseConnection>,
    floors: FloorStore,
}

impl WarehouseStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            floors: FloorStore::new(db.clone()),
            db,
        }
    }

    /// Creates a warehouse and every nested floor, room, aisle, shelf and bin.
    /// Nothing is persisted unless the whole tree is.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: &CreateWarehouseRequest) -> Result<i32, ServiceError> {
        let uow = UnitOfWork::begin(self.db.as_ref(), None).await?;
        let result = self.create_within(request, uow.txn()).await;
        let id = uow.finish(result, "Warehouse").await?;
        info!(warehouse_id = id, floors = request.floors.len(), "Warehouse created");
        Ok(id)
    }

    async fn create_within(
        &self,
        request: &CreateWarehouseRequest,
        txn: &DatabaseTransaction,
    ) -> Result<i32, ServiceError> {
        let warehouse = warehouse::ActiveModel {
            name: Set(request.name.clone()),
            address: Set(request.address.clone()),
            deleted: Set(false),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        for floor in &request.floors {
            self.floors.create(warehouse.id, floor, Some(txn)).await?;
        }
        Ok(warehouse.id)
    }

    /// Fetches a warehouse with its full subtree.
    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<WarehouseNode, ServiceError> {
        let warehouse = require_live::<warehouse::Entity, _>(self.db.as_ref(), id).await?;
        let floors = self.floors.get_all(warehouse.id).await?;
        Ok(WarehouseNode {
            id: warehouse.id,
            name: warehouse.name,
            address: warehouse.address,
            created_at: warehouse.created_at,
            updated_at: warehouse.updated_at,
            floors,
        })
    }

    /// Shallow page of live warehouses with their floor counts, plus the total
    /// number of live warehouses.
    #[instrument(skip(self))]
    pub async fn get_all(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<WarehouseSummary>, u64), ServiceError> {
        let paginator = warehouse::Entity::find()
            .filter(warehouse::Column::Deleted.eq(false))
            .order_by_asc(warehouse::Column::Id)
            .paginate(self.db.as_ref(), per_page.max(1));

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;

        let ids: Vec<i32> = rows.iter().map(|w| w.id).collect();
        let mut floor_counts: HashMap<i32, u64> = HashMap::new();
        for floor in live_children::<floor::Entity, _>(self.db.as_ref(), &ids).await? {
            *floor_counts.entry(floor.warehouse_id).or_insert(0) += 1;
        }

        let summaries = rows
            .into_iter()
            .map(|w| WarehouseSummary {
                floor_count: floor_counts.get(&w.id).copied().unwrap_or(0),
                id: w.id,
                name: w.name,
                address: w.address,
                created_at: w.created_at,
            })
            .collect();
        Ok((summaries, total))
    }

    /// Updates name and address. Floors carried by the request are ignored.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: i32,
        request: &UpdateWarehouseRequest,
    ) -> Result<WarehouseNode, ServiceError> {
        let existing = require_live::<warehouse::Entity, _>(self.db.as_ref(), id).await?;

        let mut active: warehouse::ActiveModel = existing.into();
        if let Some(name) = &request.name {
            active.name = Set(name.clone());
        }
        if let Some(address) = &request.address {
            active.address = Set(Some(address.clone()));
        }
        active.updated_at = Set(Some(Utc::now()));
        active.update(self.db.as_ref()).await?;

        info!(warehouse_id = id, "Warehouse updated");
        self.get(id).await
    }

    /// Soft-deletes the warehouse after cascading through its floors.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let uow = UnitOfWork::begin(self.db.as_ref(), None).await?;
        let result = self.delete_within(id, uow.txn()).await;
        uow.finish(result, "Warehouse").await?;
        info!(warehouse_id = id, "Warehouse deleted");
        Ok(())
    }

    async fn delete_within(&self, id: i32, txn: &DatabaseTransaction) -> Result<(), ServiceError> {
        require_live::<warehouse::Entity, _>(txn, id).await?;
        self.floors.delete(None, Some(id), Some(txn)).await?;
        soft_delete::<warehouse::Entity, _>(txn, &[id]).await?;
        Ok(())
    }
}

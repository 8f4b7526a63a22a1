use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DatabaseTransaction, Set};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{live_children, require_live, BinStore, LevelStore, Repository};
use crate::db::UnitOfWork;
use crate::dto::locations::{
    CreateBinRequest, CreateShelfRequest, ShelfBinInput, ShelfNode, UpdateBinRequest,
    UpdateShelfRequest,
};
use crate::entities::{aisle, bin, shelf};
use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct ShelfStore {
    db: Arc<DatabaseConnection>,
    bins: BinStore,
}

/// What a bin reconciliation did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinReconciliation {
    pub updated: Vec<i32>,
    pub created: Vec<i32>,
    pub deleted: Vec<i32>,
}

impl ShelfStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            bins: BinStore::new(db.clone()),
            db,
        }
    }

    /// Updates the shelf and, when the request lists bins, reconciles the
    /// shelf's bins against that list. Runs in one owned transaction.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: i32,
        request: &UpdateShelfRequest,
    ) -> Result<ShelfNode, ServiceError> {
        let uow = UnitOfWork::begin(self.db.as_ref(), None).await?;
        let result = self.update_within(id, request, uow.txn()).await;
        uow.finish(result, "Shelf").await?;
        self.get(id).await
    }

    async fn update_within(
        &self,
        id: i32,
        request: &UpdateShelfRequest,
        txn: &DatabaseTransaction,
    ) -> Result<(), ServiceError> {
        let existing = require_live::<shelf::Entity, _>(txn, id).await?;

        if let Some(name) = &request.name {
            let mut active: shelf::ActiveModel = existing.into();
            active.name = Set(name.clone());
            active.update(txn).await?;
        }

        if let Some(bins) = &request.bins {
            let outcome = self.reconcile_bins(id, bins, txn).await?;
            info!(
                shelf_id = id,
                updated = outcome.updated.len(),
                created = outcome.created.len(),
                deleted = outcome.deleted.len(),
                "Reconciled shelf bins"
            );
        }
        Ok(())
    }

    /// Three-way diff of the shelf's live bins against `incoming`: listed ids
    /// are updated, entries without an id are created, the rest are deleted.
    pub async fn reconcile_bins(
        &self,
        shelf_id: i32,
        incoming: &[ShelfBinInput],
        txn: &DatabaseTransaction,
    ) -> Result<BinReconciliation, ServiceError> {
        let mut remaining: BTreeSet<i32> = live_children::<bin::Entity, _>(txn, &[shelf_id])
            .await?
            .into_iter()
            .map(|b| b.id)
            .collect();
        let mut outcome = BinReconciliation::default();

        for input in incoming {
            match input.id {
                Some(bin_id) => {
                    if !remaining.remove(&bin_id) {
                        return Err(ServiceError::NotFound(format!(
                            "Bin with ID {} not found on shelf {}",
                            bin_id, shelf_id
                        )));
                    }
                    let update = UpdateBinRequest {
                        name: Some(input.name.clone()),
                        capacity: Some(input.capacity),
                        shelf_id: None,
                    };
                    self.bins.update_within(bin_id, &update, txn).await?;
                    outcome.updated.push(bin_id);
                }
                None => {
                    let create = CreateBinRequest {
                        name: input.name.clone(),
                        capacity: input.capacity,
                    };
                    let bin_id = self.bins.create(shelf_id, &create, Some(txn)).await?;
                    outcome.created.push(bin_id);
                }
            }
        }

        for bin_id in remaining {
            self.bins
                .delete(Some(bin_id), Some(shelf_id), Some(txn))
                .await?;
            outcome.deleted.push(bin_id);
        }

        Ok(outcome)
    }
}

impl Repository for ShelfStore {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl LevelStore for ShelfStore {
    type Entity = shelf::Entity;
    type Parent = aisle::Entity;
    type Create = CreateShelfRequest;
    type Node = ShelfNode;

    async fn insert_row(
        &self,
        aisle_id: i32,
        request: &CreateShelfRequest,
        txn: &DatabaseTransaction,
    ) -> Result<i32, ServiceError> {
        let shelf = shelf::ActiveModel {
            name: Set(request.name.clone()),
            aisle_id: Set(aisle_id),
            deleted: Set(false),
            ..Default::default()
        }
        .insert(txn)
        .await?;
        Ok(shelf.id)
    }

    async fn create_children(
        &self,
        id: i32,
        request: &CreateShelfRequest,
        txn: &DatabaseTransaction,
    ) -> Result<(), ServiceError> {
        for bin in &request.bins {
            self.bins.create(id, bin, Some(txn)).await?;
        }
        Ok(())
    }

    async fn to_node(&self, model: shelf::Model) -> Result<ShelfNode, ServiceError> {
        let bins = self.bins.get_all(model.id).await?;
        Ok(ShelfNode {
            id: model.id,
            name: model.name,
            aisle_id: model.aisle_id,
            bins,
        })
    }

    async fn delete_children(
        &self,
        ids: &[i32],
        txn: &DatabaseTransaction,
    ) -> Result<(), ServiceError> {
        for shelf_id in ids {
            self.bins.delete(None, Some(*shelf_id), Some(txn)).await?;
        }
        Ok(())
    }
}

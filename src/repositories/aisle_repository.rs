use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DatabaseTransaction, Set};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{require_live, LevelStore, Repository, ShelfStore};
use crate::dto::locations::{AisleNode, CreateAisleRequest, UpdateAisleRequest};
use crate::entities::{aisle, room};
use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct AisleStore {
    db: Arc<DatabaseConnection>,
    shelves: ShelfStore,
}

impl AisleStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            shelves: ShelfStore::new(db.clone()),
            db,
        }
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: i32,
        request: &UpdateAisleRequest,
    ) -> Result<AisleNode, ServiceError> {
        let existing = require_live::<aisle::Entity, _>(self.db.as_ref(), id).await?;
        if let Some(name) = &request.name {
            let mut active: aisle::ActiveModel = existing.into();
            active.name = Set(name.clone());
            active.update(self.db.as_ref()).await?;
            info!(aisle_id = id, "Aisle updated");
        }
        self.get(id).await
    }
}

impl Repository for AisleStore {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl LevelStore for AisleStore {
    type Entity = aisle::Entity;
    type Parent = room::Entity;
    type Create = CreateAisleRequest;
    type Node = AisleNode;

    async fn insert_row(
        &self,
        room_id: i32,
        request: &CreateAisleRequest,
        txn: &DatabaseTransaction,
    ) -> Result<i32, ServiceError> {
        let aisle = aisle::ActiveModel {
            name: Set(request.name.clone()),
            room_id: Set(room_id),
            deleted: Set(false),
            ..Default::default()
        }
        .insert(txn)
        .await?;
        Ok(aisle.id)
    }

    async fn create_children(
        &self,
        id: i32,
        request: &CreateAisleRequest,
        txn: &DatabaseTransaction,
    ) -> Result<(), ServiceError> {
        for shelf in &request.shelves {
            self.shelves.create(id, shelf, Some(txn)).await?;
        }
        Ok(())
    }

    async fn to_node(&self, model: aisle::Model) -> Result<AisleNode, ServiceError> {
        let shelves = self.shelves.get_all(model.id).await?;
        Ok(AisleNode {
            id: model.id,
            name: model.name,
            room_id: model.room_id,
            shelves,
        })
    }

    async fn delete_children(
        &self,
        ids: &[i32],
        txn: &DatabaseTransaction,
    ) -> Result<(), ServiceError> {
        for aisle_id in ids {
            self.shelves.delete(None, Some(*aisle_id), Some(txn)).await?;
        }
        Ok(())
    }
}

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DatabaseTransaction, Set};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{require_live, LevelStore, Repository, RoomStore};
use crate::dto::locations::{CreateFloorRequest, FloorNode, UpdateFloorRequest};
use crate::entities::{floor, warehouse};
use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct FloorStore {
    db: Arc<DatabaseConnection>,
    rooms: RoomStore,
}

impl FloorStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            rooms: RoomStore::new(db.clone()),
            db,
        }
    }

    /// Renames the floor. Rooms in the request are not reconciled.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: i32,
        request: &UpdateFloorRequest,
    ) -> Result<FloorNode, ServiceError> {
        let existing = require_live::<floor::Entity, _>(self.db.as_ref(), id).await?;
        if let Some(name) = &request.name {
            let mut active: floor::ActiveModel = existing.into();
            active.name = Set(name.clone());
            active.update(self.db.as_ref()).await?;
            info!(floor_id = id, "Floor updated");
        }
        self.get(id).await
    }
}

impl Repository for FloorStore {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl LevelStore for FloorStore {
    type Entity = floor::Entity;
    type Parent = warehouse::Entity;
    type Create = CreateFloorRequest;
    type Node = FloorNode;

    async fn insert_row(
        &self,
        warehouse_id: i32,
        request: &CreateFloorRequest,
        txn: &DatabaseTransaction,
    ) -> Result<i32, ServiceError> {
        let floor = floor::ActiveModel {
            name: Set(request.name.clone()),
            warehouse_id: Set(warehouse_id),
            deleted: Set(false),
            ..Default::default()
        }
        .insert(txn)
        .await?;
        Ok(floor.id)
    }

    async fn create_children(
        &self,
        id: i32,
        request: &CreateFloorRequest,
        txn: &DatabaseTransaction,
    ) -> Result<(), ServiceError> {
        for room in &request.rooms {
            self.rooms.create(id, room, Some(txn)).await?;
        }
        Ok(())
    }

    async fn to_node(&self, model: floor::Model) -> Result<FloorNode, ServiceError> {
        let rooms = self.rooms.get_all(model.id).await?;
        Ok(FloorNode {
            id: model.id,
            name: model.name,
            warehouse_id: model.warehouse_id,
            rooms,
        })
    }

    async fn delete_children(
        &self,
        ids: &[i32],
        txn: &DatabaseTransaction,
    ) -> Result<(), ServiceError> {
        for floor_id in ids {
            self.rooms.delete(None, Some(*floor_id), Some(txn)).await?;
        }
        Ok(())
    }
}

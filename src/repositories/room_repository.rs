use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DatabaseTransaction, Set};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{require_live, AisleStore, LevelStore, Repository};
use crate::dto::locations::{CreateRoomRequest, RoomNode, UpdateRoomRequest};
use crate::entities::{floor, room};
use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct RoomStore {
    db: Arc<DatabaseConnection>,
    aisles: AisleStore,
}

impl RoomStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            aisles: AisleStore::new(db.clone()),
            db,
        }
    }

    /// Updates name and capacity. Aisles are not touched.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: i32,
        request: &UpdateRoomRequest,
    ) -> Result<RoomNode, ServiceError> {
        let existing = require_live::<room::Entity, _>(self.db.as_ref(), id).await?;
        if let Some(capacity) = request.capacity {
            validate_capacity(capacity)?;
        }

        let mut active: room::ActiveModel = existing.into();
        if let Some(name) = &request.name {
            active.name = Set(name.clone());
        }
        if let Some(capacity) = request.capacity {
            active.capacity = Set(Some(capacity));
        }
        if active.is_changed() {
            active.update(self.db.as_ref()).await?;
            info!(room_id = id, "Room updated");
        }
        self.get(id).await
    }
}

fn validate_capacity(capacity: i32) -> Result<(), ServiceError> {
    if capacity < 0 {
        return Err(ServiceError::ValidationError(format!(
            "Room capacity must not be negative, got {}",
            capacity
        )));
    }
    Ok(())
}

impl Repository for RoomStore {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl LevelStore for RoomStore {
    type Entity = room::Entity;
    type Parent = floor::Entity;
    type Create = CreateRoomRequest;
    type Node = RoomNode;

    async fn insert_row(
        &self,
        floor_id: i32,
        request: &CreateRoomRequest,
        txn: &DatabaseTransaction,
    ) -> Result<i32, ServiceError> {
        if let Some(capacity) = request.capacity {
            validate_capacity(capacity)?;
        }
        let room = room::ActiveModel {
            name: Set(request.name.clone()),
            capacity: Set(request.capacity),
            floor_id: Set(floor_id),
            deleted: Set(false),
            ..Default::default()
        }
        .insert(txn)
        .await?;
        Ok(room.id)
    }

    async fn create_children(
        &self,
        id: i32,
        request: &CreateRoomRequest,
        txn: &DatabaseTransaction,
    ) -> Result<(), ServiceError> {
        for aisle in &request.aisles {
            self.aisles.create(id, aisle, Some(txn)).await?;
        }
        Ok(())
    }

    async fn to_node(&self, model: room::Model) -> Result<RoomNode, ServiceError> {
        let aisles = self.aisles.get_all(model.id).await?;
        Ok(RoomNode {
            id: model.id,
            name: model.name,
            capacity: model.capacity,
            floor_id: model.floor_id,
            aisles,
        })
    }

    async fn delete_children(
        &self,
        ids: &[i32],
        txn: &DatabaseTransaction,
    ) -> Result<(), ServiceError> {
        for room_id in ids {
            self.aisles.delete(None, Some(*room_id), Some(txn)).await?;
        }
        Ok(())
    }
}

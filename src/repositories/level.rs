//! Transaction-participating create/read/delete shared by the nested levels.
//!
//! Every operation that writes takes `Option<&DatabaseTransaction>`. With
//! `None` it owns a transaction and settles it; with `Some` it runs inside the
//! caller's transaction and leaves commit and rollback to the caller. Parents
//! pass their transaction down so a whole subtree is one atomic unit.

use async_trait::async_trait;
use sea_orm::{DatabaseTransaction, EntityTrait};
use tracing::{debug, info, instrument};

use super::{live_children, require_live, soft_delete, Repository};
use crate::db::UnitOfWork;
use crate::entities::{LocationEntity, NestedLocationEntity};
use crate::errors::ServiceError;

type ModelOf<S> = <<S as LevelStore>::Entity as EntityTrait>::Model;

/// What a delete call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteScope {
    /// A single node, optionally checked against the parent it should hang off.
    Node { id: i32, parent_id: Option<i32> },
    /// Every live node under a parent.
    Children { parent_id: i32 },
}

impl DeleteScope {
    pub fn resolve(
        level: &'static str,
        id: Option<i32>,
        parent_id: Option<i32>,
    ) -> Result<Self, ServiceError> {
        match (id, parent_id) {
            (Some(id), parent_id) => Ok(DeleteScope::Node { id, parent_id }),
            (None, Some(parent_id)) => Ok(DeleteScope::Children { parent_id }),
            (None, None) => Err(ServiceError::ValidationError(format!(
                "{} delete requires an id or a parent id",
                level
            ))),
        }
    }
}

/// One level of the hierarchy below the warehouse.
///
/// Implementors supply row insertion and how to reach their children; the
/// provided methods carry transaction participation and the bottom-up cascade.
#[async_trait]
pub trait LevelStore: Repository + Send + Sync {
    type Entity: NestedLocationEntity;
    type Parent: LocationEntity;
    type Create: Send + Sync;
    type Node: Send;

    /// Inserts this level's own row under `parent_id` and returns its id.
    async fn insert_row(
        &self,
        parent_id: i32,
        request: &Self::Create,
        txn: &DatabaseTransaction,
    ) -> Result<i32, ServiceError>;

    /// Creates the children carried by `request` under the freshly inserted row.
    async fn create_children(
        &self,
        _id: i32,
        _request: &Self::Create,
        _txn: &DatabaseTransaction,
    ) -> Result<(), ServiceError> {
        Ok(())
    }

    /// Builds the response node, attaching children.
    async fn to_node(&self, model: ModelOf<Self>) -> Result<Self::Node, ServiceError>;

    /// Deletes everything below `ids` inside `txn`.
    async fn delete_children(
        &self,
        _ids: &[i32],
        _txn: &DatabaseTransaction,
    ) -> Result<(), ServiceError> {
        Ok(())
    }

    /// Last check before `ids` are touched. Failing here aborts the delete.
    async fn before_delete(
        &self,
        _ids: &[i32],
        _txn: &DatabaseTransaction,
    ) -> Result<(), ServiceError> {
        Ok(())
    }

    /// Creates a node and its nested children under `parent_id`.
    #[instrument(skip(self, request, txn))]
    async fn create(
        &self,
        parent_id: i32,
        request: &Self::Create,
        txn: Option<&DatabaseTransaction>,
    ) -> Result<i32, ServiceError> {
        let uow = UnitOfWork::begin(self.get_db(), txn).await?;
        let result = self.create_within(parent_id, request, uow.txn()).await;
        uow.finish(result, <Self::Entity as LocationEntity>::LEVEL)
            .await
    }

    async fn create_within(
        &self,
        parent_id: i32,
        request: &Self::Create,
        txn: &DatabaseTransaction,
    ) -> Result<i32, ServiceError> {
        let level = <Self::Entity as LocationEntity>::LEVEL;
        require_live::<Self::Parent, _>(txn, parent_id).await?;
        let id = self.insert_row(parent_id, request, txn).await?;
        self.create_children(id, request, txn).await?;
        debug!(level, id, parent_id, "Created location node");
        Ok(id)
    }

    /// Fetches a live node with its subtree.
    #[instrument(skip(self))]
    async fn get(&self, id: i32) -> Result<Self::Node, ServiceError> {
        let model = require_live::<Self::Entity, _>(self.get_db(), id).await?;
        self.to_node(model).await
    }

    /// Fetches every live node under `parent_id`, each with its subtree.
    #[instrument(skip(self))]
    async fn get_all(&self, parent_id: i32) -> Result<Vec<Self::Node>, ServiceError> {
        let rows = live_children::<Self::Entity, _>(self.get_db(), &[parent_id]).await?;
        let mut nodes = Vec::with_capacity(rows.len());
        for row in rows {
            nodes.push(self.to_node(row).await?);
        }
        Ok(nodes)
    }

    /// Soft-deletes a node, or every node under a parent, after cascading
    /// into their children. Returns the number of nodes marked at this level.
    #[instrument(skip(self, txn))]
    async fn delete(
        &self,
        id: Option<i32>,
        parent_id: Option<i32>,
        txn: Option<&DatabaseTransaction>,
    ) -> Result<u64, ServiceError> {
        let level = <Self::Entity as LocationEntity>::LEVEL;
        let scope = DeleteScope::resolve(level, id, parent_id)?;
        let uow = UnitOfWork::begin(self.get_db(), txn).await?;
        let result = self.delete_within(scope, uow.txn()).await;
        uow.finish(result, level).await
    }

    async fn delete_within(
        &self,
        scope: DeleteScope,
        txn: &DatabaseTransaction,
    ) -> Result<u64, ServiceError> {
        let level = <Self::Entity as LocationEntity>::LEVEL;
        let ids: Vec<i32> = match scope {
            DeleteScope::Node { id, parent_id } => {
                let model = require_live::<Self::Entity, _>(txn, id).await?;
                if let Some(parent_id) = parent_id {
                    if <Self::Entity as NestedLocationEntity>::parent_of(&model) != parent_id {
                        return Err(ServiceError::NotFound(format!(
                            "{} with ID {} not found under parent {}",
                            level, id, parent_id
                        )));
                    }
                }
                vec![id]
            }
            DeleteScope::Children { parent_id } => {
                live_children::<Self::Entity, _>(txn, &[parent_id])
                    .await?
                    .iter()
                    .map(<Self::Entity as LocationEntity>::id_of)
                    .collect()
            }
        };

        if ids.is_empty() {
            return Ok(0);
        }

        self.before_delete(&ids, txn).await?;
        self.delete_children(&ids, txn).await?;
        let marked = soft_delete::<Self::Entity, _>(txn, &ids).await?;
        info!(level, ?ids, "Soft-deleted location nodes");
        Ok(marked)
    }
}

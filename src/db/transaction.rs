/*!
 * Transaction participation
 *
 * Store operations accept `Option<&DatabaseTransaction>`. `None` means the
 * operation owns its transaction: it begins one, commits on success and rolls
 * back on failure. `Some` means a caller higher up the tree already opened one;
 * the operation joins it and leaves commit/rollback to that caller.
 */

use crate::errors::ServiceError;
use metrics::counter;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::{debug, warn};

/// An open transaction, either opened here or borrowed from the caller.
pub enum UnitOfWork<'a> {
    Owned(DatabaseTransaction),
    Ambient(&'a DatabaseTransaction),
}

impl<'a> UnitOfWork<'a> {
    /// Joins `ambient` when present, otherwise begins a new transaction on `db`.
    pub async fn begin(
        db: &DatabaseConnection,
        ambient: Option<&'a DatabaseTransaction>,
    ) -> Result<UnitOfWork<'a>, ServiceError> {
        match ambient {
            Some(txn) => Ok(UnitOfWork::Ambient(txn)),
            None => {
                let txn = db.begin().await?;
                counter!("warehouse_db.transaction.started", 1);
                Ok(UnitOfWork::Owned(txn))
            }
        }
    }

    pub fn txn(&self) -> &DatabaseTransaction {
        match self {
            UnitOfWork::Owned(txn) => txn,
            UnitOfWork::Ambient(txn) => txn,
        }
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, UnitOfWork::Owned(_))
    }

    /// Settles the unit with the outcome of the work done inside it.
    ///
    /// Owned units commit on success; on failure they roll back and the error is
    /// wrapped with `level` context. Ambient units hand the result back untouched.
    pub async fn finish<T>(
        self,
        result: Result<T, ServiceError>,
        level: &'static str,
    ) -> Result<T, ServiceError> {
        let txn = match self {
            UnitOfWork::Ambient(_) => return result,
            UnitOfWork::Owned(txn) => txn,
        };

        match result {
            Ok(value) => match txn.commit().await {
                Ok(()) => {
                    counter!("warehouse_db.transaction.committed", 1);
                    debug!(level, "Transaction committed");
                    Ok(value)
                }
                Err(e) => {
                    counter!("warehouse_db.transaction.rolled_back", 1);
                    Err(ServiceError::rolled_back(level, e.into()))
                }
            },
            Err(err) => {
                counter!("warehouse_db.transaction.rolled_back", 1);
                warn!(level, error = %err, "Rolling back transaction");
                if let Err(rollback_err) = txn.rollback().await {
                    warn!(level, error = %rollback_err, "Rollback failed");
                }
                Err(ServiceError::rolled_back(level, err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectionTrait, DbBackend, Statement};

    async fn scratch_db() -> DatabaseConnection {
        let db = crate::db::establish_in_memory().await.unwrap();
        db.execute(Statement::from_string(
            DbBackend::Sqlite,
            "CREATE TABLE scratch (id INTEGER PRIMARY KEY, label TEXT NOT NULL)".to_string(),
        ))
        .await
        .unwrap();
        db
    }

    async fn insert(txn: &DatabaseTransaction, label: &str) -> Result<(), ServiceError> {
        txn.execute(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            "INSERT INTO scratch (label) VALUES (?)",
            [label.into()],
        ))
        .await?;
        Ok(())
    }

    async fn count(db: &DatabaseConnection) -> i64 {
        let row = db
            .query_one(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT COUNT(*) AS n FROM scratch".to_string(),
            ))
            .await
            .unwrap()
            .unwrap();
        row.try_get::<i64>("", "n").unwrap()
    }

    #[tokio::test]
    async fn owned_unit_commits_on_success() {
        let db = scratch_db().await;
        let uow = UnitOfWork::begin(&db, None).await.unwrap();
        assert!(uow.is_owned());
        let result = insert(uow.txn(), "a").await;
        uow.finish(result, "Test").await.unwrap();
        assert_eq!(count(&db).await, 1);
    }

    #[tokio::test]
    async fn owned_unit_rolls_back_and_wraps() {
        let db = scratch_db().await;
        let uow = UnitOfWork::begin(&db, None).await.unwrap();
        insert(uow.txn(), "a").await.unwrap();
        let err = uow
            .finish::<()>(Err(ServiceError::Conflict("boom".into())), "Test")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::TransactionFailed { level: "Test", .. }));
        assert_eq!(count(&db).await, 0);
    }

    #[tokio::test]
    async fn ambient_unit_leaves_outcome_to_the_owner() {
        let db = scratch_db().await;
        let outer = db.begin().await.unwrap();
        {
            let inner = UnitOfWork::begin(&db, Some(&outer)).await.unwrap();
            assert!(!inner.is_owned());
            insert(inner.txn(), "a").await.unwrap();
            let err = inner
                .finish::<()>(Err(ServiceError::Conflict("boom".into())), "Inner")
                .await
                .unwrap_err();
            // not wrapped, not rolled back
            assert!(matches!(err, ServiceError::Conflict(_)));
        }
        outer.commit().await.unwrap();
        assert_eq!(count(&db).await, 1);
    }
}

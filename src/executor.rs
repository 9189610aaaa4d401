use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::{DatasetError, DatasetResult};

type SharedTransaction = Option<Transaction<'static, Postgres>>;

/// Executor wraps a database transaction for use by repositories.
///
/// Schema statements, seed inserts and report queries issued through clones
/// of the same executor all run inside one PostgreSQL transaction.
#[derive(Clone, Debug)]
pub struct Executor {
    tx: Arc<Mutex<SharedTransaction>>,
}

impl Executor {
    /// Creates a new Executor from a PostgreSQL transaction.
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    /// Locks the transaction for a single statement.
    ///
    /// The slot is `None` once the owning session has committed or rolled back.
    pub async fn lock(&self) -> MutexGuard<'_, SharedTransaction> {
        self.tx.lock().await
    }

    /// Takes ownership of the transaction, leaving None in its place.
    /// This should only be called when committing or rolling back.
    pub(crate) async fn take_transaction(&self) -> DatasetResult<Transaction<'static, Postgres>> {
        self.tx.lock().await.take().ok_or(DatasetError::TransactionClosed)
    }
}

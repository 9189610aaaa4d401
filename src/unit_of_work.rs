use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;

use crate::{DatasetResult, Executor};

/// Unit of Work pattern for managing database transactions.
///
/// Each dataset script (schema install, seed, reset) gets its own session so
/// that it either lands completely or not at all.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    type Session: UnitOfWorkSession;

    /// Begin a new transaction session.
    async fn begin(&self) -> DatasetResult<Self::Session>;
}

/// Represents a single database transaction session.
#[async_trait]
pub trait UnitOfWorkSession: Send + Sync {
    /// Get the executor for this session (provides access to the transaction).
    fn executor(&self) -> &Executor;

    /// Commit the transaction.
    async fn commit(self) -> DatasetResult<()>;

    /// Rollback the transaction.
    async fn rollback(self) -> DatasetResult<()>;
}

/// Default implementation of UnitOfWork for PostgreSQL.
#[derive(Clone)]
pub struct PostgresUnitOfWork {
    pool: Arc<PgPool>,
}

impl PostgresUnitOfWork {
    /// Create a new PostgresUnitOfWork with the given connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UnitOfWork for PostgresUnitOfWork {
    type Session = PostgresUnitOfWorkSession;

    async fn begin(&self) -> DatasetResult<Self::Session> {
        let tx = self.pool.begin().await?;
        tracing::debug!("transaction started");
        Ok(PostgresUnitOfWorkSession::new(tx))
    }
}

/// Default implementation of UnitOfWorkSession for PostgreSQL.
pub struct PostgresUnitOfWorkSession {
    executor: Executor,
}

impl PostgresUnitOfWorkSession {
    /// Create a new session from a PostgreSQL transaction.
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self {
            executor: Executor::new(tx),
        }
    }
}

#[async_trait]
impl UnitOfWorkSession for PostgresUnitOfWorkSession {
    fn executor(&self) -> &Executor {
        &self.executor
    }

    async fn commit(self) -> DatasetResult<()> {
        let tx = self.executor.take_transaction().await?;
        tx.commit().await?;
        tracing::debug!("transaction committed");
        Ok(())
    }

    async fn rollback(self) -> DatasetResult<()> {
        let tx = self.executor.take_transaction().await?;
        tx.rollback().await?;
        tracing::debug!("transaction rolled back");
        Ok(())
    }
}

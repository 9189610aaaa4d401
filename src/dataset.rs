use std::sync::Arc;

use crate::reports::ReportRepository;
use crate::repositories::{OrderRepository, ProductRepository, UserRepository};
use crate::unit_of_work::{PostgresUnitOfWork, PostgresUnitOfWorkSession, UnitOfWork, UnitOfWorkSession};
use crate::{schema, seed, DatabaseConfig, DatasetResult, Executor};

/// Entry point for installing, seeding and querying the shop dataset.
///
/// Each script method opens one session, runs its statements in order and
/// commits. The first failing statement rolls the whole script back and its
/// error is returned unchanged.
#[derive(Clone)]
pub struct Dataset<U = PostgresUnitOfWork> {
    uow: U,
}

impl Dataset<PostgresUnitOfWork> {
    /// Connect using `config` and wrap the pool in a unit of work.
    pub async fn connect(config: &DatabaseConfig) -> DatasetResult<Self> {
        let pool = config.connect().await?;
        Ok(Self::new(PostgresUnitOfWork::new(Arc::new(pool))))
    }

    /// Open a session for reading the dataset.
    ///
    /// The session should be committed or rolled back when done; dropping it
    /// rolls back.
    pub async fn report(&self) -> DatasetResult<ReportSession> {
        let session = self.uow.begin().await?;
        Ok(ReportSession { session })
    }
}

impl<U: UnitOfWork> Dataset<U> {
    pub fn new(uow: U) -> Self {
        Self { uow }
    }

    pub fn unit_of_work(&self) -> &U {
        &self.uow
    }

    /// Create the three tables.
    pub async fn install_schema(&self) -> DatasetResult<()> {
        let session = self.uow.begin().await?;
        let outcome = schema::create_schema(session.executor()).await;
        finish(session, outcome, "install schema").await
    }

    /// Drop the three tables if present.
    pub async fn uninstall(&self) -> DatasetResult<()> {
        let session = self.uow.begin().await?;
        let outcome = schema::drop_schema(session.executor()).await;
        finish(session, outcome, "uninstall schema").await
    }

    /// Insert the fixture rows. Fails with a unique violation if the tables
    /// already hold them.
    pub async fn seed(&self) -> DatasetResult<()> {
        let session = self.uow.begin().await?;
        let outcome = seed::seed(session.executor()).await;
        finish(session, outcome, "seed").await
    }

    /// Delete all rows.
    pub async fn clear(&self) -> DatasetResult<()> {
        let session = self.uow.begin().await?;
        let outcome = schema::clear_data(session.executor()).await;
        finish(session, outcome, "clear").await
    }

    /// Clear and re-seed in one transaction.
    pub async fn reset(&self) -> DatasetResult<()> {
        let session = self.uow.begin().await?;
        let executor = session.executor().clone();
        let outcome = async {
            schema::clear_data(&executor).await?;
            seed::seed(&executor).await
        }
        .await;
        finish(session, outcome, "reset").await
    }
}

async fn finish<S: UnitOfWorkSession>(
    session: S,
    outcome: DatasetResult<()>,
    script: &'static str,
) -> DatasetResult<()> {
    match outcome {
        Ok(()) => {
            session.commit().await?;
            tracing::info!(script, "script committed");
            Ok(())
        }
        Err(err) => {
            tracing::warn!(script, error = %err, "script failed, rolling back");
            if let Err(rollback_err) = session.rollback().await {
                tracing::error!(script, error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}

/// A read session exposing the repositories and reports over one transaction.
pub struct ReportSession {
    session: PostgresUnitOfWorkSession,
}

impl ReportSession {
    pub fn executor(&self) -> &Executor {
        self.session.executor()
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.executor().clone())
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.executor().clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.executor().clone())
    }

    pub fn reports(&self) -> ReportRepository {
        ReportRepository::new(self.executor().clone())
    }

    pub async fn commit(self) -> DatasetResult<()> {
        self.session.commit().await
    }

    pub async fn rollback(self) -> DatasetResult<()> {
        self.session.rollback().await
    }
}

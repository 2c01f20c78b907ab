use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

use heroes_app::{
    repository::HeroRepository,
    uow::{UnitOfWork, UnitOfWorkProvider},
};
use heroes_types::errors::{ApplicationError, DbError};

use crate::repository::PostgresHeroRepository;

type SharedTx<'a> = Arc<Mutex<Transaction<'a, Postgres>>>;

#[derive(Debug, Clone)]
pub struct PostgresUnitOfWorkProvider {
    pool: PgPool,
}

impl PostgresUnitOfWorkProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UnitOfWorkProvider for PostgresUnitOfWorkProvider {
    async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError> {
        let tx = self.pool.begin().await.map_err(DbError::Database)?;

        Ok(Box::new(PostgresUnitOfWork::new(Arc::new(Mutex::new(tx)))))
    }
}

/// Hands out repositories bound to a single Postgres transaction.
#[derive(Debug, Clone)]
pub struct PostgresUnitOfWork<'a> {
    tx: SharedTx<'a>,
}

impl<'a> PostgresUnitOfWork<'a> {
    pub fn new(tx: SharedTx<'a>) -> Self {
        Self { tx }
    }

    /// Takes the transaction back from the repositories. Fails while any of
    /// them is still alive.
    fn into_transaction(self) -> Result<Transaction<'a, Postgres>, DbError> {
        Arc::try_unwrap(self.tx)
            .map(Mutex::into_inner)
            .map_err(|_| DbError::Transaction("transaction still has multiple owners".to_string()))
    }
}

#[async_trait::async_trait]
impl<'a> UnitOfWork<'a> for PostgresUnitOfWork<'a> {
    fn heroes(&self) -> Arc<dyn HeroRepository + 'a> {
        Arc::new(PostgresHeroRepository::new(self.tx.clone()))
    }

    async fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
        let tx = self.into_transaction()?;
        tx.commit().await.map_err(DbError::Database)?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), ApplicationError> {
        // An unreachable transaction is rolled back when its last owner drops.
        match self.into_transaction() {
            Ok(tx) => tx.rollback().await.map_err(DbError::Database)?,
            Err(e) => tracing::warn!("Deferring rollback: {e}"),
        }
        Ok(())
    }
}

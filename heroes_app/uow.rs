use std::sync::Arc;

use heroes_types::errors::ApplicationError;

use crate::repository::HeroRepository;

/// Repositories sharing one transaction. Finishing consumes the unit.
#[async_trait::async_trait]
pub trait UnitOfWork<'a>: Send + Sync {
    fn heroes(&self) -> Arc<dyn HeroRepository + 'a>;

    async fn commit(self: Box<Self>) -> Result<(), ApplicationError>;
    async fn rollback(self: Box<Self>) -> Result<(), ApplicationError>;
}

#[async_trait::async_trait]
pub trait UnitOfWorkProvider: Send + Sync {
    async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError>;
}

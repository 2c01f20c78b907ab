use async_trait::async_trait;
use std::sync::Arc;

use heroes_types::errors::ApplicationError;

use crate::{config::Config, uow::UnitOfWork};

pub mod commands;
pub mod queries;

/// Marker for requests that change stored heroes or their images.
pub trait Command: Send + Sync {}

/// Marker for read-only requests, with the type they resolve to.
pub trait Query: Send + Sync {
    type Output: Send + Sync;
}

/// Runs a [`Command`] inside the unit of work it is given. Committing or
/// rolling back belongs to [`crate::app_bus::AppBus`].
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(
        &self,
        cmd: C,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<(), ApplicationError>;

    /// Called once the unit of work is committed. Nothing done here can undo
    /// the commit, so failures are only logged.
    async fn after_commit(&self, _config: &Arc<Config>) {}
}

#[async_trait]
pub trait QueryHandler<Q: Query> {
    async fn handle(
        &self,
        query: Q,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<Q::Output, ApplicationError>;
}

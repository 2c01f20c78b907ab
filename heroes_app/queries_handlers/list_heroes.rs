use async_trait::async_trait;
use std::sync::Arc;

use heroes_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::ListHeroes},
    uow::UnitOfWork,
};

pub struct ListHeroesHandler {}

impl ListHeroesHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<ListHeroes> for ListHeroesHandler {
    async fn handle(
        &self,
        _query: ListHeroes,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<ListHeroes as Query>::Output, ApplicationError> {
        uow.heroes().list().await
    }
}

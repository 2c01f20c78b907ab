use async_trait::async_trait;
use std::sync::Arc;

use heroes_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::GetHeroById},
    uow::UnitOfWork,
};

pub struct GetHeroByIdHandler {}

impl GetHeroByIdHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetHeroById> for GetHeroByIdHandler {
    async fn handle(
        &self,
        query: GetHeroById,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<GetHeroById as Query>::Output, ApplicationError> {
        let repo = uow.heroes();
        repo.get_by_id(query.id).await
    }
}

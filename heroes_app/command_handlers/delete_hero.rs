use std::sync::Arc;

use heroes_types::errors::{ApplicationError, Result};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::DeleteHero},
    storage::ImageStore,
    uow::UnitOfWork,
};

pub struct DeleteHeroCommandHandler {
    images: Arc<dyn ImageStore>,
}

impl DeleteHeroCommandHandler {
    pub fn new(images: Arc<dyn ImageStore>) -> Self {
        Self { images }
    }
}

#[async_trait::async_trait]
impl CommandHandler<DeleteHero> for DeleteHeroCommandHandler {
    async fn handle(
        &self,
        command: DeleteHero,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<(), ApplicationError> {
        let repo = uow.heroes();
        let hero = repo.get_by_id(command.id).await?;

        // The file goes first; a failed commit leaves the row without its image.
        self.images.delete(&hero.image).await?;
        repo.delete(hero.id).await?;

        tracing::info!("Deleted hero {} ({})", hero.id, hero.name);
        Ok(())
    }
}

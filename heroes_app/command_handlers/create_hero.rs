use std::sync::Arc;

use heroes_types::{
    errors::{ApplicationError, Result},
    hero::Hero,
};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::CreateHero},
    storage::ImageStore,
    uow::UnitOfWork,
};

pub struct CreateHeroCommandHandler {
    images: Arc<dyn ImageStore>,
}

impl CreateHeroCommandHandler {
    pub fn new(images: Arc<dyn ImageStore>) -> Self {
        Self { images }
    }
}

#[async_trait::async_trait]
impl CommandHandler<CreateHero> for CreateHeroCommandHandler {
    async fn handle(
        &self,
        command: CreateHero,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<(), ApplicationError> {
        let image = self.images.save(&command.image).await?;
        let hero = Hero::new(Some(command.id), command.fields, image);

        if let Err(e) = uow.heroes().create(&hero).await {
            // The record was rejected, so nothing references the new file.
            if let Err(cleanup) = self.images.delete(&hero.image).await {
                tracing::warn!("Unable to remove orphaned image {}: {}", hero.image, cleanup);
            }
            return Err(e);
        }

        tracing::info!("Created hero {} ({})", hero.id, hero.name);
        Ok(())
    }
}

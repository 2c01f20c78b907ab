use std::sync::Arc;
use tokio::sync::Mutex;

use heroes_types::errors::{ApplicationError, Result};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::UpdateHero},
    storage::ImageStore,
    uow::UnitOfWork,
};

pub struct UpdateHeroCommandHandler {
    images: Arc<dyn ImageStore>,
    /// Portrait replaced by the last successful `handle`, removed after commit.
    replaced_image: Mutex<Option<String>>,
}

impl UpdateHeroCommandHandler {
    pub fn new(images: Arc<dyn ImageStore>) -> Self {
        Self {
            images,
            replaced_image: Mutex::new(None),
        }
    }
}

#[async_trait::async_trait]
impl CommandHandler<UpdateHero> for UpdateHeroCommandHandler {
    async fn handle(
        &self,
        command: UpdateHero,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<(), ApplicationError> {
        let repo = uow.heroes();
        let mut hero = repo.get_by_id(command.id).await?;
        hero.apply_changes(command.changes);

        let previous_image = match &command.image {
            Some(upload) => {
                let path = self.images.save(upload).await?;
                Some(std::mem::replace(&mut hero.image, path))
            }
            None => None,
        };

        if let Err(e) = repo.update(&hero).await {
            if previous_image.is_some() {
                if let Err(cleanup) = self.images.delete(&hero.image).await {
                    tracing::warn!("Unable to remove orphaned image {}: {}", hero.image, cleanup);
                }
            }
            return Err(e);
        }

        *self.replaced_image.lock().await = previous_image;

        tracing::debug!("Updated hero {}", hero.id);
        Ok(())
    }

    async fn after_commit(&self, _config: &Arc<Config>) {
        let Some(old) = self.replaced_image.lock().await.take() else {
            return;
        };
        if let Err(e) = self.images.delete(&old).await {
            tracing::warn!("Unable to remove replaced image {}: {}", old, e);
        }
    }
}

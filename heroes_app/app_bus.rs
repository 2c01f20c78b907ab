use std::{any::type_name, sync::Arc};

use heroes_types::errors::{ApplicationError, Result};

use crate::{
    config::Config,
    cqrs::{Command, CommandHandler, Query, QueryHandler},
    uow::UnitOfWorkProvider,
};

/// Entry point for every hero operation.
///
/// Each request gets its own unit of work: commands are committed when their
/// handler succeeds and rolled back otherwise, queries are always rolled back.
pub struct AppBus {
    config: Arc<Config>,
    uow_provider: Arc<dyn UnitOfWorkProvider>,
}

impl AppBus {
    pub fn new(config: Arc<Config>, uow_provider: Arc<dyn UnitOfWorkProvider>) -> Self {
        Self {
            config,
            uow_provider,
        }
    }

    pub async fn execute<C, H>(&self, cmd: C, handler: H) -> Result<(), ApplicationError>
    where
        C: Command,
        H: CommandHandler<C>,
    {
        let uow = self.uow_provider.begin().await?;

        match handler.handle(cmd, &uow, &self.config).await {
            Ok(()) => {
                uow.commit().await?;
                handler.after_commit(&self.config).await;
                Ok(())
            }
            Err(e) => {
                tracing::debug!("{} failed, rolling back: {}", short_name::<C>(), e);
                uow.rollback().await?;
                Err(e)
            }
        }
    }

    pub async fn query<Q, H>(&self, query: Q, handler: H) -> Result<Q::Output, ApplicationError>
    where
        Q: Query,
        H: QueryHandler<Q>,
    {
        let uow = self.uow_provider.begin().await?;
        let result = handler.handle(query, &uow, &self.config).await;
        uow.rollback().await?;

        result
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }
}

fn short_name<T>() -> &'static str {
    let name = type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        command_handlers::{DeleteHeroCommandHandler, UpdateHeroCommandHandler},
        cqrs::{
            commands::{DeleteHero, UpdateHero},
            queries::{GetHeroById, ListHeroes},
        },
        queries_handlers::{GetHeroByIdHandler, ListHeroesHandler},
        test_utils::tests::{
            MockImageStore, MockUnitOfWorkProvider, hero_factory, image_upload_factory,
        },
    };
    use heroes_types::{errors::DbError, hero::HeroChanges};
    use uuid::Uuid;

    fn setup() -> (AppBus, Arc<MockUnitOfWorkProvider>, Arc<MockImageStore>) {
        setup_with(MockUnitOfWorkProvider::new())
    }

    fn setup_with(
        provider: MockUnitOfWorkProvider,
    ) -> (AppBus, Arc<MockUnitOfWorkProvider>, Arc<MockImageStore>) {
        let provider = Arc::new(provider);
        let bus = AppBus::new(Arc::new(Config::from_env()), provider.clone());
        (bus, provider, Arc::new(MockImageStore::new()))
    }

    #[tokio::test]
    async fn test_query_reads_shared_store() {
        let (bus, provider, images) = setup();
        let hero = hero_factory(&provider.heroes(), &images, "Clark Kent").await;

        let found = bus
            .query(GetHeroById { id: hero.id }, GetHeroByIdHandler::new())
            .await
            .unwrap();
        let all = bus.query(ListHeroes, ListHeroesHandler::new()).await.unwrap();

        assert_eq!(found.id, hero.id);
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_command_returns_handler_error() {
        let (bus, _, images) = setup();

        let result = bus
            .execute(
                DeleteHero { id: Uuid::new_v4() },
                DeleteHeroCommandHandler::new(images.clone()),
            )
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::Db(DbError::HeroNotFound(_)))
        ));
        assert!(images.deleted().is_empty());
    }

    fn new_image_command(id: Uuid) -> UpdateHero {
        UpdateHero {
            id,
            changes: HeroChanges::default(),
            image: Some(image_upload_factory("new.png", "image/png")),
        }
    }

    #[tokio::test]
    async fn test_replaced_image_removed_after_commit() {
        let (bus, provider, images) = setup();
        let hero = hero_factory(&provider.heroes(), &images, "Clark Kent").await;

        bus.execute(
            new_image_command(hero.id),
            UpdateHeroCommandHandler::new(images.clone()),
        )
        .await
        .unwrap();

        assert!(!images.contains(&hero.image));
        assert_eq!(images.deleted(), vec![hero.image.clone()]);
    }

    #[tokio::test]
    async fn test_failed_commit_keeps_replaced_image() {
        let (bus, provider, images) = setup_with(MockUnitOfWorkProvider::with_failing_commit());
        let hero = hero_factory(&provider.heroes(), &images, "Clark Kent").await;

        let result = bus
            .execute(
                new_image_command(hero.id),
                UpdateHeroCommandHandler::new(images.clone()),
            )
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::Db(DbError::Transaction(_)))
        ));
        assert!(images.contains(&hero.image), "Old image should be kept");
        assert!(images.deleted().is_empty());
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name::<DeleteHero>(), "DeleteHero");
    }
}

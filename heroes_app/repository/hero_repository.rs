use uuid::Uuid;

use heroes_types::{
    errors::{ApplicationError, Result},
    hero::Hero,
};

#[async_trait::async_trait]
pub trait HeroRepository: Send + Sync {
    /// Inserts a new hero. Blank required fields are rejected by the store.
    async fn create(&self, hero: &Hero) -> Result<(), ApplicationError>;

    /// Lists every hero, sorted by name ascending.
    async fn list(&self) -> Result<Vec<Hero>, ApplicationError>;

    /// Retrieves a hero by its UUID
    async fn get_by_id(&self, hero_id: Uuid) -> Result<Hero, ApplicationError>;

    /// Persists every field of an existing hero and refreshes `updated_at`.
    async fn update(&self, hero: &Hero) -> Result<(), ApplicationError>;

    async fn delete(&self, hero_id: Uuid) -> Result<(), ApplicationError>;
}

#[cfg(not(tarpaulin_include))]
pub mod tests {
    use async_trait::async_trait;
    use chrono::Utc;
    use std::{
        collections::{HashMap, HashSet},
        sync::{Arc, Mutex},
    };
    use uuid::Uuid;

    use heroes_types::{
        errors::{ApplicationError, DbError},
        hero::{Hero, HeroFields, parse_values},
    };

    use crate::{
        repository::HeroRepository,
        storage::{ImageStore, ImageUpload, image_path},
        uow::{UnitOfWork, UnitOfWorkProvider},
    };

    #[derive(Default, Clone)]
    pub struct MockHeroRepository {
        heroes: Arc<Mutex<HashMap<Uuid, Hero>>>,
    }

    impl MockHeroRepository {
        pub fn new() -> Self {
            Default::default()
        }

        pub fn count(&self) -> usize {
            self.heroes.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl HeroRepository for MockHeroRepository {
        async fn create(&self, hero: &Hero) -> Result<(), ApplicationError> {
            hero.check_required()?;
            self.heroes.lock().unwrap().insert(hero.id, hero.clone());
            Ok(())
        }

        async fn list(&self) -> Result<Vec<Hero>, ApplicationError> {
            let mut heroes: Vec<Hero> = self.heroes.lock().unwrap().values().cloned().collect();
            heroes.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(heroes)
        }

        async fn get_by_id(&self, hero_id: Uuid) -> Result<Hero, ApplicationError> {
            self.heroes
                .lock()
                .unwrap()
                .get(&hero_id)
                .cloned()
                .ok_or_else(|| ApplicationError::Db(DbError::HeroNotFound(hero_id)))
        }

        async fn update(&self, hero: &Hero) -> Result<(), ApplicationError> {
            hero.check_required()?;
            let mut heroes = self.heroes.lock().unwrap();
            let stored = heroes
                .get_mut(&hero.id)
                .ok_or_else(|| ApplicationError::Db(DbError::HeroNotFound(hero.id)))?;

            *stored = Hero {
                created_at: stored.created_at,
                updated_at: Utc::now(),
                ..hero.clone()
            };
            Ok(())
        }

        async fn delete(&self, hero_id: Uuid) -> Result<(), ApplicationError> {
            self.heroes.lock().unwrap().remove(&hero_id);
            Ok(())
        }
    }

    /// Keeps stored image paths in memory.
    #[derive(Default, Clone)]
    pub struct MockImageStore {
        stored: Arc<Mutex<HashSet<String>>>,
        deleted: Arc<Mutex<Vec<String>>>,
    }

    impl MockImageStore {
        pub fn new() -> Self {
            Default::default()
        }

        /// Registers an image as if it had been uploaded earlier.
        pub fn put(&self, relative_path: &str) {
            self.stored
                .lock()
                .unwrap()
                .insert(relative_path.to_string());
        }

        pub fn contains(&self, relative_path: &str) -> bool {
            self.stored.lock().unwrap().contains(relative_path)
        }

        pub fn stored_count(&self) -> usize {
            self.stored.lock().unwrap().len()
        }

        pub fn deleted(&self) -> Vec<String> {
            self.deleted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ImageStore for MockImageStore {
        async fn save(&self, upload: &ImageUpload) -> Result<String, ApplicationError> {
            upload.ensure_supported()?;
            let path = image_path(&upload.generate_file_name());
            self.put(&path);
            Ok(path)
        }

        async fn delete(&self, relative_path: &str) -> Result<(), ApplicationError> {
            self.stored.lock().unwrap().remove(relative_path);
            self.deleted
                .lock()
                .unwrap()
                .push(relative_path.to_string());
            Ok(())
        }
    }

    #[derive(Default, Clone)]
    pub struct MockUnitOfWork {
        heroes: Arc<MockHeroRepository>,

        // Flags to check if commit/rollback was called
        committed: Arc<Mutex<bool>>,
        rolled_back: Arc<Mutex<bool>>,
        fail_commit: bool,
    }

    impl MockUnitOfWork {
        pub fn new() -> Self {
            Default::default()
        }

        pub fn with_heroes(heroes: Arc<MockHeroRepository>) -> Self {
            Self {
                heroes,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl<'a> UnitOfWork<'a> for MockUnitOfWork {
        fn heroes(&self) -> Arc<dyn HeroRepository + 'a> {
            self.heroes.clone()
        }

        async fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
            if self.fail_commit {
                return Err(ApplicationError::Db(DbError::Transaction(
                    "commit refused".to_string(),
                )));
            }
            *self.committed.lock().unwrap() = true;
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<(), ApplicationError> {
            *self.rolled_back.lock().unwrap() = true;
            Ok(())
        }
    }

    /// Hands out units of work that all share the same in-memory heroes.
    #[derive(Default, Clone)]
    pub struct MockUnitOfWorkProvider {
        heroes: Arc<MockHeroRepository>,
        fail_commit: bool,
    }

    impl MockUnitOfWorkProvider {
        pub fn new() -> Self {
            Default::default()
        }

        /// Every unit of work handed out fails on commit.
        pub fn with_failing_commit() -> Self {
            Self {
                fail_commit: true,
                ..Default::default()
            }
        }

        pub fn heroes(&self) -> Arc<MockHeroRepository> {
            self.heroes.clone()
        }
    }

    #[async_trait]
    impl UnitOfWorkProvider for MockUnitOfWorkProvider {
        async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError> {
            let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork {
                fail_commit: self.fail_commit,
                ..MockUnitOfWork::with_heroes(self.heroes.clone())
            });
            Ok(uow)
        }
    }

    pub fn hero_fields_factory(name: &str) -> HeroFields {
        HeroFields {
            name: name.to_string(),
            nickname: format!("The {name}"),
            birth_date: "1938".to_string(),
            death_date: String::new(),
            description: format!("{name} is a hero"),
            values: parse_values("hope, justice"),
        }
    }

    pub fn image_upload_factory(file_name: &str, content_type: &str) -> ImageUpload {
        ImageUpload {
            field_name: "image".to_string(),
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            bytes: b"\x89PNG\r\n\x1a\n".to_vec(),
        }
    }

    /// Stores a hero along with its image and returns it.
    pub async fn hero_factory(
        heroes: &MockHeroRepository,
        images: &MockImageStore,
        name: &str,
    ) -> Hero {
        let image = image_path(&format!("image-{}.png", Uuid::new_v4()));
        images.put(&image);

        let hero = Hero::new(None, hero_fields_factory(name), image);
        heroes.create(&hero).await.unwrap();
        hero
    }
}

use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use heroes_app::repository::HeroRepository;
use heroes_types::{
    errors::{ApplicationError, DbError, Result},
    hero::Hero,
};

use crate::{mapping::write_error, models as db_models};

/// Implements HeroRepository and operates on transactions.
#[derive(Clone)]
pub struct PostgresHeroRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresHeroRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
impl<'a> HeroRepository for PostgresHeroRepository<'a> {
    async fn create(&self, hero: &Hero) -> Result<(), ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        sqlx::query(
            r#"
            INSERT INTO heroes (id, name, nickname, birth_date, death_date, image,
                                description, tags, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(hero.id)
        .bind(&hero.name)
        .bind(&hero.nickname)
        .bind(&hero.birth_date)
        .bind(&hero.death_date)
        .bind(&hero.image)
        .bind(&hero.description)
        .bind(&hero.values)
        .bind(hero.created_at)
        .bind(hero.updated_at)
        .execute(&mut *tx_guard.as_mut())
        .await
        .map_err(write_error)?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Hero>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let heroes = sqlx::query_as::<_, db_models::Hero>(
            r#"
            SELECT id, name, nickname, birth_date, death_date, image,
                   description, tags, created_at, updated_at
            FROM heroes
            ORDER BY name COLLATE "C" ASC
            "#,
        )
        .fetch_all(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(heroes.into_iter().map(|h| h.into()).collect())
    }

    async fn get_by_id(&self, hero_id: Uuid) -> Result<Hero, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let hero = sqlx::query_as::<_, db_models::Hero>(
            r#"
            SELECT id, name, nickname, birth_date, death_date, image,
                   description, tags, created_at, updated_at
            FROM heroes
            WHERE id = $1
            "#,
        )
        .bind(hero_id)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?
        .ok_or(ApplicationError::Db(DbError::HeroNotFound(hero_id)))?;

        Ok(hero.into())
    }

    async fn update(&self, hero: &Hero) -> Result<(), ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let result = sqlx::query(
            r#"
            UPDATE heroes
            SET name = $2, nickname = $3, birth_date = $4, death_date = $5,
                image = $6, description = $7, tags = $8, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(hero.id)
        .bind(&hero.name)
        .bind(&hero.nickname)
        .bind(&hero.birth_date)
        .bind(&hero.death_date)
        .bind(&hero.image)
        .bind(&hero.description)
        .bind(&hero.values)
        .execute(&mut *tx_guard.as_mut())
        .await
        .map_err(write_error)?;

        if result.rows_affected() == 0 {
            return Err(ApplicationError::Db(DbError::HeroNotFound(hero.id)));
        }
        Ok(())
    }

    async fn delete(&self, hero_id: Uuid) -> Result<(), ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let result = sqlx::query(
            r#"
            DELETE FROM heroes
            WHERE id = $1
            "#,
        )
        .bind(hero_id)
        .execute(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        if result.rows_affected() == 0 {
            return Err(ApplicationError::Db(DbError::HeroNotFound(hero_id)));
        }
        Ok(())
    }
}

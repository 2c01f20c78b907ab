use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Hero {
    pub id: Uuid,
    pub name: String,
    pub nickname: String,
    pub birth_date: String,
    pub death_date: String,
    pub image: String,
    pub description: String,
    /// `values` is reserved in SQL, so tags live in `tags`.
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

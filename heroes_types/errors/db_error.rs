use thiserror::Error;
use uuid::Uuid;

/// Errors for db stuff.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Cannot find hero")]
    HeroNotFound(Uuid),

    #[error("Invalid hero id \"{0}\"")]
    InvalidHeroId(String),

    #[error("Hero validation failed: {0}")]
    Validation(String),

    #[error("{0} must be set")]
    MissingEnv(&'static str),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Transaction error: {0}")]
    Transaction(String),
}

use heroes_types::{
    errors::{ApplicationError, DbError},
    hero::Hero,
};

use crate::models::{self as db_models};

impl From<db_models::Hero> for Hero {
    fn from(hero: db_models::Hero) -> Self {
        Hero {
            id: hero.id,
            name: hero.name,
            nickname: hero.nickname,
            birth_date: hero.birth_date,
            death_date: hero.death_date,
            image: hero.image,
            description: hero.description,
            values: hero.tags,
            created_at: hero.created_at,
            updated_at: hero.updated_at,
        }
    }
}

// SQLSTATE codes raised by the `heroes` table constraints.
const NOT_NULL_VIOLATION: &str = "23502";
const CHECK_VIOLATION: &str = "23514";

/// Turns constraint violations into validation errors, anything else into a db fault.
pub fn write_error(e: sqlx::Error) -> ApplicationError {
    if let sqlx::Error::Database(db_err) = &e {
        let code = db_err.code();
        if matches!(code.as_deref(), Some(NOT_NULL_VIOLATION | CHECK_VIOLATION)) {
            let reason = match db_err.constraint() {
                Some(constraint) => constraint_reason(constraint),
                None => db_err.message().to_string(),
            };
            return ApplicationError::Db(DbError::Validation(reason));
        }
    }
    ApplicationError::Db(DbError::Database(e))
}

/// `heroes_<field>_present` -> `<field> is required`, with the field named as in JSON.
fn constraint_reason(constraint: &str) -> String {
    let column = constraint
        .strip_prefix("heroes_")
        .and_then(|c| c.strip_suffix("_present"))
        .unwrap_or(constraint);

    let mut field = String::with_capacity(column.len());
    let mut upper = false;
    for c in column.chars() {
        match c {
            '_' => upper = true,
            c if upper => {
                field.push(c.to_ascii_uppercase());
                upper = false;
            }
            c => field.push(c),
        }
    }
    format!("{field} is required")
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DbError;

/// A catalog entry: a historical or fictional figure with its portrait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub id: Uuid,
    pub name: String,
    pub nickname: String,
    /// Free-form text, never parsed as a date.
    pub birth_date: String,
    /// Free-form text, never parsed as a date.
    pub death_date: String,
    /// Relative path of the portrait, always `images/<file name>`.
    pub image: String,
    pub description: String,
    /// Tags, kept in the order they were given.
    pub values: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field values for a hero that doesn't exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroFields {
    pub name: String,
    pub nickname: String,
    pub birth_date: String,
    pub death_date: String,
    pub description: String,
    pub values: Vec<String>,
}

/// A partial update. `None` leaves the current value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroChanges {
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub description: Option<String>,
    pub values: Option<Vec<String>>,
}

impl HeroChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Hero {
    /// Returns a new hero with trimmed names and fresh timestamps.
    pub fn new(id: Option<Uuid>, fields: HeroFields, image: String) -> Self {
        let now = Utc::now();

        Self {
            id: id.unwrap_or_else(Uuid::new_v4),
            name: fields.name.trim().to_string(),
            nickname: fields.nickname.trim().to_string(),
            birth_date: fields.birth_date,
            death_date: fields.death_date,
            image,
            description: fields.description,
            values: fields.values,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites every field set in `changes`. Names are trimmed like on creation.
    pub fn apply_changes(&mut self, changes: HeroChanges) {
        if let Some(name) = changes.name {
            self.name = name.trim().to_string();
        }
        if let Some(nickname) = changes.nickname {
            self.nickname = nickname.trim().to_string();
        }
        if let Some(birth_date) = changes.birth_date {
            self.birth_date = birth_date;
        }
        if let Some(death_date) = changes.death_date {
            self.death_date = death_date;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(values) = changes.values {
            self.values = values;
        }
    }

    /// Names of required fields that are blank. `death_date` may be empty for
    /// figures that are still alive.
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("nickname", &self.nickname),
            ("birthDate", &self.birth_date),
            ("image", &self.image),
            ("description", &self.description),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Checks the same constraints the `heroes` table enforces.
    pub fn check_required(&self) -> Result<(), DbError> {
        let blank = self.blank_fields();
        if blank.is_empty() {
            return Ok(());
        }

        let reasons: Vec<String> = blank
            .iter()
            .map(|field| format!("{field} is required"))
            .collect();
        Err(DbError::Validation(reasons.join(", ")))
    }
}

/// Splits a comma separated tag list, trimming each entry.
/// Empty entries and duplicates are kept.
pub fn parse_values(csv: &str) -> Vec<String> {
    csv.split(',').map(|v| v.trim().to_string()).collect()
}

/// Parses a hero id coming from a request path.
pub fn parse_hero_id(raw: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(raw).map_err(|_| DbError::InvalidHeroId(raw.to_string()))
}

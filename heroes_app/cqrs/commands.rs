use uuid::Uuid;

use heroes_types::hero::{HeroChanges, HeroFields};

use crate::{cqrs::Command, storage::ImageUpload};

/// Creates a hero with its portrait. The id is chosen by the caller so the
/// new record can be fetched once the command is committed.
#[derive(Debug, Clone)]
pub struct CreateHero {
    pub id: Uuid,
    pub fields: HeroFields,
    pub image: ImageUpload,
}

impl CreateHero {
    pub fn new(id: Option<Uuid>, fields: HeroFields, image: ImageUpload) -> Self {
        Self {
            id: id.unwrap_or_else(Uuid::new_v4),
            fields,
            image,
        }
    }
}

impl Command for CreateHero {}

#[derive(Debug, Clone)]
pub struct UpdateHero {
    pub id: Uuid,
    pub changes: HeroChanges,
    /// Replaces the current portrait when present.
    pub image: Option<ImageUpload>,
}

impl Command for UpdateHero {}

#[derive(Debug, Clone)]
pub struct DeleteHero {
    pub id: Uuid,
}

impl Command for DeleteHero {}

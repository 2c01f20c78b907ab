use uuid::Uuid;

use heroes_types::hero::Hero;

use crate::cqrs::Query;

/// All heroes, sorted by name.
pub struct ListHeroes;

impl Query for ListHeroes {
    type Output = Vec<Hero>;
}

pub struct GetHeroById {
    pub id: Uuid,
}

impl Query for GetHeroById {
    type Output = Hero;
}

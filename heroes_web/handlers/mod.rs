mod forms;
mod helpers;
mod hero_handler;

pub use forms::HeroForm;
pub use helpers::{ApiError, MessageResponse};
pub use hero_handler::{create_hero, delete_hero, get_hero, list_heroes, update_hero};

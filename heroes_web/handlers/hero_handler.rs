use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use heroes_app::{
    command_handlers::{
        CreateHeroCommandHandler, DeleteHeroCommandHandler, UpdateHeroCommandHandler,
    },
    cqrs::{
        commands::DeleteHero,
        queries::{GetHeroById, ListHeroes},
    },
    queries_handlers::{GetHeroByIdHandler, ListHeroesHandler},
};
use heroes_types::hero::{Hero, parse_hero_id};

use crate::{
    handlers::{ApiError, HeroForm, MessageResponse},
    http::AppState,
};

/// GET /api/heroes
pub async fn list_heroes(State(state): State<AppState>) -> Result<Json<Vec<Hero>>, ApiError> {
    let heroes = state
        .app_bus
        .query(ListHeroes, ListHeroesHandler::new())
        .await?;

    Ok(Json(heroes))
}

/// GET /api/heroes/{id}
pub async fn get_hero(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Hero>, ApiError> {
    let id = parse_hero_id(&id)?;
    let hero = state
        .app_bus
        .query(GetHeroById { id }, GetHeroByIdHandler::new())
        .await?;

    Ok(Json(hero))
}

/// POST /api/heroes
pub async fn create_hero(
    State(state): State<AppState>,
    form: HeroForm,
) -> Result<(StatusCode, Json<Hero>), ApiError> {
    let command = form.into_create_command()?;
    let id = command.id;

    state
        .app_bus
        .execute(command, CreateHeroCommandHandler::new(state.images.clone()))
        .await?;

    let hero = state
        .app_bus
        .query(GetHeroById { id }, GetHeroByIdHandler::new())
        .await?;

    Ok((StatusCode::CREATED, Json(hero)))
}

/// PATCH /api/heroes/{id}
pub async fn update_hero(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: HeroForm,
) -> Result<Json<Hero>, ApiError> {
    let id = parse_hero_id(&id)?;
    let command = form.into_update_command(id);

    if command.changes.is_empty() && command.image.is_none() {
        tracing::debug!("Update for hero {} carries no changes", id);
    }

    state
        .app_bus
        .execute(command, UpdateHeroCommandHandler::new(state.images.clone()))
        .await?;

    let hero = state
        .app_bus
        .query(GetHeroById { id }, GetHeroByIdHandler::new())
        .await?;

    Ok(Json(hero))
}

/// DELETE /api/heroes/{id}
pub async fn delete_hero(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_hero_id(&id)?;

    state
        .app_bus
        .execute(
            DeleteHero { id },
            DeleteHeroCommandHandler::new(state.images.clone()),
        )
        .await?;

    Ok(Json(MessageResponse::new("Hero deleted")))
}

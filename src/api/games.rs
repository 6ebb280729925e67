//! Game endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::{require_text, AppState};
use crate::error::Result;
use crate::services::{GameView, ReviewView};

#[derive(Deserialize)]
pub struct CreateGameRequest {
    pub title: String,
    pub console_id: i32,
}

#[derive(Deserialize)]
pub struct UpdateGameRequest {
    pub title: Option<String>,
    pub console_id: Option<i32>,
}

/// GET /games
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<GameView>>> {
    Ok(Json(state.games.list_all().await?))
}

/// GET /games/:id
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<GameView>> {
    Ok(Json(state.games.get(id).await?))
}

/// POST /games
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<GameView>)> {
    require_text("title", &req.title)?;

    let game = state.games.create(req.title, req.console_id).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

/// PATCH /games/:id
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateGameRequest>,
) -> Result<Json<GameView>> {
    if let Some(title) = &req.title {
        require_text("title", title)?;
    }

    let game = state.games.update(id, req.title, req.console_id).await?;
    Ok(Json(game))
}

/// DELETE /games/:id
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    state.games.delete(id).await?;
    Ok(Json(serde_json::json!({
        "message": format!("Game {} deleted", id)
    })))
}

/// GET /games/:id/reviews
pub async fn reviews(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ReviewView>>> {
    Ok(Json(state.games.reviews_for(id).await?))
}

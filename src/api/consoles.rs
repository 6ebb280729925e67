//! Console endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::{require_text, AppState};
use crate::db::entities::console;
use crate::error::Result;
use crate::services::GameView;

#[derive(Deserialize)]
pub struct CreateConsoleRequest {
    pub name: String,
    pub manufacturer: String,
}

#[derive(Deserialize)]
pub struct UpdateConsoleRequest {
    pub name: Option<String>,
    pub manufacturer: Option<String>,
}

/// GET /consoles
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<console::Model>>> {
    Ok(Json(state.consoles.list_all().await?))
}

/// GET /consoles/:id
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<console::Model>> {
    Ok(Json(state.consoles.get(id).await?))
}

/// POST /consoles
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateConsoleRequest>,
) -> Result<(StatusCode, Json<console::Model>)> {
    require_text("name", &req.name)?;
    require_text("manufacturer", &req.manufacturer)?;

    let console = state.consoles.create(req.name, req.manufacturer).await?;
    Ok((StatusCode::CREATED, Json(console)))
}

/// PATCH /consoles/:id
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateConsoleRequest>,
) -> Result<Json<console::Model>> {
    if let Some(name) = &req.name {
        require_text("name", name)?;
    }
    if let Some(manufacturer) = &req.manufacturer {
        require_text("manufacturer", manufacturer)?;
    }

    let console = state.consoles.update(id, req.name, req.manufacturer).await?;
    Ok(Json(console))
}

/// DELETE /consoles/:id
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    state.consoles.delete(id).await?;
    Ok(Json(serde_json::json!({
        "message": format!("Console {} deleted", id)
    })))
}

/// GET /consoles/:id/games
pub async fn games(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<GameView>>> {
    Ok(Json(state.consoles.games_for(id).await?))
}

//! Review endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::{check_rating, require_text, AppState};
use crate::error::Result;
use crate::services::ReviewView;

#[derive(Deserialize)]
pub struct CreateReviewRequest {
    pub review_text: String,
    pub rating: i32,
    pub game_id: i32,
}

#[derive(Deserialize)]
pub struct UpdateReviewRequest {
    pub review_text: Option<String>,
    pub rating: Option<i32>,
    pub game_id: Option<i32>,
}

/// GET /reviews
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ReviewView>>> {
    Ok(Json(state.reviews.list_all().await?))
}

/// GET /reviews/:id
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ReviewView>> {
    Ok(Json(state.reviews.get(id).await?))
}

/// POST /reviews
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewView>)> {
    require_text("review_text", &req.review_text)?;
    check_rating(req.rating)?;

    let review = state
        .reviews
        .create(req.review_text, req.rating, req.game_id)
        .await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// PATCH /reviews/:id
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateReviewRequest>,
) -> Result<Json<ReviewView>> {
    if let Some(review_text) = &req.review_text {
        require_text("review_text", review_text)?;
    }
    if let Some(rating) = req.rating {
        check_rating(rating)?;
    }

    let review = state
        .reviews
        .update(id, req.review_text, req.rating, req.game_id)
        .await?;
    Ok(Json(review))
}

/// DELETE /reviews/:id
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    state.reviews.delete(id).await?;
    Ok(Json(serde_json::json!({
        "message": format!("Review {} deleted", id)
    })))
}

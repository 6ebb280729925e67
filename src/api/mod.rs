//! HTTP boundary: routes, request DTOs and input validation.

pub mod consoles;
pub mod games;
pub mod reviews;

use std::sync::Arc;

use axum::{
    routing::get,
    Json, Router,
};
use sea_orm::DatabaseConnection;

use crate::error::{ApiError, Result};
use crate::services::{ConsoleService, GameService, ReviewService};

/// Application state shared across handlers
pub struct AppState {
    pub consoles: ConsoleService,
    pub games: GameService,
    pub reviews: ReviewService,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            consoles: ConsoleService::new(db.clone()),
            games: GameService::new(db.clone()),
            reviews: ReviewService::new(db),
        }
    }
}

/// Create the API router
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/consoles", get(consoles::list).post(consoles::create))
        .route(
            "/consoles/:id",
            get(consoles::get_by_id)
                .patch(consoles::update)
                .delete(consoles::delete),
        )
        .route("/consoles/:id/games", get(consoles::games))
        .route("/games", get(games::list).post(games::create))
        .route(
            "/games/:id",
            get(games::get_by_id)
                .patch(games::update)
                .delete(games::delete),
        )
        .route("/games/:id/reviews", get(games::reviews))
        .route("/reviews", get(reviews::list).post(reviews::create))
        .route(
            "/reviews/:id",
            get(reviews::get_by_id)
                .patch(reviews::update)
                .delete(reviews::delete),
        )
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Reject empty or whitespace-only required text
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

/// Ratings are 1 to 5 inclusive
pub(crate) fn check_rating(rating: i32) -> Result<()> {
    if !(1..=5).contains(&rating) {
        return Err(ApiError::Validation(format!(
            "rating must be between 1 and 5, got {}",
            rating
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_rejected() {
        assert!(require_text("name", "Nintendo").is_ok());
        assert!(matches!(
            require_text("name", "").unwrap_err(),
            ApiError::Validation(_)
        ));
        assert!(require_text("name", "   ").is_err());
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(check_rating(1).is_ok());
        assert!(check_rating(5).is_ok());
        assert!(check_rating(0).is_err());
        assert!(check_rating(6).is_err());
    }
}

//! Review service. Reviews are the terminal entity: nothing references them,
//! so deletes are unconditional. Rating range is checked at the HTTP boundary
//! and treated as a precondition here.

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set,
};

use super::{review_view, ReviewView};
use crate::db::entities::{console, game, review, Console, Game, Review};
use crate::error::{ApiError, Result};

#[derive(Clone)]
pub struct ReviewService {
    db: DatabaseConnection,
}

impl ReviewService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_all(&self) -> Result<Vec<ReviewView>> {
        let rows = Review::find()
            .find_also_related(Game)
            .all(&self.db)
            .await?;

        let mut views = Vec::with_capacity(rows.len());
        for (review, game) in &rows {
            let console = self.console_of(game.as_ref()).await?;
            views.push(review_view(
                review,
                game.as_ref().map(|g| (g, console.as_ref())),
            ));
        }
        Ok(views)
    }

    pub async fn get(&self, id: i32) -> Result<ReviewView> {
        let (review, game) = Review::find_by_id(id)
            .find_also_related(Game)
            .one(&self.db)
            .await?
            .ok_or(ApiError::ReviewNotFound(id))?;

        let console = self.console_of(game.as_ref()).await?;
        Ok(review_view(
            &review,
            game.as_ref().map(|g| (g, console.as_ref())),
        ))
    }

    /// The target game must exist before the review row is inserted
    pub async fn create(&self, review_text: String, rating: i32, game_id: i32) -> Result<ReviewView> {
        let game = Game::find_by_id(game_id)
            .one(&self.db)
            .await?
            .ok_or(ApiError::GameNotFound(game_id))?;

        let review = review::ActiveModel {
            review_text: Set(review_text),
            rating: Set(rating),
            game_id: Set(game_id),
            ..Default::default()
        };
        let review = review.insert(&self.db).await?;
        tracing::debug!("Created review {} for game {}", review.id, game_id);

        let console = self.console_of(Some(&game)).await?;
        Ok(review_view(&review, Some((&game, console.as_ref()))))
    }

    /// Partial update; a new game_id is validated before the key changes
    pub async fn update(
        &self,
        id: i32,
        review_text: Option<String>,
        rating: Option<i32>,
        game_id: Option<i32>,
    ) -> Result<ReviewView> {
        let existing = Review::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ApiError::ReviewNotFound(id))?;

        if let Some(game_id) = game_id {
            Game::find_by_id(game_id)
                .one(&self.db)
                .await?
                .ok_or(ApiError::GameNotFound(game_id))?;
        }

        let mut active: review::ActiveModel = existing.into();
        if let Some(review_text) = review_text {
            active.review_text = Set(review_text);
        }
        if let Some(rating) = rating {
            active.rating = Set(rating);
        }
        if let Some(game_id) = game_id {
            active.game_id = Set(game_id);
        }
        active.update(&self.db).await?;

        self.get(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        let review = Review::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ApiError::ReviewNotFound(id))?;
        review.delete(&self.db).await?;
        tracing::debug!("Deleted review {}", id);
        Ok(())
    }

    async fn console_of(&self, game: Option<&game::Model>) -> Result<Option<console::Model>> {
        match game {
            Some(game) => Ok(Console::find_by_id(game.console_id).one(&self.db).await?),
            None => Ok(None),
        }
    }
}

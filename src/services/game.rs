//! Game service. Games sit in the middle of the dependency chain: their
//! console must exist on create/update, and reviews block their deletion.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Set,
};

use super::{game_view, review_view, GameView, ReviewView};
use crate::db::entities::{console, game, review, Console, Game, Review};
use crate::error::{ApiError, Result};

#[derive(Clone)]
pub struct GameService {
    db: DatabaseConnection,
}

impl GameService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_all(&self) -> Result<Vec<GameView>> {
        let rows = Game::find()
            .find_also_related(Console)
            .all(&self.db)
            .await?;
        Ok(rows
            .iter()
            .map(|(game, console)| game_view(game, console.as_ref()))
            .collect())
    }

    pub async fn get(&self, id: i32) -> Result<GameView> {
        let (game, console) = self.fetch_with_console(id).await?;
        Ok(game_view(&game, console.as_ref()))
    }

    /// The target console must exist before the game row is inserted
    pub async fn create(&self, title: String, console_id: i32) -> Result<GameView> {
        let console = Console::find_by_id(console_id)
            .one(&self.db)
            .await?
            .ok_or(ApiError::ConsoleNotFound(console_id))?;

        let game = game::ActiveModel {
            title: Set(title),
            console_id: Set(console_id),
            ..Default::default()
        };
        let game = game.insert(&self.db).await?;
        tracing::debug!("Created game {} ({})", game.id, game.title);

        Ok(game_view(&game, Some(&console)))
    }

    /// Partial update; a new console_id is validated before the key changes
    pub async fn update(
        &self,
        id: i32,
        title: Option<String>,
        console_id: Option<i32>,
    ) -> Result<GameView> {
        let existing = Game::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ApiError::GameNotFound(id))?;

        if let Some(console_id) = console_id {
            Console::find_by_id(console_id)
                .one(&self.db)
                .await?
                .ok_or(ApiError::ConsoleNotFound(console_id))?;
        }

        let mut active: game::ActiveModel = existing.into();
        if let Some(title) = title {
            active.title = Set(title);
        }
        if let Some(console_id) = console_id {
            active.console_id = Set(console_id);
        }
        active.update(&self.db).await?;

        let (game, console) = self.fetch_with_console(id).await?;
        Ok(game_view(&game, console.as_ref()))
    }

    /// Refuses to delete while any review still references the game
    pub async fn delete(&self, id: i32) -> Result<()> {
        let dependents = Review::find()
            .filter(review::Column::GameId.eq(id))
            .count(&self.db)
            .await?;
        if dependents > 0 {
            return Err(ApiError::GameInUse(id));
        }

        let game = Game::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ApiError::GameNotFound(id))?;
        game.delete(&self.db).await?;
        tracing::debug!("Deleted game {}", id);
        Ok(())
    }

    /// All reviews on a game, each with a minimal game view embedded.
    /// The game and its console are fetched once, not once per review.
    pub async fn reviews_for(&self, id: i32) -> Result<Vec<ReviewView>> {
        let (game, console) = self.fetch_with_console(id).await?;

        let reviews = Review::find()
            .filter(review::Column::GameId.eq(id))
            .all(&self.db)
            .await?;

        Ok(reviews
            .iter()
            .map(|r| review_view(r, Some((&game, console.as_ref()))))
            .collect())
    }

    async fn fetch_with_console(
        &self,
        id: i32,
    ) -> Result<(game::Model, Option<console::Model>)> {
        Game::find_by_id(id)
            .find_also_related(Console)
            .one(&self.db)
            .await?
            .ok_or(ApiError::GameNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_database;
    use crate::services::{ConsoleService, ReviewService};

    async fn seed_console(db: &DatabaseConnection) -> console::Model {
        ConsoleService::new(db.clone())
            .create("NES".to_string(), "Nintendo".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_attaches_the_console() {
        let db = test_database().await;
        let console = seed_console(&db).await;
        let games = GameService::new(db);

        let game = games
            .create("Metroid".to_string(), console.id)
            .await
            .unwrap();

        assert_eq!(game.title, "Metroid");
        let embedded = game.console.unwrap();
        assert_eq!(embedded.id, console.id);
        assert_eq!(embedded.manufacturer, "Nintendo");
    }

    #[tokio::test]
    async fn create_with_missing_console_inserts_nothing() {
        let db = test_database().await;
        let games = GameService::new(db);

        let err = games.create("Orphan".to_string(), 123).await.unwrap_err();
        assert!(matches!(err, ApiError::ConsoleNotFound(123)));

        assert!(games.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_all_eagerly_loads_consoles() {
        let db = test_database().await;
        let console = seed_console(&db).await;
        let games = GameService::new(db);

        games.create("Zelda".to_string(), console.id).await.unwrap();
        games
            .create("Punch-Out!!".to_string(), console.id)
            .await
            .unwrap();

        let listed = games.list_all().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|g| g.console.is_some()));
    }

    #[tokio::test]
    async fn update_with_missing_console_leaves_key_unchanged() {
        let db = test_database().await;
        let console = seed_console(&db).await;
        let games = GameService::new(db);

        let game = games
            .create("Kid Icarus".to_string(), console.id)
            .await
            .unwrap();

        let err = games
            .update(game.id, None, Some(555))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ConsoleNotFound(555)));

        let after = games.get(game.id).await.unwrap();
        assert_eq!(after.console.unwrap().id, console.id);
    }

    #[tokio::test]
    async fn partial_update_changes_only_the_console() {
        let db = test_database().await;
        let consoles = ConsoleService::new(db.clone());
        let games = GameService::new(db);

        let nes = consoles
            .create("NES".to_string(), "Nintendo".to_string())
            .await
            .unwrap();
        let snes = consoles
            .create("SNES".to_string(), "Nintendo".to_string())
            .await
            .unwrap();

        let game = games.create("Contra".to_string(), nes.id).await.unwrap();
        let updated = games.update(game.id, None, Some(snes.id)).await.unwrap();

        assert_eq!(updated.title, "Contra");
        assert_eq!(updated.console.unwrap().id, snes.id);
    }

    #[tokio::test]
    async fn update_missing_game_is_not_found() {
        let db = test_database().await;
        let games = GameService::new(db);

        let err = games
            .update(3, Some("Ghost".to_string()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::GameNotFound(3)));
    }

    #[tokio::test]
    async fn delete_with_dependent_review_is_a_conflict() {
        let db = test_database().await;
        let console = seed_console(&db).await;
        let games = GameService::new(db.clone());
        let reviews = ReviewService::new(db);

        let game = games
            .create("Dragon Quest".to_string(), console.id)
            .await
            .unwrap();
        reviews
            .create("A classic".to_string(), 4, game.id)
            .await
            .unwrap();

        let err = games.delete(game.id).await.unwrap_err();
        assert!(matches!(err, ApiError::GameInUse(id) if id == game.id));
        assert!(games.get(game.id).await.is_ok());
    }

    #[tokio::test]
    async fn delete_missing_game_is_not_found() {
        let db = test_database().await;
        let games = GameService::new(db);

        let err = games.delete(11).await.unwrap_err();
        assert!(matches!(err, ApiError::GameNotFound(11)));
    }

    #[tokio::test]
    async fn reviews_for_embeds_a_game_view() {
        let db = test_database().await;
        let console = seed_console(&db).await;
        let games = GameService::new(db.clone());
        let reviews = ReviewService::new(db);

        let game = games
            .create("Mother".to_string(), console.id)
            .await
            .unwrap();
        reviews
            .create("Weird and wonderful".to_string(), 5, game.id)
            .await
            .unwrap();

        let listed = games.reviews_for(game.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        let embedded = listed[0].game.as_ref().unwrap();
        assert_eq!(embedded.id, game.id);
        assert_eq!(embedded.title, "Mother");
        assert_eq!(embedded.console.as_ref().unwrap().id, console.id);
    }

    #[tokio::test]
    async fn reviews_for_missing_game_is_not_found() {
        let db = test_database().await;
        let games = GameService::new(db);

        let err = games.reviews_for(8).await.unwrap_err();
        assert!(matches!(err, ApiError::GameNotFound(8)));
    }
}

//! Console service: CRUD plus the delete guard against referencing games.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Set,
};

use super::{game_view, GameView};
use crate::db::entities::{console, game, Console, Game};
use crate::error::{ApiError, Result};

#[derive(Clone)]
pub struct ConsoleService {
    db: DatabaseConnection,
}

impl ConsoleService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_all(&self) -> Result<Vec<console::Model>> {
        Ok(Console::find().all(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> Result<console::Model> {
        Console::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ApiError::ConsoleNotFound(id))
    }

    pub async fn create(&self, name: String, manufacturer: String) -> Result<console::Model> {
        let console = console::ActiveModel {
            name: Set(name),
            manufacturer: Set(manufacturer),
            ..Default::default()
        };
        let console = console.insert(&self.db).await?;
        tracing::debug!("Created console {} ({})", console.id, console.name);
        Ok(console)
    }

    /// Partial update: absent fields keep their stored value
    pub async fn update(
        &self,
        id: i32,
        name: Option<String>,
        manufacturer: Option<String>,
    ) -> Result<console::Model> {
        let existing = self.get(id).await?;

        let mut active: console::ActiveModel = existing.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(manufacturer) = manufacturer {
            active.manufacturer = Set(manufacturer);
        }

        Ok(active.update(&self.db).await?)
    }

    /// Refuses to delete while any game still references the console
    pub async fn delete(&self, id: i32) -> Result<()> {
        let dependents = Game::find()
            .filter(game::Column::ConsoleId.eq(id))
            .count(&self.db)
            .await?;
        if dependents > 0 {
            return Err(ApiError::ConsoleInUse(id));
        }

        let console = self.get(id).await?;
        console.delete(&self.db).await?;
        tracing::debug!("Deleted console {}", id);
        Ok(())
    }

    /// All games on a console, each with the parent console embedded.
    /// The console is fetched once, not once per game.
    pub async fn games_for(&self, id: i32) -> Result<Vec<GameView>> {
        let console = self.get(id).await?;

        let games = Game::find()
            .filter(game::Column::ConsoleId.eq(id))
            .all(&self.db)
            .await?;

        Ok(games
            .iter()
            .map(|g| game_view(g, Some(&console)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_database;
    use crate::services::GameService;

    #[tokio::test]
    async fn create_and_get_round_trip() {
        let db = test_database().await;
        let consoles = ConsoleService::new(db);

        let created = consoles
            .create("Switch".to_string(), "Nintendo".to_string())
            .await
            .unwrap();
        let fetched = consoles.get(created.id).await.unwrap();

        assert_eq!(fetched.name, "Switch");
        assert_eq!(fetched.manufacturer, "Nintendo");
    }

    #[tokio::test]
    async fn get_missing_returns_not_found() {
        let db = test_database().await;
        let consoles = ConsoleService::new(db);

        let err = consoles.get(42).await.unwrap_err();
        assert!(matches!(err, ApiError::ConsoleNotFound(42)));
    }

    #[tokio::test]
    async fn partial_update_keeps_absent_fields() {
        let db = test_database().await;
        let consoles = ConsoleService::new(db);

        let created = consoles
            .create("Mega Drive".to_string(), "Sega".to_string())
            .await
            .unwrap();
        let updated = consoles
            .update(created.id, Some("Genesis".to_string()), None)
            .await
            .unwrap();

        assert_eq!(updated.name, "Genesis");
        assert_eq!(updated.manufacturer, "Sega");
    }

    #[tokio::test]
    async fn delete_with_dependent_game_is_a_conflict() {
        let db = test_database().await;
        let consoles = ConsoleService::new(db.clone());
        let games = GameService::new(db);

        let console = consoles
            .create("SNES".to_string(), "Nintendo".to_string())
            .await
            .unwrap();
        games
            .create("Super Metroid".to_string(), console.id)
            .await
            .unwrap();

        let err = consoles.delete(console.id).await.unwrap_err();
        assert!(matches!(err, ApiError::ConsoleInUse(id) if id == console.id));

        // Still there
        assert!(consoles.get(console.id).await.is_ok());
    }

    #[tokio::test]
    async fn delete_without_dependents_succeeds() {
        let db = test_database().await;
        let consoles = ConsoleService::new(db);

        let console = consoles
            .create("Dreamcast".to_string(), "Sega".to_string())
            .await
            .unwrap();
        consoles.delete(console.id).await.unwrap();

        let err = consoles.get(console.id).await.unwrap_err();
        assert!(matches!(err, ApiError::ConsoleNotFound(_)));
    }

    #[tokio::test]
    async fn delete_missing_returns_not_found() {
        let db = test_database().await;
        let consoles = ConsoleService::new(db);

        let err = consoles.delete(7).await.unwrap_err();
        assert!(matches!(err, ApiError::ConsoleNotFound(7)));
    }

    #[tokio::test]
    async fn games_for_embeds_the_console() {
        let db = test_database().await;
        let consoles = ConsoleService::new(db.clone());
        let games = GameService::new(db);

        let console = consoles
            .create("N64".to_string(), "Nintendo".to_string())
            .await
            .unwrap();
        games
            .create("Mario Kart 64".to_string(), console.id)
            .await
            .unwrap();
        games
            .create("GoldenEye 007".to_string(), console.id)
            .await
            .unwrap();

        let listed = consoles.games_for(console.id).await.unwrap();
        assert_eq!(listed.len(), 2);
        for game in &listed {
            let embedded = game.console.as_ref().unwrap();
            assert_eq!(embedded.id, console.id);
            assert_eq!(embedded.name, "N64");
            assert_eq!(embedded.manufacturer, "Nintendo");
        }
    }

    #[tokio::test]
    async fn games_for_missing_console_is_not_found() {
        let db = test_database().await;
        let consoles = ConsoleService::new(db);

        let err = consoles.games_for(99).await.unwrap_err();
        assert!(matches!(err, ApiError::ConsoleNotFound(99)));
    }
}

//! Integrity and orchestration services.
//!
//! Each service wraps the persistence layer for one entity and enforces the
//! cross-entity rules: a game's console must exist, a review's game must
//! exist, and a delete is refused while dependents reference the row. The
//! dependent-check-then-delete sequence is not atomic against concurrent
//! writes; the database serializes conflicting writes itself.

pub mod console;
pub mod game;
pub mod review;

pub use console::ConsoleService;
pub use game::GameService;
pub use review::ReviewService;

use serde::Serialize;

use crate::db::entities::{console as console_entity, game as game_entity, review as review_entity};

/// Console fields embedded in composite responses
#[derive(Debug, Clone, Serialize)]
pub struct ConsoleView {
    pub id: i32,
    pub name: String,
    pub manufacturer: String,
}

/// Game with its parent console attached
#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub id: i32,
    pub title: String,
    pub console: Option<ConsoleView>,
}

/// Review with its parent game (and transitively console) attached
#[derive(Debug, Clone, Serialize)]
pub struct ReviewView {
    pub id: i32,
    pub review_text: String,
    pub rating: i32,
    pub game_id: i32,
    pub game: Option<GameView>,
}

pub fn console_view(console: &console_entity::Model) -> ConsoleView {
    ConsoleView {
        id: console.id,
        name: console.name.clone(),
        manufacturer: console.manufacturer.clone(),
    }
}

pub fn game_view(game: &game_entity::Model, console: Option<&console_entity::Model>) -> GameView {
    GameView {
        id: game.id,
        title: game.title.clone(),
        console: console.map(console_view),
    }
}

pub fn review_view(
    review: &review_entity::Model,
    game: Option<(&game_entity::Model, Option<&console_entity::Model>)>,
) -> ReviewView {
    ReviewView {
        id: review.id,
        review_text: review.review_text.clone(),
        rating: review.rating,
        game_id: review.game_id,
        game: game.map(|(g, c)| game_view(g, c)),
    }
}

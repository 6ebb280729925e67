//! Database entities

pub mod console;
pub mod game;
pub mod review;

pub use console::Entity as Console;
pub use game::Entity as Game;
pub use review::Entity as Review;

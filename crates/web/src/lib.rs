//! HTTP boundary for the game: session directory, high scores and the
//! JSON API served over tiny_http.

pub mod api;
pub mod directory;
pub mod highscores;
pub mod server;
pub mod settings;

pub use api::*;
pub use directory::*;
pub use highscores::*;
pub use server::*;
pub use settings::*;

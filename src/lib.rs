//! Cookie Chase: the arcade maze mini-game from the cookie storefront,
//! rebuilt as a standalone engine.
//!
//! The engine is renderer-agnostic: a host owns a [`Game`], feeds it input
//! and elapsed time, and draws whatever [`Game::snapshot`] reports. The
//! bundled binary is one such host, a crossterm terminal frontend.

pub mod agent;
pub mod cookies;
pub mod game;
pub mod ghost;
pub mod grid;
pub mod maze;

pub use agent::Agent;
pub use cookies::ScatterError;
pub use game::{
    CookieSource, Game, GameConfig, GameEvent, GhostSpawn, LossCause, Phase, Snapshot,
};
pub use ghost::{Ghost, GhostColor};
pub use grid::{Dir, Pos};
pub use maze::{Maze, MAZE_LAYOUT};

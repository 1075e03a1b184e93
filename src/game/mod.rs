//! Core game logic module for Snake
//!
//! Everything here is free of terminal I/O; a host drives [`GameLoop`] and
//! draws whatever it exposes.

pub mod action;
pub mod collision;
pub mod config;
pub mod engine;
pub mod fruit;
pub mod game_loop;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Velocity};
pub use collision::Collision;
pub use config::{Difficulty, GameConfig};
pub use engine::{GameSession, TickOutcome};
pub use fruit::FruitPlacer;
pub use game_loop::{GameLoop, LoopState, ScoreCallback};
pub use state::{Position, Snake};

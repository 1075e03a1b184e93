//! Wrap Snake - Snake on a wraparound grid
//!
//! This library provides:
//! - Core game logic and the tick loop state machine (game module)
//! - The public game handle tying a loop to a drawing surface (handle module)
//! - Terminal rendering and keyboard input (render, input modules)
//! - Session statistics and the interactive terminal mode (metrics, modes)

pub mod error;
pub mod game;
pub mod handle;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;

pub use error::GameError;
pub use handle::GameHandle;

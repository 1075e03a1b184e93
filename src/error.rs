use thiserror::Error;

/// Usage errors reported by the game API.
///
/// Each one fails only the call that raised it; a running session is left
/// untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    /// Start while running, stop while idle, or restart with nothing to reuse
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
    /// Sizes or tick interval out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The rendering surface cannot be drawn on
    #[error("no usable rendering surface")]
    MissingSurface,
}

//! Public entry point: a game loop bound to a drawing surface.
//!
//! A host calls [`GameHandle::init`] once with its surface, then drives the
//! handle from its own event loop: logic ticks via
//! [`GameHandle::tick_if_due`], frames via [`GameHandle::request_frame`] and
//! [`GameHandle::present`].

use std::io;

use tokio::time::Instant;

use crate::error::GameError;
use crate::game::{Direction, GameConfig, GameLoop, LoopState, TickOutcome};
use crate::render::{Scene, Surface};

pub struct GameHandle<S: Surface> {
    surface: S,
    game: GameLoop,
    frame_requested: bool,
}

impl<S: Surface> GameHandle<S> {
    /// Bind a fresh, idle game loop to `surface`
    pub fn init(surface: S) -> Result<Self, GameError> {
        Self::with_loop(surface, GameLoop::new())
    }

    pub fn with_loop(surface: S, game: GameLoop) -> Result<Self, GameError> {
        if !surface.is_usable() {
            return Err(GameError::MissingSurface);
        }
        Ok(Self {
            surface,
            game,
            frame_requested: false,
        })
    }

    pub fn start<F, G>(
        &mut self,
        config: GameConfig,
        on_fruit: F,
        on_game_over: G,
    ) -> Result<(), GameError>
    where
        F: FnMut(u32) + Send + 'static,
        G: FnMut(u32) + Send + 'static,
    {
        self.game.start(config, on_fruit, on_game_over)
    }

    pub fn restart<F, G>(
        &mut self,
        config: GameConfig,
        on_fruit: F,
        on_game_over: G,
    ) -> Result<(), GameError>
    where
        F: FnMut(u32) + Send + 'static,
        G: FnMut(u32) + Send + 'static,
    {
        self.game.restart(config, on_fruit, on_game_over)
    }

    pub fn restart_retained(&mut self) -> Result<(), GameError> {
        self.game.restart_retained()
    }

    pub fn stop(&mut self) -> Result<(), GameError> {
        self.game.stop()
    }

    pub fn set_difficulty(&mut self, interval_ms: f64) -> Result<(), GameError> {
        self.game.set_difficulty(interval_ms)
    }

    pub fn steer(&mut self, direction: Direction) -> bool {
        self.game.steer(direction)
    }

    pub fn tick_if_due(&mut self, now: Instant) -> Option<TickOutcome> {
        self.game.tick_if_due(now)
    }

    pub fn next_tick_at(&self) -> Option<Instant> {
        self.game.next_tick_at()
    }

    pub fn state(&self) -> LoopState {
        self.game.state()
    }

    pub fn game(&self) -> &GameLoop {
        &self.game
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Ask for a frame. Returns false while an earlier request has not been
    /// presented yet, so at most one frame is ever pending.
    pub fn request_frame(&mut self) -> bool {
        if self.frame_requested {
            return false;
        }
        self.frame_requested = true;
        true
    }

    /// Draw the pending frame, if any. Returns whether a frame was drawn.
    pub fn present(&mut self) -> io::Result<bool> {
        if !self.frame_requested {
            return Ok(false);
        }
        self.frame_requested = false;

        let session = self.game.session();
        let scene = Scene {
            snake: session.map(|s| s.snake()),
            fruit: session.map(|s| s.fruit()),
            grid_size: Some(self.game.config().grid_size),
        };
        self.surface.draw(scene)?;
        Ok(true)
    }
}

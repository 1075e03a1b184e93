pub mod board;
pub mod renderer;

pub use board::Board;
pub use renderer::{Hud, TerminalSurface};

use crate::game::{Position, Snake};

/// Everything a surface needs to paint one frame of the board
#[derive(Debug, Clone, Copy, Default)]
pub struct Scene<'a> {
    pub snake: Option<&'a Snake>,
    pub fruit: Option<Position>,
    pub grid_size: Option<u16>,
}

/// Drawing target for the game
pub trait Surface {
    /// Whether the surface can currently be drawn on
    fn is_usable(&self) -> bool;

    fn draw(&mut self, scene: Scene<'_>) -> std::io::Result<()>;
}

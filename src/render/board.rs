use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::Widget,
};

use super::Scene;
use crate::game::Position;

/// Terminal columns per grid cell, so cells come out roughly square
pub const CELL_WIDTH: u16 = 2;

pub const LIGHT_TILE: Color = Color::Rgb(170, 215, 81);
pub const DARK_TILE: Color = Color::Rgb(162, 209, 73);
pub const FRUIT_COLOR: Color = Color::Red;
pub const SNAKE_COLOR: Color = Color::Blue;

/// Grid widget: checkerboard background, then fruit, then snake
pub struct Board<'a> {
    scene: Scene<'a>,
}

impl<'a> Board<'a> {
    pub fn new(scene: Scene<'a>) -> Self {
        Self { scene }
    }

    /// Terminal area (width, height) a grid of `grid_size` cells needs
    pub fn footprint(grid_size: u16) -> (u16, u16) {
        (grid_size.saturating_mul(CELL_WIDTH), grid_size)
    }
}

impl Widget for Board<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(grid_size) = self.scene.grid_size {
            // Only the cells that fit in `area`
            let columns = grid_size.min(area.width.div_ceil(CELL_WIDTH));
            let rows = grid_size.min(area.height);
            for y in 0..i32::from(rows) {
                for x in 0..i32::from(columns) {
                    let color = if (x + y) % 2 == 0 { LIGHT_TILE } else { DARK_TILE };
                    paint(buf, area, Position::new(x, y), color);
                }
            }
        }

        if let Some(fruit) = self.scene.fruit {
            paint(buf, area, fruit, FRUIT_COLOR);
        }

        if let Some(snake) = self.scene.snake {
            for pos in snake.trail() {
                paint(buf, area, *pos, SNAKE_COLOR);
            }
        }
    }
}

fn paint(buf: &mut Buffer, area: Rect, pos: Position, color: Color) {
    let (Ok(cx), Ok(cy)) = (u16::try_from(pos.x), u16::try_from(pos.y)) else {
        return;
    };
    let y = area.y.saturating_add(cy);
    if y >= area.bottom() {
        return;
    }

    let left = area.x.saturating_add(cx.saturating_mul(CELL_WIDTH));
    for x in left..left.saturating_add(CELL_WIDTH) {
        if x >= area.right() {
            break;
        }
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_symbol(" ").set_bg(color);
        }
    }
}

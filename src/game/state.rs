use super::action::Velocity;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step by `velocity` on a toroidal grid of `grid_size` cells per side.
    ///
    /// Each axis wraps on its own: leaving past `grid_size - 1` re-enters at
    /// 0, leaving below 0 re-enters at `grid_size - 1`.
    pub fn stepped(&self, velocity: Velocity, grid_size: u16) -> Self {
        Self {
            x: wrap(self.x + velocity.vx, grid_size),
            y: wrap(self.y + velocity.vy, grid_size),
        }
    }

    pub fn is_in_bounds(&self, grid_size: u16) -> bool {
        let g = i32::from(grid_size);
        (0..g).contains(&self.x) && (0..g).contains(&self.y)
    }
}

/// Wrap a single coordinate that is at most one step outside the grid
pub fn wrap(coordinate: i32, grid_size: u16) -> i32 {
    let last = i32::from(grid_size) - 1;
    if coordinate < 0 {
        last
    } else if coordinate > last {
        0
    } else {
        coordinate
    }
}

/// The cells occupied by the snake, head first
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snake {
    trail: Vec<Position>,
}

impl Snake {
    pub fn from_trail(trail: Vec<Position>) -> Self {
        Self { trail }
    }

    /// Starting layout: `snake_size` contiguous cells centred on row
    /// `ceil(grid_size / 2) - 1`, head on the right, body extending left.
    pub fn initial(grid_size: u16, snake_size: u16) -> Self {
        let mid = i32::from(grid_size.div_ceil(2)) - 1;
        let size = i32::from(snake_size);
        let head_x = mid + (size - 1) - size / 2;

        let trail = (0..size)
            .map(|i| {
                let x = (head_x - i).rem_euclid(i32::from(grid_size));
                Position::new(x, mid)
            })
            .collect();

        Self { trail }
    }

    pub fn head(&self) -> Option<Position> {
        self.trail.first().copied()
    }

    pub fn trail(&self) -> &[Position] {
        &self.trail
    }

    /// Prepend `new_head`; the tail is dropped unless `grow` is set.
    pub fn move_to(&mut self, new_head: Position, grow: bool) {
        self.trail.insert(0, new_head);

        if !grow {
            self.trail.pop();
        }
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.trail.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.trail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }
}

/// Direction requested by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// True for Left and Right
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Unit vector the snake travels along each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Velocity {
    pub vx: i32,
    pub vy: i32,
}

impl Velocity {
    pub const fn new(vx: i32, vy: i32) -> Self {
        Self { vx, vy }
    }

    /// Tries to turn towards `direction`.
    ///
    /// A turn is only accepted when the component on the axis being set is
    /// currently zero, so the snake can never reverse through its own body.
    /// Returns whether the velocity changed.
    pub fn steer(&mut self, direction: Direction) -> bool {
        let (dx, dy) = direction.delta();
        let axis_busy = if direction.is_horizontal() {
            self.vx != 0
        } else {
            self.vy != 0
        };

        if axis_busy {
            return false;
        }

        self.vx = dx;
        self.vy = dy;
        true
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl From<Direction> for Velocity {
    fn from(direction: Direction) -> Self {
        let (vx, vy) = direction.delta();
        Self { vx, vy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_default_velocity_moves_right() {
        assert_eq!(Velocity::default(), Velocity::new(1, 0));
    }

    #[test]
    fn test_reverse_is_ignored() {
        let mut velocity = Velocity::default();
        assert!(!velocity.steer(Direction::Left));
        assert!(!velocity.steer(Direction::Right));
        assert_eq!(velocity, Velocity::new(1, 0));

        let mut velocity = Velocity::from(Direction::Up);
        assert!(!velocity.steer(Direction::Down));
        assert_eq!(velocity, Velocity::new(0, -1));
    }

    #[test]
    fn test_perpendicular_turn_is_accepted() {
        let mut velocity = Velocity::default();
        assert!(velocity.steer(Direction::Down));
        assert_eq!(velocity, Velocity::new(0, 1));

        assert!(velocity.steer(Direction::Left));
        assert_eq!(velocity, Velocity::new(-1, 0));
    }

    #[test]
    fn test_last_write_wins_between_ticks() {
        // Up then Left within one tick ends up reversed relative to the
        // original Right; nothing buffers the intermediate turn.
        let mut velocity = Velocity::default();
        velocity.steer(Direction::Up);
        velocity.steer(Direction::Left);
        assert_eq!(velocity, Velocity::new(-1, 0));
    }
}

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::state::{Position, Snake};

/// Picks fruit cells uniformly among the cells the snake leaves free
pub struct FruitPlacer {
    rng: StdRng,
}

impl FruitPlacer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic placer for tests and replays
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns `None` when the snake covers every cell.
    pub fn place(&mut self, grid_size: u16, snake: &Snake) -> Option<Position> {
        let free = free_cells(grid_size, snake);
        free.choose(&mut self.rng).copied()
    }
}

impl Default for FruitPlacer {
    fn default() -> Self {
        Self::new()
    }
}

fn free_cells(grid_size: u16, snake: &Snake) -> Vec<Position> {
    let occupied: HashSet<Position> = snake.trail().iter().copied().collect();
    let g = i32::from(grid_size);
    (0..g)
        .flat_map(|y| (0..g).map(move |x| Position::new(x, y)))
        .filter(|pos| !occupied.contains(pos))
        .collect()
}

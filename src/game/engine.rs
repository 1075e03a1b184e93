use super::{
    action::{Direction, Velocity},
    collision::{self, Collision},
    config::GameConfig,
    fruit::FruitPlacer,
    state::{Position, Snake},
};
use crate::error::GameError;

/// What a single tick did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Plain move, nothing hit
    Moved,
    /// Fruit eaten; `score` is the new score
    FruitEaten { score: u32 },
    /// Fruit eaten and no free cell is left for the next one
    BoardFull { score: u32 },
    /// Head ran into the body; the session is over
    SelfCollision { score: u32 },
}

impl TickOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TickOutcome::BoardFull { .. } | TickOutcome::SelfCollision { .. }
        )
    }
}

/// One active game: snake, fruit, velocity and score
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    snake: Snake,
    fruit: Position,
    velocity: Velocity,
    grid_size: u16,
    score: u32,
    /// Set by a fruit hit, consumed by the following move
    grow_next: bool,
}

impl GameSession {
    pub fn new(config: &GameConfig, placer: &mut FruitPlacer) -> Result<Self, GameError> {
        config.validate()?;

        let snake = Snake::initial(config.grid_size, config.snake_size);
        let fruit = placer
            .place(config.grid_size, &snake)
            .ok_or_else(|| GameError::InvalidConfig("no free cell for the first fruit".into()))?;

        Ok(Self {
            snake,
            fruit,
            velocity: Velocity::default(),
            grid_size: config.grid_size,
            score: 0,
            grow_next: false,
        })
    }

    /// Session with a hand-made layout, for exercising the tick rules
    #[cfg(test)]
    pub(crate) fn from_parts(grid_size: u16, snake: Snake, fruit: Position) -> Self {
        Self {
            snake,
            fruit,
            velocity: Velocity::default(),
            grid_size,
            score: 0,
            grow_next: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_fruit(&mut self, fruit: Position) {
        self.fruit = fruit;
    }

    /// Run one tick: move, classify, then update score and fruit.
    ///
    /// Growth lags one tick behind the fruit hit: the move that lands on the
    /// fruit keeps the length, the next move keeps the tail.
    pub fn step(&mut self, placer: &mut FruitPlacer) -> TickOutcome {
        let Some(head) = self.snake.head() else {
            return TickOutcome::Moved;
        };

        let next = head.stepped(self.velocity, self.grid_size);
        self.snake.move_to(next, self.grow_next);

        match collision::detect(self.snake.trail(), self.fruit) {
            Collision::SelfCollision => {
                self.grow_next = false;
                TickOutcome::SelfCollision { score: self.score }
            }
            Collision::FruitEaten => {
                self.score += 1;
                self.grow_next = true;
                match placer.place(self.grid_size, &self.snake) {
                    Some(fruit) => {
                        self.fruit = fruit;
                        TickOutcome::FruitEaten { score: self.score }
                    }
                    None => TickOutcome::BoardFull { score: self.score },
                }
            }
            Collision::None => {
                self.grow_next = false;
                TickOutcome::Moved
            }
        }
    }

    pub fn steer(&mut self, direction: Direction) -> bool {
        self.velocity.steer(direction)
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn fruit(&self) -> Position {
        self.fruit
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn grid_size(&self) -> u16 {
        self.grid_size
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

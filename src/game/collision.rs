use super::state::Position;

/// Classification of the snake's state right after a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    None,
    /// Head landed on a body cell
    SelfCollision,
    /// Head landed on the fruit
    FruitEaten,
}

/// Classify a post-move trail against the fruit.
///
/// Self-collision is checked first and wins a tie with the fruit.
pub fn detect(trail: &[Position], fruit: Position) -> Collision {
    let Some((head, body)) = trail.split_first() else {
        return Collision::None;
    };

    if body.contains(head) {
        return Collision::SelfCollision;
    }

    if *head == fruit {
        return Collision::FruitEaten;
    }

    Collision::None
}

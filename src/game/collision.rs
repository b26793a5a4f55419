//! Collision predicates for a candidate head position.
//!
//! Nothing here mutates state: the session asks what a move would hit and
//! decides whether to commit it.

use super::{GridBounds, Position};
use crate::items::Obstacle;
use crate::snake::Snake;

/// What a candidate head position ran into.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Collision {
    Wall,
    SelfBody,
    Obstacle,
}

pub fn is_wall(pos: Position, bounds: GridBounds) -> bool {
    !bounds.contains(pos)
}

/// True if `pos` hits a body cell that is still occupied after the tail
/// shifts. The cell the tail releases this move is free.
pub fn is_self(pos: Position, snake: &Snake) -> bool {
    let still_occupied = if snake.is_growing() {
        snake.len()
    } else {
        snake.len() - 1
    };
    snake.segments().take(still_occupied).any(|&cell| cell == pos)
}

pub fn is_obstacle(pos: Position, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|obstacle| obstacle.contains(pos))
}

/// Classifies a candidate head, checking walls first, then the body, then
/// obstacles.
pub fn classify(
    pos: Position,
    snake: &Snake,
    obstacles: &[Obstacle],
    bounds: GridBounds,
) -> Option<Collision> {
    if is_wall(pos, bounds) {
        Some(Collision::Wall)
    } else if is_self(pos, snake) {
        Some(Collision::SelfBody)
    } else if is_obstacle(pos, obstacles) {
        Some(Collision::Obstacle)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use crate::items::ObstaclePattern;
    use std::time::Duration;

    const INTERVAL: Duration = Duration::from_millis(100);

    fn ring() -> Snake {
        // Head at (5,5) with the tail right behind it at (5,4).
        Snake::from_segments(
            [
                Position::new(5, 5),
                Position::new(6, 5),
                Position::new(6, 4),
                Position::new(5, 4),
            ],
            Direction::Left,
            INTERVAL,
        )
    }

    #[test]
    fn test_wall_collision() {
        let bounds = GridBounds::new(10, 10);
        assert!(is_wall(Position::new(-1, 3), bounds));
        assert!(is_wall(Position::new(3, 10), bounds));
        assert!(!is_wall(Position::new(9, 9), bounds));
    }

    #[test]
    fn test_vacating_tail_is_not_a_collision() {
        let snake = ring();
        assert!(!is_self(Position::new(5, 4), &snake));
        assert!(is_self(Position::new(6, 4), &snake));
    }

    #[test]
    fn test_growing_tail_still_blocks() {
        let mut snake = ring();
        snake.grow();
        assert!(is_self(Position::new(5, 4), &snake));
    }

    #[test]
    fn test_obstacle_rectangle() {
        let obstacles = [Obstacle::new(Position::new(2, 2), 3, 1, ObstaclePattern::Line)];
        assert!(is_obstacle(Position::new(2, 2), &obstacles));
        assert!(is_obstacle(Position::new(4, 2), &obstacles));
        assert!(!is_obstacle(Position::new(5, 2), &obstacles));
        assert!(!is_obstacle(Position::new(2, 3), &obstacles));
    }

    #[test]
    fn test_classify_order() {
        let snake = ring();
        let bounds = GridBounds::new(10, 10);
        let obstacles = [Obstacle::new(Position::new(6, 4), 1, 1, ObstaclePattern::Box)];
        assert_eq!(
            classify(Position::new(10, 5), &snake, &obstacles, bounds),
            Some(Collision::Wall)
        );
        assert_eq!(
            classify(Position::new(6, 4), &snake, &obstacles, bounds),
            Some(Collision::SelfBody)
        );
        assert_eq!(classify(Position::new(4, 5), &snake, &obstacles, bounds), None);
    }
}

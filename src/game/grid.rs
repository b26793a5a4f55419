//! Discrete grid model: cell positions, movement directions and arena bounds.

use bevy::math::Vec2;

/// A cell on the arena grid. `y` grows upward to match world space.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell in the given direction.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Centre of the cell in grid units, used for particle origins.
    pub fn center(self) -> Vec2 {
        Vec2::new(self.x as f32 + 0.5, self.y as f32 + 0.5)
    }
}

/// Direction enum for snake movement.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Cell offset of a single move.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
        }
    }
}

/// Playable area, `[0, width) x [0, height)`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GridBounds {
    pub width: i32,
    pub height: i32,
}

impl GridBounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Wraps a position that left the arena back onto the opposite edge.
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(
            pos.x.rem_euclid(self.width),
            pos.y.rem_euclid(self.height),
        )
    }

    pub fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn test_step_is_y_up() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.step(Direction::Up), Position::new(5, 6));
        assert_eq!(pos.step(Direction::Down), Position::new(5, 4));
        assert_eq!(pos.step(Direction::Left), Position::new(4, 5));
        assert_eq!(pos.step(Direction::Right), Position::new(6, 5));
    }

    #[test]
    fn test_bounds_checking() {
        let bounds = GridBounds::new(20, 10);
        assert!(bounds.contains(Position::new(0, 0)));
        assert!(bounds.contains(Position::new(19, 9)));
        assert!(!bounds.contains(Position::new(-1, 0)));
        assert!(!bounds.contains(Position::new(20, 0)));
        assert!(!bounds.contains(Position::new(0, 10)));
    }

    #[test]
    fn test_wrap() {
        let bounds = GridBounds::new(20, 10);
        assert_eq!(bounds.wrap(Position::new(-1, 3)), Position::new(19, 3));
        assert_eq!(bounds.wrap(Position::new(20, 10)), Position::new(0, 0));
        assert_eq!(bounds.wrap(Position::new(4, 4)), Position::new(4, 4));
    }
}

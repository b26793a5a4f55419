//! Obstacle layouts built from fixed shape templates.

use bevy::log::debug;
use rand::prelude::*;

use super::{Obstacle, ObstaclePattern, Occupancy, Spawner};
use crate::game::{GridBounds, Position};

/// Cells kept clear between obstacles and the arena edge.
const EDGE_MARGIN: i32 = 2;

/// Number of obstacles generated for a level.
pub fn obstacle_count(level: u32) -> usize {
    (3 + level as usize / 2).min(8)
}

impl ObstaclePattern {
    pub const ALL: [ObstaclePattern; 4] = [
        ObstaclePattern::Line,
        ObstaclePattern::Box,
        ObstaclePattern::Cross,
        ObstaclePattern::Corner,
    ];

    /// Rectangles making up one instance of the pattern, anchored at (0, 0).
    fn template(self, rng: &mut impl Rng) -> Vec<Obstacle> {
        let at = |x, y, w, h| Obstacle::new(Position::new(x, y), w, h, self);
        match self {
            ObstaclePattern::Line => {
                if rng.random_bool(0.5) {
                    vec![at(0, 0, rng.random_range(3..=8), 1)]
                } else {
                    vec![at(0, 0, 1, rng.random_range(3..=6))]
                }
            }
            ObstaclePattern::Box => {
                let size = rng.random_range(2..=4);
                vec![at(0, 0, size, size)]
            }
            ObstaclePattern::Cross => vec![at(0, -1, 1, 3), at(-1, 0, 3, 1)],
            ObstaclePattern::Corner => vec![at(0, 0, 3, 1), at(0, 0, 1, 3)],
        }
    }
}

/// Generates the obstacle layout for `level`.
///
/// Each obstacle is validated cell by cell against `occupancy`; one that
/// cannot be placed within the spawner's attempt budget is skipped.
/// Placed cells are added to `occupancy`.
pub fn generate_obstacles(
    rng: &mut impl Rng,
    bounds: GridBounds,
    level: u32,
    occupancy: &mut Occupancy,
    spawner: &Spawner,
) -> Vec<Obstacle> {
    let mut obstacles = Vec::new();
    for _ in 0..obstacle_count(level) {
        let pattern = *ObstaclePattern::ALL
            .choose(rng)
            .unwrap_or(&ObstaclePattern::Box);
        match place_pattern(rng, pattern, bounds, occupancy, spawner) {
            Some(parts) => {
                for part in &parts {
                    occupancy.extend(part.cells());
                }
                obstacles.extend(parts);
            }
            None => debug!("skipped {:?} obstacle: no free anchor", pattern),
        }
    }
    obstacles
}

fn place_pattern(
    rng: &mut impl Rng,
    pattern: ObstaclePattern,
    bounds: GridBounds,
    occupancy: &Occupancy,
    spawner: &Spawner,
) -> Option<Vec<Obstacle>> {
    for _ in 0..spawner.max_attempts {
        let parts = pattern.template(rng);
        let (min, max) = extent(&parts)?;

        let x_range = (EDGE_MARGIN - min.x)..=(bounds.width - 1 - EDGE_MARGIN - max.x);
        let y_range = (EDGE_MARGIN - min.y)..=(bounds.height - 1 - EDGE_MARGIN - max.y);
        if x_range.is_empty() || y_range.is_empty() {
            continue;
        }

        let anchor = Position::new(rng.random_range(x_range), rng.random_range(y_range));
        let placed: Vec<Obstacle> = parts
            .iter()
            .map(|part| {
                Obstacle::new(
                    Position::new(anchor.x + part.origin.x, anchor.y + part.origin.y),
                    part.width,
                    part.height,
                    part.pattern,
                )
            })
            .collect();

        let fits = placed
            .iter()
            .flat_map(|part| part.cells())
            .all(|cell| bounds.contains(cell) && !occupancy.is_occupied(cell));
        if fits {
            return Some(placed);
        }
    }
    None
}

/// Inclusive bounding box of a set of rectangles.
fn extent(parts: &[Obstacle]) -> Option<(Position, Position)> {
    let min_x = parts.iter().map(|p| p.origin.x).min()?;
    let min_y = parts.iter().map(|p| p.origin.y).min()?;
    let max_x = parts.iter().map(|p| p.origin.x + p.width - 1).max()?;
    let max_y = parts.iter().map(|p| p.origin.y + p.height - 1).max()?;
    Some((Position::new(min_x, min_y), Position::new(max_x, max_y)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obstacle_count_caps_at_eight() {
        assert_eq!(obstacle_count(1), 3);
        assert_eq!(obstacle_count(4), 5);
        assert_eq!(obstacle_count(30), 8);
    }

    #[test]
    fn test_generated_obstacles_avoid_occupied_cells() {
        let bounds = GridBounds::new(40, 30);
        let spawner = Spawner::default();
        for seed in 0..25 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut occupancy = Occupancy::new();
            let snake: Vec<_> = (10..20).map(|x| Position::new(x, 15)).collect();
            occupancy.extend(snake.iter().copied());

            let obstacles = generate_obstacles(&mut rng, bounds, 5, &mut occupancy, &spawner);
            assert!(!obstacles.is_empty());
            for cell in obstacles.iter().flat_map(|o| o.cells()) {
                assert!(bounds.contains(cell));
                assert!(!snake.contains(&cell));
                assert!(cell.x >= EDGE_MARGIN && cell.x < bounds.width - EDGE_MARGIN);
                assert!(cell.y >= EDGE_MARGIN && cell.y < bounds.height - EDGE_MARGIN);
            }
        }
    }

    #[test]
    fn test_cross_parts_share_centre() {
        let mut rng = StdRng::seed_from_u64(0);
        let parts = ObstaclePattern::Cross.template(&mut rng);
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|p| p.contains(Position::new(0, 0))));
    }

    #[test]
    fn test_tiny_arena_places_nothing() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut occupancy = Occupancy::new();
        let obstacles = generate_obstacles(
            &mut rng,
            GridBounds::new(4, 4),
            1,
            &mut occupancy,
            &Spawner::new(10),
        );
        assert!(obstacles.is_empty());
    }
}

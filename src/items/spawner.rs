//! Bounded rejection sampling of free grid cells.

use std::collections::HashSet;

use bevy::log::debug;
use rand::prelude::*;

use crate::game::{GridBounds, Position};

/// Set of cells nothing new may be placed on.
#[derive(Clone, Debug, Default)]
pub struct Occupancy {
    cells: HashSet<Position>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pos: Position) {
        self.cells.insert(pos);
    }

    pub fn extend(&mut self, cells: impl IntoIterator<Item = Position>) {
        self.cells.extend(cells);
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Picks random free cells, giving up after a fixed number of draws.
#[derive(Clone, Copy, Debug)]
pub struct Spawner {
    pub max_attempts: u32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self { max_attempts: 64 }
    }
}

impl Spawner {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Draws uniformly random cells until one is free.
    ///
    /// Returns `None` when the attempt budget runs out; callers skip the
    /// spawn and try again on a later tick.
    pub fn spawn_cell(
        &self,
        rng: &mut impl Rng,
        bounds: GridBounds,
        occupancy: &Occupancy,
    ) -> Option<Position> {
        if bounds.width <= 0 || bounds.height <= 0 {
            return None;
        }

        for _ in 0..self.max_attempts {
            let candidate = Position::new(
                rng.random_range(0..bounds.width),
                rng.random_range(0..bounds.height),
            );
            if !occupancy.is_occupied(candidate) {
                return Some(candidate);
            }
        }

        debug!(
            "no free cell after {} attempts ({} of {} occupied)",
            self.max_attempts,
            occupancy.len(),
            bounds.cell_count()
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_avoids_occupied_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = GridBounds::new(6, 6);
        let mut occupancy = Occupancy::new();
        for x in 0..6 {
            for y in 0..5 {
                occupancy.insert(Position::new(x, y));
            }
        }

        let spawner = Spawner::new(10_000);
        for _ in 0..50 {
            let cell = spawner
                .spawn_cell(&mut rng, bounds, &occupancy)
                .expect("six free cells remain");
            assert!(!occupancy.is_occupied(cell));
            assert!(bounds.contains(cell));
        }
    }

    #[test]
    fn test_full_board_returns_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = GridBounds::new(3, 3);
        let mut occupancy = Occupancy::new();
        for x in 0..3 {
            for y in 0..3 {
                occupancy.insert(Position::new(x, y));
            }
        }
        assert_eq!(Spawner::new(100).spawn_cell(&mut rng, bounds, &occupancy), None);
    }

    #[test]
    fn test_nearly_full_row_respects_budget() {
        // 20-wide row, snake covers 18 cells.
        let bounds = GridBounds::new(20, 1);
        let mut occupancy = Occupancy::new();
        occupancy.extend((0..18).map(|x| Position::new(x, 0)));
        let spawner = Spawner::new(30);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            if let Some(cell) = spawner.spawn_cell(&mut rng, bounds, &occupancy) {
                assert!(cell == Position::new(18, 0) || cell == Position::new(19, 0));
            }
        }

        // Both remaining cells taken by obstacles: no spawn, no hang.
        occupancy.insert(Position::new(18, 0));
        occupancy.insert(Position::new(19, 0));
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(spawner.spawn_cell(&mut rng, bounds, &occupancy), None);
    }
}

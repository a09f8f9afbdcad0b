//! Spawn point selection

use crate::grid::{Coord, Grid, WorldPos};
use crate::rng::LevelRng;

/// Uniformly random path cell, if the level has any
pub fn find_safe_spawn_cell(grid: &Grid, rng: &mut LevelRng) -> Option<Coord> {
    let open = grid.path_cells();
    rng.choose(&open).copied()
}

/// World-space centre of a random path cell, or [`WorldPos::ORIGIN`]
pub fn find_safe_spawn_position(grid: &Grid, rng: &mut LevelRng) -> WorldPos {
    find_safe_spawn_cell(grid, rng)
        .map(|c| grid.world_center(c))
        .unwrap_or(WorldPos::ORIGIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_on_path() {
        let grid = Grid::from_ascii("###\n#.#\n###").unwrap();
        let mut rng = LevelRng::new(42);
        assert_eq!(find_safe_spawn_cell(&grid, &mut rng), Some(Coord::new(1, 1)));
        // 3x3 world of unit cells centred on the origin.
        assert_eq!(
            find_safe_spawn_position(&grid, &mut rng),
            WorldPos { x: 0.0, y: 0.0 }
        );
    }

    #[test]
    fn test_spawn_fallback() {
        let grid = Grid::new(4, 4, 2.0);
        let mut rng = LevelRng::new(42);
        assert_eq!(find_safe_spawn_cell(&grid, &mut rng), None);
        assert_eq!(find_safe_spawn_position(&grid, &mut rng), WorldPos::ORIGIN);
    }

    #[test]
    fn test_spawn_picks_every_open_cell() {
        let grid = Grid::from_ascii("..#\n#..").unwrap();
        let mut rng = LevelRng::new(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let c = find_safe_spawn_cell(&grid, &mut rng).unwrap();
            assert!(grid.is_path(c));
            seen.insert(c);
        }
        assert_eq!(seen.len(), 4);
    }
}

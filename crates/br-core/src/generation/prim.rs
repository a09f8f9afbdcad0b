//! Randomized Prim's maze carving over a shared visited set
//!
//! Several mazes are carved into the same grid one after another. The
//! visited set outlives each maze so later mazes fill the gaps left by
//! earlier ones, and their passages collide with already-carved cells.

use log::{debug, info};
use strum::IntoEnumIterator;

use crate::grid::{Coord, Direction, Grid};
use crate::rng::LevelRng;

/// Cells already claimed by a maze pass, keyed by packed grid index
#[derive(Debug, Clone)]
pub struct VisitedSet {
    marks: Vec<bool>,
    count: usize,
}

impl VisitedSet {
    /// Empty set for a grid of `len` cells
    pub fn new(len: usize) -> Self {
        Self {
            marks: vec![false; len],
            count: 0,
        }
    }

    /// Returns true if the index was newly inserted
    pub fn insert(&mut self, idx: usize) -> bool {
        match self.marks.get_mut(idx) {
            Some(mark) if !*mark => {
                *mark = true;
                self.count += 1;
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.marks.get(idx).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Fraction of the grid visited so far
    pub fn fraction(&self) -> f64 {
        if self.marks.is_empty() {
            return 1.0;
        }
        self.count as f64 / self.marks.len() as f64
    }
}

/// Result of a single maze pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MazeOutcome {
    /// Frontier cells expanded
    pub expanded: usize,
    /// Connections skipped because their midpoint was already open
    pub dropped: usize,
    /// The frontier emptied before the fill target was met
    pub exhausted: bool,
}

/// Carve one maze into `grid`
///
/// Frontier cells are taken in uniformly random order. A connection to a
/// candidate two cells away is carved unless its midpoint is already a path
/// and the collision roll does not exceed `stop_collision_probability`.
pub fn carve_one_maze(
    grid: &mut Grid,
    visited: &mut VisitedSet,
    fill: f64,
    stop_collision_probability: f64,
    rng: &mut LevelRng,
) -> MazeOutcome {
    let (width, height) = (grid.width(), grid.height());
    let mut outcome = MazeOutcome::default();

    let start = Coord::new(rng.below(width), rng.below(height));
    visited.insert(grid.index_of(start));
    let mut frontier = vec![start];

    while visited.fraction() < fill && !frontier.is_empty() {
        let current = frontier.swap_remove(rng.below(frontier.len()));
        visited.insert(grid.index_of(current));
        grid.set_path(current);
        outcome.expanded += 1;

        let mut candidates = [(Direction::West, current); 4];
        let mut q = 0;
        for dir in Direction::iter() {
            if let Some(next) = current.step(dir, 2, width, height)
                && !visited.contains(grid.index_of(next))
            {
                candidates[q] = (dir, next);
                q += 1;
            }
        }
        if q == 0 {
            continue;
        }

        let (dir, next) = candidates[rng.below(q)];
        let Some(mid) = current.step(dir, 1, width, height) else {
            continue;
        };
        if rng.uniform() > stop_collision_probability || !grid.is_path(mid) {
            frontier.push(next);
            grid.set_path(mid);
        } else {
            outcome.dropped += 1;
        }
    }

    outcome.exhausted = visited.fraction() < fill;
    outcome
}

/// Carve `num_mazes` overlapping mazes sharing one visited set
pub fn carve_mazes(
    grid: &mut Grid,
    num_mazes: u32,
    fill: f64,
    stop_collision_probability: f64,
    rng: &mut LevelRng,
) -> VisitedSet {
    let mut visited = VisitedSet::new(grid.len());

    for maze in 0..num_mazes {
        let outcome = carve_one_maze(grid, &mut visited, fill, stop_collision_probability, rng);
        if outcome.exhausted {
            info!(
                "maze {}: frontier exhausted at {:.1}% visited (target {:.1}%)",
                maze,
                visited.fraction() * 100.0,
                fill * 100.0
            );
        }
        debug!(
            "maze {}: expanded {} cells, dropped {} connections, coverage {:.3}",
            maze,
            outcome.expanded,
            outcome.dropped,
            grid.coverage()
        );
    }

    visited
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visited_set() {
        let mut visited = VisitedSet::new(4);
        assert!(visited.is_empty());
        assert!(visited.insert(2));
        assert!(!visited.insert(2));
        assert!(!visited.insert(10));
        assert!(visited.contains(2));
        assert!(!visited.contains(10));
        assert_eq!(visited.len(), 1);
        assert_eq!(visited.fraction(), 0.25);
    }

    #[test]
    fn test_fill_target_stops_carving() {
        // The start cell alone already meets a 25% target on a 2x2 grid.
        let mut grid = Grid::new(2, 2, 1.0);
        let mut visited = VisitedSet::new(grid.len());
        let mut rng = LevelRng::new(42);
        let outcome = carve_one_maze(&mut grid, &mut visited, 0.25, 0.0, &mut rng);
        assert_eq!(outcome.expanded, 0);
        assert!(!outcome.exhausted);
        assert_eq!(visited.len(), 1);
        assert_eq!(grid.path_count(), 0);
    }

    #[test]
    fn test_single_maze_stays_in_parity_class() {
        let mut grid = Grid::new(10, 10, 1.0);
        let mut visited = VisitedSet::new(grid.len());
        let mut rng = LevelRng::new(3);
        let outcome = carve_one_maze(&mut grid, &mut visited, 1.0, 0.0, &mut rng);
        assert!(outcome.exhausted);
        // Candidates are two steps away, so one parity class (25 cells) is the ceiling.
        assert!(visited.len() <= 25);
        assert!(outcome.expanded >= 1);
    }

    #[test]
    fn test_maze_cells_are_connected() {
        let mut grid = Grid::new(15, 15, 1.0);
        let mut visited = VisitedSet::new(grid.len());
        let mut rng = LevelRng::new(11);
        carve_one_maze(&mut grid, &mut visited, 1.0, 0.0, &mut rng);

        // Flood from any path cell reaches all of them.
        let cells = grid.path_cells();
        let mut seen = vec![false; grid.len()];
        let mut stack = vec![cells[0]];
        seen[grid.index_of(cells[0])] = true;
        let mut reached = 0;
        while let Some(c) = stack.pop() {
            reached += 1;
            for n in grid.neighbors4(c) {
                let idx = grid.index_of(n);
                if grid.is_path(n) && !seen[idx] {
                    seen[idx] = true;
                    stack.push(n);
                }
            }
        }
        assert_eq!(reached, cells.len());
    }

    #[test]
    fn test_later_mazes_only_add_coverage() {
        let mut single = Grid::new(20, 20, 1.0);
        let first = carve_mazes(&mut single, 1, 0.9, 0.5, &mut LevelRng::new(5));

        let mut multi = Grid::new(20, 20, 1.0);
        let all = carve_mazes(&mut multi, 4, 0.9, 0.5, &mut LevelRng::new(5));

        // The first pass consumes the same random stream in both runs.
        assert!(all.len() >= first.len());
        assert!(multi.path_count() >= single.path_count());
        for (c, cell) in single.iter() {
            if cell.is_path() {
                assert!(multi.is_path(c));
            }
        }
    }

    #[test]
    fn test_collision_drops_connection() {
        // On a 3x1 strip the only connection from either end crosses the
        // already-open middle cell.
        let mut dropped = 0;
        for seed in 0..16 {
            let mut grid = Grid::new(3, 1, 1.0);
            grid.set_path(Coord::new(1, 0));
            let mut visited = VisitedSet::new(grid.len());
            visited.insert(1);
            let mut rng = LevelRng::new(seed);
            let outcome = carve_one_maze(&mut grid, &mut visited, 1.0, 1.0, &mut rng);
            if outcome.dropped == 1 {
                dropped += 1;
                // The candidate never reached the frontier.
                assert_eq!(outcome.expanded, 1);
                assert_eq!(visited.len(), 2);
                assert_eq!(grid.path_count(), 2);
                assert!(outcome.exhausted);
            } else {
                assert_eq!(outcome.dropped, 0);
            }
            assert!(!(grid.is_path(Coord::new(0, 0)) && grid.is_path(Coord::new(2, 0))));
        }
        assert!(dropped > 0);
    }

    #[test]
    fn test_zero_stop_probability_carves_through() {
        for seed in 0..16 {
            let mut grid = Grid::new(3, 1, 1.0);
            grid.set_path(Coord::new(1, 0));
            let mut visited = VisitedSet::new(grid.len());
            visited.insert(1);
            let mut rng = LevelRng::new(seed);
            let outcome = carve_one_maze(&mut grid, &mut visited, 1.0, 0.0, &mut rng);
            assert_eq!(outcome.dropped, 0);
            if outcome.expanded == 2 {
                assert_eq!(grid.path_count(), 3);
            }
        }
    }

    #[test]
    fn test_shared_visited_set_collisions() {
        let mut always_stop = 0;
        let mut never_stop = 0;
        for seed in 0..20 {
            for (stop, total) in [(1.0, &mut always_stop), (0.0, &mut never_stop)] {
                let mut grid = Grid::new(21, 21, 1.0);
                let mut visited = VisitedSet::new(grid.len());
                let mut rng = LevelRng::new(seed);
                for _ in 0..4 {
                    *total += carve_one_maze(&mut grid, &mut visited, 1.0, stop, &mut rng).dropped;
                }
            }
        }
        assert!(always_stop > 0);
        assert_eq!(never_stop, 0);
    }
}

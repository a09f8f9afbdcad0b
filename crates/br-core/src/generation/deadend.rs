//! Dead-end pruning
//!
//! A dead end is a path cell with exactly one path neighbour. Each pass
//! records every dead end first and only then walls them, so removals in a
//! pass never influence detection within the same pass.

use log::debug;

use crate::grid::{Coord, Grid};

/// Summary of a pruning run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeadEndReport {
    /// Passes that removed at least one cell
    pub passes: usize,
    /// Total cells converted back to wall
    pub removed: usize,
    /// The last pass found nothing left to remove
    pub converged: bool,
}

/// All current dead ends in row-major order
pub fn find_dead_ends(grid: &Grid) -> Vec<Coord> {
    grid.iter()
        .filter(|(c, cell)| cell.is_path() && grid.path_neighbor_count(*c) == 1)
        .map(|(c, _)| c)
        .collect()
}

/// Run up to `max_passes` pruning passes, stopping early at a fixed point
pub fn remove_dead_ends(grid: &mut Grid, max_passes: usize) -> DeadEndReport {
    let mut report = DeadEndReport::default();

    for pass in 0..max_passes {
        let dead_ends = find_dead_ends(grid);
        if dead_ends.is_empty() {
            report.converged = true;
            break;
        }
        for &c in &dead_ends {
            grid.set_wall(c);
        }
        debug!("dead-end pass {}: removed {} cells", pass, dead_ends.len());
        report.passes += 1;
        report.removed += dead_ends.len();
    }

    report
}

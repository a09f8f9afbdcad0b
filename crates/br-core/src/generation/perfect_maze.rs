//! Single perfect maze and its backrooms conversion
//!
//! The maze lives on an odd-sized grid: cells with two odd coordinates are
//! rooms of the maze, the others are walls that may be knocked through.
//! The outer border is never carved. Converting it to backrooms carves
//! rectangular rooms into it and prunes the dead ends.

use log::debug;
use strum::IntoEnumIterator;

use crate::error::ConfigError;
use crate::grid::{Coord, Direction, Grid};
use crate::rng::LevelRng;

use super::config::BackroomsConversion;
use super::deadend::{DeadEndReport, remove_dead_ends};
use super::prim::VisitedSet;
use super::rooms::{RoomRect, carve_rect, random_rect};

/// Round a requested size up to the odd size the maze uses (at least 3)
pub fn odd_dimension(n: usize) -> usize {
    let n = n.max(3);
    if n % 2 == 0 { n + 1 } else { n }
}

/// Generate a perfect maze with randomized Prim's algorithm
///
/// Even dimensions are rounded up to the next odd number.
pub fn generate_perfect_maze(
    cols: usize,
    rows: usize,
    cell_size: f64,
    rng: &mut LevelRng,
) -> Result<Grid, ConfigError> {
    if cols == 0 || rows == 0 {
        return Err(ConfigError::EmptyGrid { cols, rows });
    }
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return Err(ConfigError::NonPositive {
            field: "cell_size",
            value: cell_size,
        });
    }
    let (width, height) = (odd_dimension(cols), odd_dimension(rows));
    if (width, height) != (cols, rows) {
        debug!("maze size {}x{} rounded to {}x{}", cols, rows, width, height);
    }

    let mut grid = Grid::new(width, height, cell_size);
    let mut queued = VisitedSet::new(grid.len());

    let start = Coord::new(1 + 2 * rng.below(width / 2), 1 + 2 * rng.below(height / 2));
    grid.set_path(start);
    queued.insert(grid.index_of(start));
    let mut frontier = Vec::new();
    push_frontier(&grid, &mut queued, &mut frontier, start);

    while !frontier.is_empty() {
        let cell = frontier.swap_remove(rng.below(frontier.len()));

        let mut links = [Direction::West; 4];
        let mut q = 0;
        for dir in Direction::iter() {
            if let Some(n) = cell.step(dir, 2, width, height)
                && grid.is_path(n)
            {
                links[q] = dir;
                q += 1;
            }
        }
        // Every queued cell was reached from a carved neighbour.
        if q == 0 {
            continue;
        }
        let dir = links[rng.below(q)];
        if let Some(mid) = cell.step(dir, 1, width, height) {
            grid.set_path(mid);
        }
        grid.set_path(cell);
        push_frontier(&grid, &mut queued, &mut frontier, cell);
    }

    Ok(grid)
}

fn push_frontier(grid: &Grid, queued: &mut VisitedSet, frontier: &mut Vec<Coord>, from: Coord) {
    for dir in Direction::iter() {
        if let Some(n) = from.step(dir, 2, grid.width(), grid.height())
            && !grid.is_path(n)
            && queued.insert(grid.index_of(n))
        {
            frontier.push(n);
        }
    }
}

/// Export using the wall = 1, path = 0 convention
pub fn to_wall_bitmap(grid: &Grid) -> Vec<Vec<u8>> {
    (0..grid.height())
        .map(|y| {
            (0..grid.width())
                .map(|x| u8::from(!grid.is_path(Coord::new(x, y))))
                .collect()
        })
        .collect()
}

/// What a backrooms conversion changed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversionReport {
    pub rooms: Vec<RoomRect>,
    pub dead_ends: DeadEndReport,
}

/// Carve rooms into a maze, then prune its dead ends
pub fn convert_to_backrooms(
    grid: &mut Grid,
    conversion: &BackroomsConversion,
    rng: &mut LevelRng,
) -> Result<ConversionReport, ConfigError> {
    conversion.validate()?;

    let mut rooms = Vec::new();
    for _ in 0..conversion.room_attempts {
        let rect = random_rect(grid, conversion.room_size, conversion.room_size, rng);
        carve_rect(grid, rect);
        rooms.push(rect);
    }
    debug!("carved {} rooms into maze", rooms.len());

    let dead_ends = remove_dead_ends(grid, conversion.dead_end_passes);
    Ok(ConversionReport { rooms, dead_ends })
}

//! Grid coordinates and movement directions

use core::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Grid coordinate: `x` is the column, `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate
    pub const fn manhattan(&self, other: Coord) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Move `dist` cells in `dir`, staying inside a `width` x `height` grid
    pub fn step(&self, dir: Direction, dist: usize, width: usize, height: usize) -> Option<Coord> {
        let (dx, dy) = dir.offset();
        let nx = self.x.checked_add_signed(dx * dist as isize)?;
        let ny = self.y.checked_add_signed(dy * dist as isize)?;
        (nx < width && ny < height).then_some(Coord::new(nx, ny))
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Coord::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned directions
///
/// Declaration order is the expansion order used by maze carving and by
/// the pathfinder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Direction {
    West,
    East,
    North,
    South,
}

impl Direction {
    /// Unit offset `(dx, dy)`; north is towards row 0
    pub const fn offset(&self) -> (isize, isize) {
        match self {
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::North => (0, -1),
            Direction::South => (0, 1),
        }
    }
}

//! Grid model
//!
//! A rectangular, row-major array of [`Cell`]s. Cells are addressed either
//! by [`Coord`] or by their packed index `y * width + x`, which is also the
//! key used by the visited sets and pathfinder maps.

mod cell;
mod coord;

use core::fmt;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

pub use cell::{Cell, CellType};
pub use coord::{Coord, Direction};

use crate::error::GridError;

/// Position in world units, centred on the middle of the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f64,
    pub y: f64,
}

impl WorldPos {
    /// Fallback spawn point when a level has no open cell
    pub const ORIGIN: WorldPos = WorldPos { x: 0.0, y: 0.0 };
}

/// Serialized form of a grid, validated on the way back in
#[derive(Serialize, Deserialize)]
struct GridData {
    width: usize,
    height: usize,
    cell_size: f64,
    world_width: f64,
    world_height: f64,
    cells: Vec<Cell>,
}

/// Rectangular level grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridData", into = "GridData")]
pub struct Grid {
    width: usize,
    height: usize,
    cell_size: f64,
    world_width: f64,
    world_height: f64,
    cells: Vec<Cell>,
}

impl TryFrom<GridData> for Grid {
    type Error = GridError;

    fn try_from(data: GridData) -> Result<Self, Self::Error> {
        if data.width == 0 || data.height == 0 {
            return Err(GridError::Empty);
        }
        let expected = data.width * data.height;
        if data.cells.len() != expected {
            return Err(GridError::CellCount {
                expected,
                found: data.cells.len(),
            });
        }
        Ok(Grid {
            width: data.width,
            height: data.height,
            cell_size: data.cell_size,
            world_width: data.world_width,
            world_height: data.world_height,
            cells: data.cells,
        })
    }
}

impl From<Grid> for GridData {
    fn from(grid: Grid) -> Self {
        GridData {
            width: grid.width,
            height: grid.height,
            cell_size: grid.cell_size,
            world_width: grid.world_width,
            world_height: grid.world_height,
            cells: grid.cells,
        }
    }
}

impl Grid {
    /// Create an all-wall grid whose world extent is exactly `cols * cell_size`
    pub fn new(width: usize, height: usize, cell_size: f64) -> Self {
        Self::with_world(
            width,
            height,
            cell_size,
            width as f64 * cell_size,
            height as f64 * cell_size,
        )
    }

    /// Create an all-wall grid anchored in a world of the given extent
    pub fn with_world(
        width: usize,
        height: usize,
        cell_size: f64,
        world_width: f64,
        world_height: f64,
    ) -> Self {
        Self {
            width,
            height,
            cell_size,
            world_width,
            world_height,
            cells: vec![Cell::wall(); width * height],
        }
    }

    /// Build a grid from a textual map (`#` wall, `.` path, `o` pillar)
    ///
    /// Blank lines and surrounding whitespace are ignored; every remaining
    /// line must have the same length. Cell size is 1.
    pub fn from_ascii(map: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let width = rows.first().map(|r| r.chars().count()).ok_or(GridError::Empty)?;

        let mut grid = Grid::new(width, rows.len(), 1.0);
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GridError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, symbol) in row.chars().enumerate() {
                let typ = CellType::from_symbol(symbol).ok_or(GridError::UnknownSymbol {
                    symbol,
                    row: y,
                    col: x,
                })?;
                grid.cells[y * width + x].typ = typ;
            }
        }
        Ok(grid)
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, c: Coord) -> bool {
        c.x < self.width && c.y < self.height
    }

    /// Packed key of a coordinate (`y * width + x`)
    pub fn index_of(&self, c: Coord) -> usize {
        c.y * self.width + c.x
    }

    /// Inverse of [`index_of`](Self::index_of)
    pub fn coord_of(&self, idx: usize) -> Coord {
        Coord::new(idx % self.width, idx / self.width)
    }

    pub fn get(&self, c: Coord) -> Option<&Cell> {
        if self.in_bounds(c) {
            self.cells.get(self.index_of(c))
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, c: Coord) -> Option<&mut Cell> {
        if self.in_bounds(c) {
            let idx = self.index_of(c);
            self.cells.get_mut(idx)
        } else {
            None
        }
    }

    /// Out-of-bounds coordinates are never paths
    pub fn is_path(&self, c: Coord) -> bool {
        self.get(c).is_some_and(Cell::is_path)
    }

    pub fn is_pillar(&self, c: Coord) -> bool {
        self.get(c).is_some_and(Cell::is_pillar)
    }

    fn set(&mut self, c: Coord, typ: CellType) {
        if let Some(cell) = self.get_mut(c) {
            cell.typ = typ;
        }
    }

    /// Carve a cell; out-of-bounds writes are ignored
    pub fn set_path(&mut self, c: Coord) {
        self.set(c, CellType::Path);
    }

    pub fn set_wall(&mut self, c: Coord) {
        self.set(c, CellType::Wall);
    }

    pub fn set_pillar(&mut self, c: Coord) {
        self.set(c, CellType::Pillar);
    }

    /// Row-major iterator over `(coord, cell)`
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| (self.coord_of(idx), cell))
    }

    /// In-bounds 4-neighbours in [`Direction`] order
    pub fn neighbors4(&self, c: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::iter().filter_map(move |dir| c.step(dir, 1, self.width, self.height))
    }

    /// Number of path cells among the 4-neighbours
    pub fn path_neighbor_count(&self, c: Coord) -> usize {
        self.neighbors4(c).filter(|&n| self.is_path(n)).count()
    }

    /// All path cells in row-major order
    pub fn path_cells(&self) -> Vec<Coord> {
        self.iter()
            .filter(|(_, cell)| cell.is_path())
            .map(|(c, _)| c)
            .collect()
    }

    pub fn path_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_path()).count()
    }

    pub fn pillar_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_pillar()).count()
    }

    /// Fraction of cells that are paths
    pub fn coverage(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.path_count() as f64 / self.cells.len() as f64
    }

    /// World-space centre of a cell
    pub fn world_center(&self, c: Coord) -> WorldPos {
        let half = self.cell_size / 2.0;
        WorldPos {
            x: c.x as f64 * self.cell_size + half - self.world_width / 2.0,
            y: c.y as f64 * self.cell_size + half - self.world_height / 2.0,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

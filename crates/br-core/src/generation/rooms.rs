//! Rectangular room carving
//!
//! Rooms are carved after the mazes and overwrite whatever is below them,
//! so every room is fully open regardless of maze connectivity. Pillared
//! rooms then re-wall a regular lattice of cells inside the rectangle.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::grid::{Coord, Grid};
use crate::rng::LevelRng;

use super::config::{ParamRange, PillarRoomConfig, RoomConfig};

/// Axis-aligned rectangle of cells, already clipped to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomRect {
    /// Left column
    pub x: usize,
    /// Top row
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl RoomRect {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.x >= self.x && c.x < self.x + self.width && c.y >= self.y && c.y < self.y + self.height
    }

    /// Every cell of the rectangle in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| Coord::new(x, y)))
    }

    /// Clip to a `width` x `height` grid
    pub fn clipped(&self, width: usize, height: usize) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        }
    }
}

/// A rectangle with a lattice of pillars every `spacing` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarRoom {
    pub rect: RoomRect,
    pub spacing: usize,
}

impl PillarRoom {
    /// Pillar cells: offsets that are multiples of `spacing`, excluding the
    /// room's outer ring so the perimeter stays walkable
    pub fn pillar_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        let step = self.spacing.max(1);
        let rect = self.rect;
        (step..rect.height.saturating_sub(1))
            .step_by(step)
            .flat_map(move |dy| {
                (step..rect.width.saturating_sub(1))
                    .step_by(step)
                    .map(move |dx| Coord::new(rect.x + dx, rect.y + dy))
            })
    }
}

/// Force every cell of `rect` open
pub fn carve_rect(grid: &mut Grid, rect: RoomRect) {
    let rect = rect.clipped(grid.width(), grid.height());
    for c in rect.cells() {
        grid.set_path(c);
    }
}

/// Pick a random rectangle with its top-left corner inside the grid
pub fn random_rect(
    grid: &Grid,
    width: ParamRange<u32>,
    height: ParamRange<u32>,
    rng: &mut LevelRng,
) -> RoomRect {
    let w = rng.between(width.min, width.max) as usize;
    let h = rng.between(height.min, height.max) as usize;
    let x = rng.below(grid.width());
    let y = rng.below(grid.height());
    RoomRect::new(x, y, w, h).clipped(grid.width(), grid.height())
}

/// Carve a random number of open rooms
pub fn carve_open_rooms(grid: &mut Grid, config: &RoomConfig, rng: &mut LevelRng) -> Vec<RoomRect> {
    let count = rng.between(config.count.min, config.count.max);
    let mut rooms = Vec::new();
    for _ in 0..count {
        let rect = random_rect(grid, config.width, config.height, rng);
        trace!("open room at ({}, {}) {}x{}", rect.x, rect.y, rect.width, rect.height);
        carve_rect(grid, rect);
        rooms.push(rect);
    }
    rooms
}

/// Carve a rectangle, then re-wall its pillar lattice
pub fn carve_pillar_room(grid: &mut Grid, room: &PillarRoom) {
    carve_rect(grid, room.rect);
    for c in room.pillar_cells() {
        grid.set_pillar(c);
    }
}

/// Carve a random number of pillared rooms
pub fn carve_pillar_rooms(
    grid: &mut Grid,
    config: &PillarRoomConfig,
    rng: &mut LevelRng,
) -> Vec<PillarRoom> {
    let count = rng.between(config.count.min, config.count.max);
    let mut rooms = Vec::new();
    for _ in 0..count {
        let rect = random_rect(grid, config.width, config.height, rng);
        let spacing = rng.between(config.spacing.min, config.spacing.max) as usize;
        let room = PillarRoom { rect, spacing };
        trace!(
            "pillar room at ({}, {}) {}x{} spacing {}",
            rect.x, rect.y, rect.width, rect.height, spacing
        );
        carve_pillar_room(grid, &room);
        rooms.push(room);
    }
    rooms
}

//! Polygon room carving
//!
//! Polygons live in continuous grid space where cell `(x, y)` spans
//! `[x, x + 1) x [y, y + 1)`. A cell is carved when its centre lies inside
//! the polygon under the even-odd rule.

use std::f64::consts::TAU;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::grid::{Coord, Grid};
use crate::rng::LevelRng;

use super::config::PolygonRoomConfig;

/// Closed polygon given by its vertices in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<(f64, f64)>,
}

impl Polygon {
    pub fn new(vertices: Vec<(f64, f64)>) -> Self {
        Self { vertices }
    }

    /// Regular polygon with `sides` vertices at equal angular steps
    pub fn regular(center: (f64, f64), radius: f64, sides: u32, rotation: f64) -> Self {
        let step = TAU / sides.max(1) as f64;
        let vertices = (0..sides)
            .map(|i| {
                let angle = rotation + step * i as f64;
                (
                    center.0 + radius * angle.cos(),
                    center.1 + radius * angle.sin(),
                )
            })
            .collect();
        Self { vertices }
    }

    /// Even-odd ray-crossing test
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = self.vertices[i];
            let (xj, yj) = self.vertices[j];
            if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Whether the centre of cell `c` is inside
    pub fn contains_cell(&self, c: Coord) -> bool {
        self.contains(c.x as f64 + 0.5, c.y as f64 + 0.5)
    }

    /// Cell range `(min_x, min_y, max_x, max_y)` covering the polygon,
    /// clipped to the grid; `None` when it lies entirely outside
    fn cell_bounds(&self, width: usize, height: usize) -> Option<(usize, usize, usize, usize)> {
        let (mut lo_x, mut lo_y) = (f64::INFINITY, f64::INFINITY);
        let (mut hi_x, mut hi_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &(x, y) in &self.vertices {
            lo_x = lo_x.min(x);
            lo_y = lo_y.min(y);
            hi_x = hi_x.max(x);
            hi_y = hi_y.max(y);
        }
        if !(lo_x.is_finite() && hi_x.is_finite() && lo_y.is_finite() && hi_y.is_finite()) {
            return None;
        }
        if hi_x < 0.0 || hi_y < 0.0 || lo_x >= width as f64 || lo_y >= height as f64 {
            return None;
        }
        let min_x = lo_x.floor().max(0.0) as usize;
        let min_y = lo_y.floor().max(0.0) as usize;
        let max_x = (hi_x.ceil() as usize).min(width - 1);
        let max_y = (hi_y.ceil() as usize).min(height - 1);
        Some((min_x, min_y, max_x, max_y))
    }
}

/// Carve every cell whose centre lies inside `polygon`; returns the count
pub fn carve_polygon(grid: &mut Grid, polygon: &Polygon) -> usize {
    let Some((min_x, min_y, max_x, max_y)) = polygon.cell_bounds(grid.width(), grid.height())
    else {
        return 0;
    };
    let mut carved = 0;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let c = Coord::new(x, y);
            if polygon.contains_cell(c) {
                grid.set_path(c);
                carved += 1;
            }
        }
    }
    carved
}

/// Random regular polygon centred on a random cell
pub fn random_polygon(grid: &Grid, config: &PolygonRoomConfig, rng: &mut LevelRng) -> Polygon {
    let sides = rng.between(config.sides.min, config.sides.max);
    let radius = rng.between_f64(config.radius.min, config.radius.max);
    let center = (
        rng.below(grid.width()) as f64 + 0.5,
        rng.below(grid.height()) as f64 + 0.5,
    );
    let rotation = rng.uniform() * TAU;
    Polygon::regular(center, radius, sides, rotation)
}

/// Carve a random number of polygon rooms
pub fn carve_polygon_rooms(
    grid: &mut Grid,
    config: &PolygonRoomConfig,
    rng: &mut LevelRng,
) -> Vec<Polygon> {
    let count = rng.between(config.count.min, config.count.max);
    let mut polygons = Vec::new();
    for _ in 0..count {
        let polygon = random_polygon(grid, config, rng);
        let carved = carve_polygon(grid, &polygon);
        trace!(
            "polygon room with {} sides carved {} cells",
            polygon.vertices.len(),
            carved
        );
        polygons.push(polygon);
    }
    polygons
}

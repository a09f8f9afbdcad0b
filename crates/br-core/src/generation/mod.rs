//! Level generation
//!
//! The backrooms pipeline runs in a fixed order:
//!
//! 1. an all-wall grid of `rows x cols` cells,
//! 2. `num_mazes` overlapping Prim's mazes sharing one visited set,
//! 3. open rectangular rooms,
//! 4. pillared rectangular rooms,
//! 5. regular polygon rooms.
//!
//! Stages 3-5 overwrite the mazes unconditionally. A separate perfect-maze
//! generator with a room-and-prune conversion lives in [`perfect_maze`].

mod config;
mod deadend;
pub mod perfect_maze;
mod polygon;
mod prim;
mod rooms;
mod spawn;

use log::debug;

pub use config::{
    BackroomsConversion, GeneratorConfig, ParamRange, PillarRoomConfig, PolygonRoomConfig,
    RoomConfig,
};
pub use deadend::{DeadEndReport, find_dead_ends, remove_dead_ends};
pub use perfect_maze::{ConversionReport, convert_to_backrooms, generate_perfect_maze};
pub use polygon::{Polygon, carve_polygon, carve_polygon_rooms};
pub use prim::{MazeOutcome, VisitedSet, carve_mazes, carve_one_maze};
pub use rooms::{
    PillarRoom, RoomRect, carve_open_rooms, carve_pillar_room, carve_pillar_rooms, carve_rect,
};
pub use spawn::{find_safe_spawn_cell, find_safe_spawn_position};

use crate::error::ConfigError;
use crate::grid::Grid;
use crate::rng::LevelRng;

/// Coverage measured after each stage
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GenerationStats {
    /// Cells claimed by the maze passes
    pub maze_visited: usize,
    pub maze_coverage: f64,
    pub final_coverage: f64,
    pub pillars: usize,
}

/// A generated level together with the shapes carved into it
#[derive(Debug, Clone)]
pub struct Layout {
    pub grid: Grid,
    pub rooms: Vec<RoomRect>,
    pub pillar_rooms: Vec<PillarRoom>,
    pub polygons: Vec<Polygon>,
    pub stats: GenerationStats,
}

/// Backrooms generator with an already validated configuration
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Validate `config` once up front
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the full pipeline and keep the placement records
    pub fn generate_layout(&self, rng: &mut LevelRng) -> Layout {
        let config = &self.config;
        let mut grid = Grid::with_world(
            config.cols(),
            config.rows(),
            config.cell_size,
            config.world_width,
            config.world_height,
        );

        let visited = carve_mazes(
            &mut grid,
            config.num_mazes,
            config.maze_fill_percentage,
            config.stop_collision_probability,
            rng,
        );
        let maze_coverage = grid.coverage();
        debug!(
            "{} mazes carved on {}x{}: {} visited, coverage {:.3}",
            config.num_mazes,
            grid.width(),
            grid.height(),
            visited.len(),
            maze_coverage
        );

        let rooms = carve_open_rooms(&mut grid, &config.rooms, rng);
        debug!("{} open rooms carved", rooms.len());

        let pillar_rooms = carve_pillar_rooms(&mut grid, &config.pillar_rooms, rng);
        debug!("{} pillar rooms carved", pillar_rooms.len());

        let polygons = carve_polygon_rooms(&mut grid, &config.polygon_rooms, rng);
        debug!("{} polygon rooms carved", polygons.len());

        let stats = GenerationStats {
            maze_visited: visited.len(),
            maze_coverage,
            final_coverage: grid.coverage(),
            pillars: grid.pillar_count(),
        };
        debug!("generation finished: {:?}", stats);

        Layout {
            grid,
            rooms,
            pillar_rooms,
            polygons,
            stats,
        }
    }

    /// Run the full pipeline
    pub fn generate(&self, rng: &mut LevelRng) -> Grid {
        self.generate_layout(rng).grid
    }
}

/// Validate `config` and generate one level
pub fn generate(config: &GeneratorConfig, rng: &mut LevelRng) -> Result<Grid, ConfigError> {
    Ok(Generator::new(config.clone())?.generate(rng))
}

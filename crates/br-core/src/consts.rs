//! Generation constants and preset values
//!
//! The `BACKROOMS_*` values feed [`GeneratorConfig::backrooms`](crate::GeneratorConfig::backrooms).

/// Grid symbols used by the ASCII render and parser
pub const WALL_SYM: char = '#';
pub const PATH_SYM: char = '.';
pub const PILLAR_SYM: char = 'o';
pub const ROUTE_SYM: char = '*';

/// World extents of the backrooms preset
pub const BACKROOMS_WORLD_WIDTH: f64 = 200.0;
pub const BACKROOMS_WORLD_HEIGHT: f64 = 200.0;
pub const BACKROOMS_CELL_SIZE: f64 = 4.0;

/// Maze carving of the backrooms preset
pub const BACKROOMS_FILL: f64 = 0.6;
pub const BACKROOMS_MAZES: u32 = 3;
pub const BACKROOMS_STOP_COLLISION: f64 = 0.5;

/// Upper bound on the room count of any one room kind
pub const MAX_ROOMS_PER_KIND: u32 = 4096;

/// Minimum number of polygon sides
pub const MIN_POLYGON_SIDES: u32 = 3;

/// Default number of dead-end removal passes for the pure maze conversion
pub const DEFAULT_DEAD_END_PASSES: usize = 10;

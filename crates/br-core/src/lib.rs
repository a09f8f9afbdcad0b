//! br-core: Backrooms level generation and grid pathfinding
//!
//! This crate contains the grid model, the procedural generators and the
//! A* pathfinder. It has no I/O dependencies and is designed to be pure and
//! testable: every generator is a function of its configuration and a
//! seeded [`LevelRng`].

pub mod error;
pub mod generation;
pub mod grid;
pub mod path;

mod consts;
mod rng;

pub use consts::*;
pub use error::{ConfigError, GridError, PathError};
pub use generation::{Generator, GeneratorConfig, generate};
pub use grid::{Cell, CellType, Coord, Direction, Grid, WorldPos};
pub use path::find_path;
pub use rng::LevelRng;

//! Grid pathfinding
//!
//! Consumes any [`Grid`](crate::Grid) through its wall/path contract only:
//! path cells are walkable, walls and pillars are not.

mod astar;

pub use astar::{find_path, path_length};

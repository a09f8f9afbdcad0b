//! Error types for generation, grid parsing and pathfinding
//!
//! Running out of frontier and finding no route are not errors; they are
//! reported through logging and an empty path respectively.

use thiserror::Error;

use crate::grid::Coord;

/// Invalid generator configuration, reported before any carving happens
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("grid would be empty ({cols} cols x {rows} rows)")]
    EmptyGrid { cols: usize, rows: usize },

    #[error("{field} = {value} is out of range, expected {expected}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("{field} has min {min} greater than max {max}")]
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("Could not parse configuration: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Invalid arguments to a path query
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("{coord} is outside the {width}x{height} grid")]
    OutOfBounds {
        coord: Coord,
        width: usize,
        height: usize,
    },
}

/// Failure to build a grid from a textual map
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("map is empty")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("grid has {found} cells, expected {expected}")]
    CellCount { expected: usize, found: usize },

    #[error("unknown map symbol '{symbol}' at row {row}, col {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
}

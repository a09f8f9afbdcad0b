//! Generator configuration
//!
//! Every parameter is supplied by the caller, either in code or as JSON.
//! [`GeneratorConfig::backrooms`] is the one named preset.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Inclusive `[min, max]` parameter range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange<T> {
    pub min: T,
    pub max: T,
}

impl<T> ParamRange<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: Copy + Into<f64>> ParamRange<T> {
    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        let (min, max) = (self.min.into(), self.max.into());
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigError::OutOfRange {
                field,
                value: if min.is_finite() { max } else { min },
                expected: "a finite number",
            });
        }
        if min > max {
            return Err(ConfigError::InvertedRange { field, min, max });
        }
        Ok(())
    }
}

/// Plain rectangular rooms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomConfig {
    pub count: ParamRange<u32>,
    pub width: ParamRange<u32>,
    pub height: ParamRange<u32>,
}

/// Rectangular rooms with a regular lattice of pillars
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillarRoomConfig {
    pub count: ParamRange<u32>,
    pub width: ParamRange<u32>,
    pub height: ParamRange<u32>,
    /// Distance in cells between neighbouring pillars
    pub spacing: ParamRange<u32>,
}

/// Regular polygon rooms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolygonRoomConfig {
    pub count: ParamRange<u32>,
    pub sides: ParamRange<u32>,
    /// Circumradius in cells
    pub radius: ParamRange<f64>,
}

/// Full configuration of the multi-maze backrooms pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub world_width: f64,
    pub world_height: f64,
    pub cell_size: f64,
    /// Target fraction of visited cells per maze pass, in `(0, 1]`
    pub maze_fill_percentage: f64,
    pub num_mazes: u32,
    /// Chance of dropping a connection whose midpoint is already carved
    pub stop_collision_probability: f64,
    pub rooms: RoomConfig,
    pub pillar_rooms: PillarRoomConfig,
    pub polygon_rooms: PolygonRoomConfig,
}

impl GeneratorConfig {
    /// Mixed maze and open-room layout
    pub fn backrooms() -> Self {
        Self {
            world_width: BACKROOMS_WORLD_WIDTH,
            world_height: BACKROOMS_WORLD_HEIGHT,
            cell_size: BACKROOMS_CELL_SIZE,
            maze_fill_percentage: BACKROOMS_FILL,
            num_mazes: BACKROOMS_MAZES,
            stop_collision_probability: BACKROOMS_STOP_COLLISION,
            rooms: RoomConfig {
                count: ParamRange::new(3, 6),
                width: ParamRange::new(3, 8),
                height: ParamRange::new(3, 8),
            },
            pillar_rooms: PillarRoomConfig {
                count: ParamRange::new(1, 3),
                width: ParamRange::new(6, 12),
                height: ParamRange::new(6, 12),
                spacing: ParamRange::new(2, 3),
            },
            polygon_rooms: PolygonRoomConfig {
                count: ParamRange::new(1, 3),
                sides: ParamRange::new(5, 8),
                radius: ParamRange::new(3.0, 6.0),
            },
        }
    }

    /// Maze carving only: every room count is zero
    pub fn maze_only(
        world_width: f64,
        world_height: f64,
        cell_size: f64,
        maze_fill_percentage: f64,
        num_mazes: u32,
        stop_collision_probability: f64,
    ) -> Self {
        let none = ParamRange::new(0, 0);
        let unit = ParamRange::new(1, 1);
        Self {
            world_width,
            world_height,
            cell_size,
            maze_fill_percentage,
            num_mazes,
            stop_collision_probability,
            rooms: RoomConfig {
                count: none,
                width: unit,
                height: unit,
            },
            pillar_rooms: PillarRoomConfig {
                count: none,
                width: unit,
                height: unit,
                spacing: unit,
            },
            polygon_rooms: PolygonRoomConfig {
                count: none,
                sides: ParamRange::new(MIN_POLYGON_SIDES, MIN_POLYGON_SIDES),
                radius: ParamRange::new(1.0, 1.0),
            },
        }
    }

    /// Parse a JSON configuration and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// `floor(world_width / cell_size)`
    pub fn cols(&self) -> usize {
        (self.world_width / self.cell_size).floor() as usize
    }

    /// `floor(world_height / cell_size)`
    pub fn rows(&self) -> usize {
        (self.world_height / self.cell_size).floor() as usize
    }

    /// Report the first invalid parameter
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("world_width", self.world_width)?;
        positive("world_height", self.world_height)?;
        positive("cell_size", self.cell_size)?;

        let (cols, rows) = (self.cols(), self.rows());
        if cols == 0 || rows == 0 {
            return Err(ConfigError::EmptyGrid { cols, rows });
        }

        let fill = self.maze_fill_percentage;
        if !(fill > 0.0 && fill <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "maze_fill_percentage",
                value: fill,
                expected: "(0, 1]",
            });
        }
        if self.num_mazes == 0 {
            return Err(ConfigError::OutOfRange {
                field: "num_mazes",
                value: 0.0,
                expected: ">= 1",
            });
        }
        let stop = self.stop_collision_probability;
        if !(0.0..=1.0).contains(&stop) {
            return Err(ConfigError::OutOfRange {
                field: "stop_collision_probability",
                value: stop,
                expected: "[0, 1]",
            });
        }

        self.rooms.count.check("rooms.count")?;
        room_count_bound("rooms.count", self.rooms.count)?;
        self.rooms.width.check("rooms.width")?;
        self.rooms.height.check("rooms.height")?;

        self.pillar_rooms.count.check("pillar_rooms.count")?;
        room_count_bound("pillar_rooms.count", self.pillar_rooms.count)?;
        self.pillar_rooms.width.check("pillar_rooms.width")?;
        self.pillar_rooms.height.check("pillar_rooms.height")?;
        self.pillar_rooms.spacing.check("pillar_rooms.spacing")?;
        if self.pillar_rooms.spacing.min < 1 {
            return Err(ConfigError::OutOfRange {
                field: "pillar_rooms.spacing",
                value: self.pillar_rooms.spacing.min as f64,
                expected: ">= 1",
            });
        }

        self.polygon_rooms.count.check("polygon_rooms.count")?;
        room_count_bound("polygon_rooms.count", self.polygon_rooms.count)?;
        self.polygon_rooms.sides.check("polygon_rooms.sides")?;
        if self.polygon_rooms.sides.min < MIN_POLYGON_SIDES {
            return Err(ConfigError::OutOfRange {
                field: "polygon_rooms.sides",
                value: self.polygon_rooms.sides.min as f64,
                expected: ">= 3",
            });
        }
        self.polygon_rooms.radius.check("polygon_rooms.radius")?;
        if self.polygon_rooms.radius.min < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "polygon_rooms.radius",
                value: self.polygon_rooms.radius.min,
                expected: ">= 0",
            });
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

/// Room carving and pruning applied to a pure maze
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackroomsConversion {
    pub room_attempts: u32,
    /// Side length range of carved rooms
    pub room_size: ParamRange<u32>,
    pub dead_end_passes: usize,
}

impl BackroomsConversion {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.room_size.check("room_size")?;
        room_count_bound("room_attempts", ParamRange::new(0, self.room_attempts))
    }
}

fn room_count_bound(field: &'static str, count: ParamRange<u32>) -> Result<(), ConfigError> {
    if count.max > MAX_ROOMS_PER_KIND {
        return Err(ConfigError::OutOfRange {
            field,
            value: count.max as f64,
            expected: "<= 4096",
        });
    }
    Ok(())
}

impl Default for BackroomsConversion {
    fn default() -> Self {
        Self {
            room_attempts: 8,
            room_size: ParamRange::new(3, 6),
            dead_end_passes: DEFAULT_DEAD_END_PASSES,
        }
    }
}

//! Grid cell types

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::{PATH_SYM, PILLAR_SYM, WALL_SYM};

/// Cell/terrain type
///
/// A pillar is a wall that was carved open by a room and then re-walled,
/// so a cell can never be both a path and a pillar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CellType {
    #[default]
    Wall = 0,
    Path = 1,
    Pillar = 2,
}

impl CellType {
    /// Get the display character for this cell type
    pub const fn symbol(&self) -> char {
        match self {
            CellType::Wall => WALL_SYM,
            CellType::Path => PATH_SYM,
            CellType::Pillar => PILLAR_SYM,
        }
    }

    /// Parse a display character
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            WALL_SYM => Some(CellType::Wall),
            PATH_SYM => Some(CellType::Path),
            PILLAR_SYM => Some(CellType::Pillar),
            _ => None,
        }
    }
}

/// A single grid cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell {
    /// Terrain type
    pub typ: CellType,
}

impl Cell {
    /// Create a wall cell
    pub const fn wall() -> Self {
        Self {
            typ: CellType::Wall,
        }
    }

    /// Create a path (carved) cell
    pub const fn path() -> Self {
        Self {
            typ: CellType::Path,
        }
    }

    /// Create a pillar cell
    pub const fn pillar() -> Self {
        Self {
            typ: CellType::Pillar,
        }
    }

    /// Traversable
    pub const fn is_path(&self) -> bool {
        matches!(self.typ, CellType::Path)
    }

    pub const fn is_pillar(&self) -> bool {
        matches!(self.typ, CellType::Pillar)
    }

    /// Blocks movement (plain walls and pillars)
    pub const fn is_wall(&self) -> bool {
        !self.is_path()
    }

    pub const fn symbol(&self) -> char {
        self.typ.symbol()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_default_is_wall() {
        let cell = Cell::default();
        assert!(cell.is_wall());
        assert!(!cell.is_path());
        assert!(!cell.is_pillar());
    }

    #[test]
    fn test_pillar_is_wall_not_path() {
        let cell = Cell::pillar();
        assert!(cell.is_pillar());
        assert!(cell.is_wall());
        assert!(!cell.is_path());
    }

    #[test]
    fn test_symbols_roundtrip() {
        for typ in CellType::iter() {
            assert_eq!(CellType::from_symbol(typ.symbol()), Some(typ));
        }
        assert_eq!(CellType::from_symbol('?'), None);
    }
}

//! Cell states of the fire-spread automaton
//!
//! Externally a landscape is an integer matrix (`-1` for forest, `0..=8` for
//! settlement density) and the live fire grid adds `100` for burning cells.
//! Internally every cell is a [`Cell`], so a cell can never hold a density
//! outside the valid range or a negative value other than the tree marker.

use serde::{Deserialize, Serialize};

/// Integer code of an unburned tree cell
pub const TREE_CODE: i32 = -1;

/// Integer code of a burning cell
pub const FIRE_CODE: i32 = 100;

/// Highest population density a settled cell can carry
pub const MAX_DENSITY: u8 = 8;

/// State of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Unburned flammable fuel with no population
    Tree,
    /// Currently ablaze
    Fire,
    /// Extinguished cleared land. Reads as density 0 but never re-ignites.
    Burnt,
    /// Buildable land with population density `0..=MAX_DENSITY`
    Land(u8),
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Land(0)
    }
}

impl Cell {
    /// Settled land with the given density, or `None` above [`MAX_DENSITY`]
    #[must_use]
    pub fn land(density: u8) -> Option<Self> {
        (density <= MAX_DENSITY).then_some(Cell::Land(density))
    }

    /// Decode an external integer code (`-1` tree, `0..=8` density)
    ///
    /// Burning cells are not accepted: a landscape is always fire-free.
    #[must_use]
    pub fn from_landscape_code(code: i32) -> Option<Self> {
        match code {
            TREE_CODE => Some(Cell::Tree),
            d if (0..=i32::from(MAX_DENSITY)).contains(&d) => Some(Cell::Land(d as u8)),
            _ => None,
        }
    }

    /// Integer code used when exporting grids to renderers and the C API
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Cell::Tree => TREE_CODE,
            Cell::Fire => FIRE_CODE,
            Cell::Burnt => 0,
            Cell::Land(d) => i32::from(d),
        }
    }

    /// Population density carried by the cell (trees, fire and cleared land carry none)
    #[must_use]
    pub fn density(self) -> u8 {
        match self {
            Cell::Land(d) => d,
            Cell::Tree | Cell::Fire | Cell::Burnt => 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_tree(self) -> bool {
        self == Cell::Tree
    }

    #[inline]
    #[must_use]
    pub fn is_burning(self) -> bool {
        self == Cell::Fire
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_codes() {
        assert_eq!(Cell::from_landscape_code(-1), Some(Cell::Tree));
        assert_eq!(Cell::from_landscape_code(0), Some(Cell::Land(0)));
        assert_eq!(Cell::from_landscape_code(8), Some(Cell::Land(8)));
        assert_eq!(Cell::from_landscape_code(9), None);
        assert_eq!(Cell::from_landscape_code(-2), None);
        assert_eq!(Cell::from_landscape_code(FIRE_CODE), None);
    }

    #[test]
    fn test_export_codes() {
        assert_eq!(Cell::Tree.code(), -1);
        assert_eq!(Cell::Fire.code(), 100);
        assert_eq!(Cell::Burnt.code(), 0);
        assert_eq!(Cell::Land(5).code(), 5);
    }

    #[test]
    fn test_density() {
        assert_eq!(Cell::Land(7).density(), 7);
        assert_eq!(Cell::Tree.density(), 0);
        assert_eq!(Cell::Burnt.density(), 0);
        assert_eq!(Cell::land(9), None);
    }
}

//! Static forest and settlement snapshot
//!
//! A [`Landscape`] is produced once by an external terrain/city generator and
//! stays read-only for the whole run. The automaton copies it as its initial
//! fuel state; the threat aggregator keeps reading the *original* densities
//! after fire has overwritten the automaton's working copy.

use serde::{Deserialize, Serialize};

use crate::core_types::{Cell, Grid, MAX_DENSITY};
use crate::error::FireRiskError;

/// Immutable forest/settlement matrix
///
/// Serialized as its cell grid only; deserialization re-runs
/// [`Landscape::new`] and recounts the trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LandscapeRepr", into = "LandscapeRepr")]
pub struct Landscape {
    cells: Grid<Cell>,
    tree_count: usize,
}

#[derive(Serialize, Deserialize)]
struct LandscapeRepr {
    cells: Grid<Cell>,
}

impl TryFrom<LandscapeRepr> for Landscape {
    type Error = FireRiskError;

    fn try_from(repr: LandscapeRepr) -> Result<Self, Self::Error> {
        Landscape::new(repr.cells)
    }
}

impl From<Landscape> for LandscapeRepr {
    fn from(landscape: Landscape) -> Self {
        Self {
            cells: landscape.cells,
        }
    }
}

impl Landscape {
    /// Build a landscape from cell states
    ///
    /// # Errors
    ///
    /// Returns [`FireRiskError::InvalidDimensions`] for an empty grid and
    /// [`FireRiskError::InvalidCell`] if any cell is burning, already burnt, or
    /// carries a density above [`MAX_DENSITY`].
    pub fn new(cells: Grid<Cell>) -> Result<Self, FireRiskError> {
        if cells.is_empty() {
            return Err(FireRiskError::InvalidDimensions {
                width: cells.width(),
                height: cells.height(),
                len: 0,
            });
        }
        for (index, &cell) in cells.iter().enumerate() {
            let valid = match cell {
                Cell::Tree => true,
                Cell::Land(d) => d <= MAX_DENSITY,
                Cell::Fire | Cell::Burnt => false,
            };
            if !valid {
                return Err(FireRiskError::InvalidCell {
                    index,
                    value: cell.code(),
                });
            }
        }
        let tree_count = cells.iter().filter(|c| c.is_tree()).count();
        Ok(Self { cells, tree_count })
    }

    /// Build a landscape from the generator's integer matrix
    ///
    /// `codes` is row-major; `-1` marks a tree and `0..=8` a population density.
    ///
    /// # Errors
    ///
    /// Returns [`FireRiskError::InvalidDimensions`] if `codes.len()` does not
    /// match `width * height`, and [`FireRiskError::InvalidCell`] for any value
    /// outside `{-1} ∪ [0, 8]`.
    pub fn from_codes(width: usize, height: usize, codes: &[i32]) -> Result<Self, FireRiskError> {
        let cells = codes
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                Cell::from_landscape_code(value).ok_or(FireRiskError::InvalidCell { index, value })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(Grid::from_vec(width, height, cells)?)
    }

    /// Overlay a forest mask on a density layer
    ///
    /// Cells marked as forest become trees regardless of their density.
    ///
    /// # Errors
    ///
    /// Returns [`FireRiskError::ShapeMismatch`] if the layers differ in shape and
    /// [`FireRiskError::InvalidCell`] for a non-forest density above [`MAX_DENSITY`].
    pub fn from_layers(forest: &Grid<bool>, density: &Grid<u8>) -> Result<Self, FireRiskError> {
        if !forest.same_shape(density) {
            return Err(FireRiskError::ShapeMismatch {
                context: "density layer",
                expected: forest.dimensions(),
                found: density.dimensions(),
            });
        }
        let cells: Vec<Cell> = forest
            .iter()
            .zip(density.iter())
            .map(|(&is_forest, &d)| if is_forest { Cell::Tree } else { Cell::Land(d) })
            .collect();
        Self::new(Grid::from_vec(forest.width(), forest.height(), cells)?)
    }

    /// Cell states in row-major order
    #[must_use]
    pub fn cells(&self) -> &Grid<Cell> {
        &self.cells
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.cells.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.cells.height()
    }

    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dimensions()
    }

    /// Original population density at a flat index (0 for trees)
    #[inline]
    #[must_use]
    pub fn density_at(&self, idx: usize) -> u8 {
        self.cells[idx].density()
    }

    /// Population density layer (trees read as 0)
    #[must_use]
    pub fn density_grid(&self) -> Grid<u8> {
        self.cells.map(|c| c.density())
    }

    /// Boolean mask of tree cells
    #[must_use]
    pub fn forest_mask(&self) -> Grid<bool> {
        self.cells.map(|c| c.is_tree())
    }

    /// Number of tree cells available as ignition sources
    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.tree_count
    }

    /// Flat indices of every tree cell, in row-major order
    #[must_use]
    pub fn tree_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, c)| c.is_tree().then_some(idx))
            .collect()
    }

    /// Export as the generator's integer matrix
    #[must_use]
    pub fn to_codes(&self) -> Vec<i32> {
        self.cells.iter().map(|c| c.code()).collect()
    }
}

//! Flat row-major grid storage
//!
//! Every per-cell layer in the crate (landscape cells, fire state, burn age,
//! exposure accumulators, risk levels) is a `Grid<T>`: a single `Vec<T>` indexed
//! as `y * width + x`. Keeping layers flat makes the step double buffer an
//! O(1) swap and lets layers of the same shape share indices.

use serde::{Deserialize, Serialize};

use crate::error::FireRiskError;

/// Offsets of the Moore neighborhood as `(dx, dy)` pairs
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// 2D grid stored as a flat `Vec<T>` in row-major order
///
/// Deserialization goes through [`Grid::from_vec`], so a decoded grid always
/// has non-zero dimensions matching its buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr<T>")]
pub struct Grid<T> {
    /// Cell values in row-major order (y * width + x)
    data: Vec<T>,
    /// Grid width in cells
    width: usize,
    /// Grid height in cells
    height: usize,
}

// Unchecked wire form of `Grid`
#[derive(Deserialize)]
struct GridRepr<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> TryFrom<GridRepr<T>> for Grid<T> {
    type Error = FireRiskError;

    fn try_from(repr: GridRepr<T>) -> Result<Self, Self::Error> {
        Grid::from_vec(repr.width, repr.height, repr.data)
    }
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `value`
    ///
    /// # Arguments
    ///
    /// * `width` - Grid width in cells
    /// * `height` - Grid height in cells
    /// * `value` - Initial value for all cells
    #[must_use]
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Overwrite every cell with the contents of `other`, reusing this grid's allocation
    ///
    /// # Panics
    ///
    /// Panics if the two grids differ in shape
    pub fn copy_from(&mut self, other: &Grid<T>) {
        assert!(self.same_shape(other), "Grid shapes differ");
        self.data.clone_from_slice(&other.data);
    }
}

impl<T: Clone + Default> Grid<T> {
    /// Create a grid with every cell set to `T::default()`
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }
}

impl<T> Grid<T> {
    /// Wrap an existing row-major buffer
    ///
    /// # Errors
    ///
    /// Returns [`FireRiskError::InvalidDimensions`] if either dimension is zero
    /// or `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, FireRiskError> {
        let expected = width.checked_mul(height);
        if width == 0 || height == 0 || expected != Some(data.len()) {
            return Err(FireRiskError::InvalidDimensions {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Grid width in cells
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid dimensions as `(width, height)`
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of cells
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the grid holds no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True if `other` has the same width and height
    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Flat index of `(x, y)`
    #[inline]
    #[must_use]
    pub fn flat_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// `(x, y)` coordinates of a flat index
    #[inline]
    #[must_use]
    pub fn coords(&self, idx: usize) -> (usize, usize) {
        (idx % self.width, idx / self.width)
    }

    /// Value at `(x, y)`
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> &T {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        &self.data[y * self.width + x]
    }

    /// Set the value at `(x, y)`
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[y * self.width + x] = value;
    }

    /// Borrow the row-major buffer
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the grid, returning its row-major buffer
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate over cell values in row-major order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Build a new grid of the same shape by mapping every cell
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            data: self.data.iter().map(f).collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// Flat indices of the Moore neighbors of `idx`
    ///
    /// Neighbors outside the grid are skipped; there is no wraparound.
    pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbor_slots(idx).map(|(_, n)| n)
    }

    /// Moore neighbors of `idx` as `(slot, index)` pairs, clipped at the edges
    ///
    /// `slot` is the neighbor's position in [`MOORE_OFFSETS`].
    pub fn neighbor_slots(&self, idx: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (x, y) = self.coords(idx);
        MOORE_OFFSETS
            .iter()
            .enumerate()
            .filter_map(move |(slot, &(dx, dy))| {
                let nx = x.checked_add_signed(dx)?;
                let ny = y.checked_add_signed(dy)?;
                (nx < self.width && ny < self.height).then_some((slot, ny * self.width + nx))
            })
    }
}

impl<T: Copy + PartialOrd> Grid<T> {
    /// Largest cell value, or `None` for an empty grid
    #[must_use]
    pub fn max_value(&self) -> Option<T> {
        self.data
            .iter()
            .copied()
            .reduce(|a, b| if b > a { b } else { a })
    }
}

impl<T> std::ops::Index<usize> for Grid<T> {
    type Output = T;

    fn index(&self, idx: usize) -> &T {
        &self.data[idx]
    }
}

impl<T> std::ops::IndexMut<usize> for Grid<T> {
    fn index_mut(&mut self, idx: usize) -> &mut T {
        &mut self.data[idx]
    }
}

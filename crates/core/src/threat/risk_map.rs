//! Quantized per-cell risk levels handed to the deployment optimizer

use serde::{Deserialize, Serialize};

use super::normalize::MAX_RISK_LEVEL;
use crate::core_types::Grid;
use crate::error::FireRiskError;

/// Risk levels `0..=9`, same shape as the landscape they were forecast for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RiskMapRepr")]
pub struct RiskMap {
    levels: Grid<u8>,
}

#[derive(Deserialize)]
struct RiskMapRepr {
    levels: Grid<u8>,
}

impl TryFrom<RiskMapRepr> for RiskMap {
    type Error = FireRiskError;

    fn try_from(repr: RiskMapRepr) -> Result<Self, Self::Error> {
        RiskMap::new(repr.levels)
    }
}

impl RiskMap {
    /// Wrap quantized levels
    ///
    /// # Errors
    ///
    /// Returns [`FireRiskError::InvalidDimensions`] for an empty grid and
    /// [`FireRiskError::InvalidParameter`] if any level exceeds 9.
    pub fn new(levels: Grid<u8>) -> Result<Self, FireRiskError> {
        if levels.is_empty() {
            return Err(FireRiskError::InvalidDimensions {
                width: levels.width(),
                height: levels.height(),
                len: 0,
            });
        }
        if let Some(bad) = levels.iter().find(|&&l| l > MAX_RISK_LEVEL) {
            return Err(FireRiskError::InvalidParameter(format!(
                "risk level {bad} exceeds {MAX_RISK_LEVEL}"
            )));
        }
        Ok(Self { levels })
    }

    /// Levels grid
    #[must_use]
    pub fn levels(&self) -> &Grid<u8> {
        &self.levels
    }

    /// Level at `(x, y)`
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        *self.levels.get(x, y)
    }

    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        self.levels.dimensions()
    }

    /// Highest level present in the map
    #[must_use]
    pub fn max_level(&self) -> u8 {
        self.levels.max_value().unwrap_or(0)
    }

    /// Number of cells at each level, indexed by level
    #[must_use]
    pub fn histogram(&self) -> [usize; MAX_RISK_LEVEL as usize + 1] {
        let mut counts = [0; MAX_RISK_LEVEL as usize + 1];
        for &level in self.levels.iter() {
            counts[level as usize] += 1;
        }
        counts
    }

    /// Levels as a row-major integer matrix
    #[must_use]
    pub fn to_codes(&self) -> Vec<i32> {
        self.levels.iter().map(|&l| i32::from(l)).collect()
    }

    /// Resample to a coarser (or finer) grid for the deployment solver
    ///
    /// Uses first-order (bilinear) interpolation with corner-aligned sample
    /// points, then rescales the result min–max onto `[0, 9]`. A constant map
    /// resamples to all zeros.
    ///
    /// # Errors
    ///
    /// Returns [`FireRiskError::InvalidDimensions`] if either target dimension is zero.
    pub fn resample(
        &self,
        target_width: usize,
        target_height: usize,
    ) -> Result<Grid<f64>, FireRiskError> {
        if target_width == 0 || target_height == 0 {
            return Err(FireRiskError::InvalidDimensions {
                width: target_width,
                height: target_height,
                len: 0,
            });
        }

        let (width, height) = self.levels.dimensions();
        let source = self.levels.as_slice();
        let sample = |x: usize, y: usize| f64::from(source[y * width + x]);

        let mut out = Grid::new(target_width, target_height);
        for ty in 0..target_height {
            let sy = source_coordinate(ty, target_height, height);
            let y0 = sy.floor() as usize;
            let y1 = (y0 + 1).min(height - 1);
            let fy = sy - y0 as f64;
            for tx in 0..target_width {
                let sx = source_coordinate(tx, target_width, width);
                let x0 = sx.floor() as usize;
                let x1 = (x0 + 1).min(width - 1);
                let fx = sx - x0 as f64;

                let top = sample(x0, y0) * (1.0 - fx) + sample(x1, y0) * fx;
                let bottom = sample(x0, y1) * (1.0 - fx) + sample(x1, y1) * fx;
                out.set(tx, ty, top * (1.0 - fy) + bottom * fy);
            }
        }

        let min = out.iter().copied().fold(f64::INFINITY, f64::min);
        let max = out.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let top = f64::from(MAX_RISK_LEVEL);
        if max > min {
            Ok(out.map(|&v| (v - min) / (max - min) * top))
        } else {
            Ok(Grid::new(target_width, target_height))
        }
    }
}

// Corner-aligned mapping: first and last output samples land on the first and
// last source cells.
fn source_coordinate(i: usize, out_len: usize, in_len: usize) -> f64 {
    if out_len <= 1 {
        return 0.0;
    }
    let pos = i as f64 * (in_len - 1) as f64 / (out_len - 1) as f64;
    pos.min((in_len - 1) as f64)
}

//! Wind heading utilities
//!
//! Grid space has `x` growing to the right (east) and `y` growing down the rows
//! (south). Wind headings are given in degrees counter-clockwise from east, so
//! 0° blows toward +x and 90° blows toward the top row (-y).

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::FireRiskError;

/// 2D vector type for grid-space directions
pub type Vec2 = Vector2<f64>;

/// Unit vector in grid space for a wind heading
///
/// # Arguments
///
/// * `angle_degrees` - Heading in degrees (0 = right, 90 = up)
#[must_use]
pub fn wind_vector(angle_degrees: f64) -> Vec2 {
    let radians = angle_degrees.to_radians();
    Vec2::new(radians.cos(), -radians.sin())
}

/// Directional bias applied to neighbor spread probabilities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindBias {
    /// Heading the wind blows toward, degrees (0 = right, 90 = up)
    pub direction_degrees: f64,
    /// How strongly alignment with the wind scales spread (0 = no effect)
    pub strength: f64,
}

impl WindBias {
    #[must_use]
    pub fn new(direction_degrees: f64, strength: f64) -> Self {
        Self {
            direction_degrees,
            strength,
        }
    }

    /// Check the heading is finite and the strength non-negative
    ///
    /// # Errors
    ///
    /// Returns [`FireRiskError::InvalidParameter`] for non-finite values or
    /// a negative strength.
    pub fn validate(&self) -> Result<(), FireRiskError> {
        if !self.direction_degrees.is_finite() {
            return Err(FireRiskError::InvalidParameter(format!(
                "wind direction must be finite, got {}",
                self.direction_degrees
            )));
        }
        if !self.strength.is_finite() || self.strength < 0.0 {
            return Err(FireRiskError::InvalidParameter(format!(
                "wind strength must be finite and non-negative, got {}",
                self.strength
            )));
        }
        Ok(())
    }

    /// Spread multipliers for the eight Moore offsets, in [`MOORE_OFFSETS`] order
    ///
    /// Each factor is `max(0, 1 + strength * (wind · dir))` where `dir` is the unit
    /// vector toward that neighbor.
    ///
    /// [`MOORE_OFFSETS`]: crate::core_types::grid::MOORE_OFFSETS
    #[must_use]
    pub fn neighbor_factors(&self) -> [f64; 8] {
        let wind = wind_vector(self.direction_degrees);
        let mut factors = [1.0; 8];
        for (factor, &(dx, dy)) in factors
            .iter_mut()
            .zip(crate::core_types::grid::MOORE_OFFSETS.iter())
        {
            let dir = Vec2::new(dx as f64, dy as f64).normalize();
            *factor = (1.0 + self.strength * wind.dot(&dir)).max(0.0);
        }
        factors
    }
}

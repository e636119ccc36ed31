//! Spread-rule tunables

use serde::{Deserialize, Serialize};

use crate::core_types::{Cell, WindBias};
use crate::error::FireRiskError;

/// Default probability that fire jumps to a neighboring tree in one step
pub const DEFAULT_TREE_SPREAD_PROB: f64 = 0.35;
/// Default probability that fire jumps to neighboring unpopulated land
pub const DEFAULT_EMPTY_SPREAD_PROB: f64 = 0.02;
/// Default per-density-unit increase of the land spread probability
pub const DEFAULT_SPREAD_DENSITY_SCALE: f64 = 0.55;
/// Default number of steps a cell burns before clearing
pub const DEFAULT_BURN_DURATION: u32 = 10;

/// Parameters of the stochastic transition rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadParams {
    /// Chance a burning cell ignites an adjacent tree each step
    pub tree_spread_prob: f64,
    /// Chance a burning cell ignites adjacent density-0 land each step
    pub empty_spread_prob: f64,
    /// Linear scaling of land spread with population density
    pub spread_density_scale: f64,
    /// Steps a cell stays ablaze before it clears
    pub burn_duration: u32,
    /// Optional directional bias; `None` spreads isotropically
    #[serde(default)]
    pub wind: Option<WindBias>,
}

impl Default for SpreadParams {
    fn default() -> Self {
        Self {
            tree_spread_prob: DEFAULT_TREE_SPREAD_PROB,
            empty_spread_prob: DEFAULT_EMPTY_SPREAD_PROB,
            spread_density_scale: DEFAULT_SPREAD_DENSITY_SCALE,
            burn_duration: DEFAULT_BURN_DURATION,
            wind: None,
        }
    }
}

impl SpreadParams {
    /// Check every tunable is inside its valid range
    ///
    /// # Errors
    ///
    /// Returns [`FireRiskError::InvalidParameter`] if a probability is outside
    /// `[0, 1]`, the density scale is negative or non-finite, the burn
    /// duration is zero, or the wind bias is invalid.
    pub fn validate(&self) -> Result<(), FireRiskError> {
        for (name, prob) in [
            ("tree_spread_prob", self.tree_spread_prob),
            ("empty_spread_prob", self.empty_spread_prob),
        ] {
            if !(0.0..=1.0).contains(&prob) {
                return Err(FireRiskError::InvalidParameter(format!(
                    "{name} must be within [0, 1], got {prob}"
                )));
            }
        }
        if !self.spread_density_scale.is_finite() || self.spread_density_scale < 0.0 {
            return Err(FireRiskError::InvalidParameter(format!(
                "spread_density_scale must be finite and non-negative, got {}",
                self.spread_density_scale
            )));
        }
        if self.burn_duration == 0 {
            return Err(FireRiskError::InvalidParameter(
                "burn_duration must be at least one step".to_string(),
            ));
        }
        if let Some(wind) = &self.wind {
            wind.validate()?;
        }
        Ok(())
    }

    /// Probability that fire spreads into a cell of state `target`, before wind bias
    ///
    /// Burning and cleared cells cannot ignite.
    #[must_use]
    pub fn ignition_probability(&self, target: Cell) -> f64 {
        match target {
            Cell::Tree => self.tree_spread_prob,
            Cell::Land(0) => self.empty_spread_prob,
            Cell::Land(d) => {
                (self.empty_spread_prob * (1.0 + f64::from(d) * self.spread_density_scale)).min(1.0)
            }
            Cell::Fire | Cell::Burnt => 0.0,
        }
    }
}

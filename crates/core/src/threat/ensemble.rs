//! Averaged multi-realization forecasts
//!
//! Each member builds its own automaton from a seed derived from the ensemble's
//! base seed, so members are independent of one another and of the order in
//! which rayon schedules them. Blended totals are averaged in member order and
//! only then quantized.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    accumulate_exposure, blend, check_shapes, quantize, RiskMap, RiskWeights, ThreatAggregator,
};
use crate::automaton::{FireAutomaton, SpreadParams};
use crate::core_types::Grid;
use crate::error::FireRiskError;
use crate::landscape::Landscape;

/// How many realizations to average and how to seed them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnsembleConfig {
    /// Number of independent realizations
    pub members: usize,
    /// Steps each member runs before its forecast horizon starts
    pub warmup_steps: usize,
    /// Member `i` is seeded with `base_seed + i`
    pub base_seed: u64,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            members: 16,
            warmup_steps: 100,
            base_seed: 0,
        }
    }
}

/// Result of an averaged forecast
#[derive(Debug, Clone)]
pub struct EnsembleForecast {
    /// Quantized risk of the averaged blend
    pub risk: RiskMap,
    /// Mean normalized blend across members, in `[0, 1]`
    pub mean_danger: Grid<f64>,
    /// Mean number of steps each cell spent burning per member
    pub mean_burn_frequency: Grid<f64>,
    /// Number of members averaged
    pub members: usize,
}

impl ThreatAggregator {
    /// Average `config.members` independent forecasts before quantizing
    ///
    /// Unlike [`ThreatAggregator::forecast`] this builds its own automatons, one
    /// per member, each warmed up for `config.warmup_steps` before the horizon.
    /// The result depends only on the inputs and `config.base_seed`.
    ///
    /// # Errors
    ///
    /// Returns [`FireRiskError::InvalidParameter`] if `config.members` is zero or
    /// `params` are invalid, [`FireRiskError::ShapeMismatch`] if the mask and
    /// landscape differ in shape, and [`FireRiskError::NoFuel`] if the
    /// landscape has no trees.
    pub fn forecast_ensemble(
        &self,
        landscape: &Landscape,
        forest_mask: &Grid<bool>,
        params: SpreadParams,
        config: EnsembleConfig,
    ) -> Result<EnsembleForecast, FireRiskError> {
        if config.members == 0 {
            return Err(FireRiskError::InvalidParameter(
                "ensemble needs at least one member".to_string(),
            ));
        }
        check_shapes(landscape.dimensions(), landscape, forest_mask)?;

        info!(
            "Running {}-member ensemble forecast: warm-up {} steps, horizon {} steps",
            config.members, config.warmup_steps, self.horizon
        );

        let horizon = self.horizon;
        let realizations = (0..config.members)
            .into_par_iter()
            .map(|member| {
                let seed = config.base_seed.wrapping_add(member as u64);
                let mut automaton = FireAutomaton::with_seed(landscape, params, seed)?;
                automaton.advance(config.warmup_steps);
                let exposure = accumulate_exposure(&mut automaton, landscape, horizon);
                debug!(
                    "Ensemble member {} (seed {}) finished with {} cells burning",
                    member,
                    seed,
                    automaton.burning_count()
                );
                let total = blend(&exposure, landscape, forest_mask, RiskWeights::STANDARD);
                Ok((total, exposure.burn_frequency))
            })
            .collect::<Result<Vec<_>, FireRiskError>>()?;

        let (width, height) = landscape.dimensions();
        let mut mean_danger: Grid<f64> = Grid::new(width, height);
        let mut mean_burn_frequency: Grid<f64> = Grid::new(width, height);
        for (total, frequency) in &realizations {
            for idx in 0..mean_danger.len() {
                mean_danger[idx] += total[idx];
                mean_burn_frequency[idx] += frequency[idx];
            }
        }
        let scale = 1.0 / config.members as f64;
        for idx in 0..mean_danger.len() {
            mean_danger[idx] *= scale;
            mean_burn_frequency[idx] *= scale;
        }

        let risk = RiskMap::new(quantize(&mean_danger))?;
        info!("Ensemble forecast complete: peak risk level {}", risk.max_level());

        Ok(EnsembleForecast {
            risk,
            mean_danger,
            mean_burn_frequency,
            members: config.members,
        })
    }
}

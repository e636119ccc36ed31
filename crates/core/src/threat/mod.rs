//! Population-weighted fire risk forecasting
//!
//! The [`ThreatAggregator`] drives a live [`FireAutomaton`] forward for a fixed
//! horizon, accumulating how often each cell burns and how much population
//! (read from the original [`Landscape`], never from the automaton's grid) is
//! exposed while it does. The exposure map is then blended with the static
//! forest and settlement layers into a quantized [`RiskMap`].
//!
//! A single forecast is one Monte-Carlo realization: repeated calls with
//! different random draws give different maps. [`ThreatAggregator::forecast_ensemble`]
//! averages several independent realizations before quantizing.

mod ensemble;
pub mod normalize;
mod risk_map;

pub use ensemble::{EnsembleConfig, EnsembleForecast};
pub use normalize::{normalize_by_max, quantize, MAX_RISK_LEVEL};
pub use risk_map::RiskMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::automaton::FireAutomaton;
use crate::core_types::{Cell, Grid};
use crate::error::FireRiskError;
use crate::landscape::Landscape;

/// Default number of future steps a forecast simulates
pub const DEFAULT_HORIZON: usize = 100;

/// Relative weights of the three risk components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskWeights {
    /// Realized population-weighted burn exposure
    pub fire: f64,
    /// Presence of forest fuel
    pub forest: f64,
    /// Raw settlement density
    pub city: f64,
}

impl RiskWeights {
    /// Fixed weighting: burn exposure > fuel presence > raw population
    pub const STANDARD: RiskWeights = RiskWeights {
        fire: 1.5,
        forest: 1.0,
        city: 0.75,
    };
}

/// Burn exposure accumulated over a forecast horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exposure {
    /// Sum over steps of the original density of each burning cell
    pub pop_fire_danger: Grid<f64>,
    /// Number of steps each cell spent burning
    pub burn_frequency: Grid<f64>,
}

impl Exposure {
    fn zeroed(width: usize, height: usize) -> Self {
        Self {
            pop_fire_danger: Grid::new(width, height),
            burn_frequency: Grid::new(width, height),
        }
    }
}

/// Result of a single forecast
#[derive(Debug, Clone)]
pub struct Forecast {
    /// Quantized per-cell risk
    pub risk: RiskMap,
    /// Burn ages of the automaton after the last forecast step
    pub fire_age: Grid<u32>,
    /// Exposure accumulated during the forecast
    pub exposure: Exposure,
}

/// Drives an automaton over a horizon and scores the resulting exposure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatAggregator {
    /// Number of future steps to simulate
    pub horizon: usize,
}

impl Default for ThreatAggregator {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
        }
    }
}

impl ThreatAggregator {
    #[must_use]
    pub fn new(horizon: usize) -> Self {
        Self { horizon }
    }

    /// Forecast risk by stepping `automaton` through the horizon
    ///
    /// The automaton is advanced in place; callers that want to keep observing
    /// the fire can continue from where the forecast left it. Neither
    /// `landscape` nor `forest_mask` is modified.
    ///
    /// # Arguments
    ///
    /// * `automaton` - Live automaton, possibly already warmed up
    /// * `landscape` - Original landscape the automaton was built from
    /// * `forest_mask` - Forest presence layer (true = forest)
    ///
    /// # Errors
    ///
    /// Returns [`FireRiskError::ShapeMismatch`] if the landscape or the mask
    /// differs in shape from the automaton's grid.
    pub fn forecast<R: Rng>(
        &self,
        automaton: &mut FireAutomaton<R>,
        landscape: &Landscape,
        forest_mask: &Grid<bool>,
    ) -> Result<Forecast, FireRiskError> {
        check_shapes(automaton.dimensions(), landscape, forest_mask)?;

        info!(
            "Forecasting fire risk over {} steps from step {}",
            self.horizon,
            automaton.steps_taken()
        );

        let exposure = accumulate_exposure(automaton, landscape, self.horizon);
        let total = blend(&exposure, landscape, forest_mask, RiskWeights::STANDARD);
        let risk = RiskMap::new(quantize(&total))?;

        info!(
            "Forecast complete: peak risk level {}, {} cells still burning",
            risk.max_level(),
            automaton.burning_count()
        );

        Ok(Forecast {
            risk,
            fire_age: automaton.fire_age().clone(),
            exposure,
        })
    }
}

/// Fail unless the automaton, landscape and mask all share one shape
fn check_shapes(
    expected: (usize, usize),
    landscape: &Landscape,
    forest_mask: &Grid<bool>,
) -> Result<(), FireRiskError> {
    if landscape.dimensions() != expected {
        return Err(FireRiskError::ShapeMismatch {
            context: "landscape",
            expected,
            found: landscape.dimensions(),
        });
    }
    if forest_mask.dimensions() != expected {
        return Err(FireRiskError::ShapeMismatch {
            context: "forest mask",
            expected,
            found: forest_mask.dimensions(),
        });
    }
    Ok(())
}

/// Step the automaton `horizon` times, accumulating exposure after each step
fn accumulate_exposure<R: Rng>(
    automaton: &mut FireAutomaton<R>,
    landscape: &Landscape,
    horizon: usize,
) -> Exposure {
    let (width, height) = landscape.dimensions();
    let mut exposure = Exposure::zeroed(width, height);

    for _ in 0..horizon {
        automaton.step();
        for (idx, cell) in automaton.grid().iter().enumerate() {
            if *cell == Cell::Fire {
                exposure.pop_fire_danger[idx] += f64::from(landscape.density_at(idx));
                exposure.burn_frequency[idx] += 1.0;
            }
        }
    }

    if horizon > 0 && exposure.pop_fire_danger.max_value().unwrap_or(0.0) <= 0.0 {
        warn!(
            "No populated cell burned within {} steps; fire component is zero",
            horizon
        );
    }
    exposure
}

/// Weighted, max-normalized blend of the three components, in `[0, 1]`
fn blend(
    exposure: &Exposure,
    landscape: &Landscape,
    forest_mask: &Grid<bool>,
    weights: RiskWeights,
) -> Grid<f64> {
    let fire = normalize_by_max(&exposure.pop_fire_danger);
    let forest = normalize_by_max(&forest_mask.map(|&f| if f { 1.0 } else { 0.0 }));
    let city = normalize_by_max(&landscape.cells().map(|c| f64::from(c.density())));

    let mut total = Grid::new(landscape.width(), landscape.height());
    for idx in 0..total.len() {
        total[idx] =
            weights.fire * fire[idx] + weights.forest * forest[idx] + weights.city * city[idx];
    }
    normalize_by_max(&total)
}

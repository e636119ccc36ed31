//! Fire Risk Core Library
//!
//! Stochastic cellular-automaton wildfire spread over a forest/settlement
//! landscape, and a population-weighted risk forecast built on top of it.
//!
//! ## Pipeline
//!
//! - [`Landscape`]: immutable forest/density snapshot from an external generator
//! - [`FireAutomaton`]: ignites one tree and advances the fire with a synchronous,
//!   double-buffered transition rule
//! - [`ThreatAggregator`]: steps the automaton over a horizon, accumulates burn
//!   exposure and blends it with the static layers into a 0–9 [`RiskMap`]
//!
//! ```rust
//! use fire_risk_core::{FireAutomaton, Landscape, SpreadParams, ThreatAggregator};
//!
//! let codes = [-1, -1, 0, 3, -1, 2, 8, 0, -1];
//! let landscape = Landscape::from_codes(3, 3, &codes).unwrap();
//! let mut automaton = FireAutomaton::with_seed(&landscape, SpreadParams::default(), 42).unwrap();
//! automaton.advance(10);
//!
//! let forecast = ThreatAggregator::new(20)
//!     .forecast(&mut automaton, &landscape, &landscape.forest_mask())
//!     .unwrap();
//! assert!(forecast.risk.max_level() <= 9);
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;
pub mod landscape;

// Simulation and scoring
pub mod automaton;
pub mod threat;

// Re-export core types
pub use core_types::{wind_vector, Cell, Grid, WindBias, FIRE_CODE, MAX_DENSITY, TREE_CODE};
pub use error::FireRiskError;
pub use landscape::Landscape;

// Re-export simulation types
pub use automaton::{FireAutomaton, SpreadParams};
pub use threat::{
    EnsembleConfig, EnsembleForecast, Exposure, Forecast, RiskMap, RiskWeights, ThreatAggregator,
    DEFAULT_HORIZON, MAX_RISK_LEVEL,
};

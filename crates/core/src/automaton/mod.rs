//! Stochastic cellular automaton for fire spread
//!
//! The automaton owns the live fire state: a working copy of the landscape in
//! which burning cells are overwritten with [`Cell::Fire`], and a per-cell burn
//! age. Each [`FireAutomaton::step`] is synchronous: spread decisions read the
//! frozen start-of-step buffers and all writes land in back buffers that are
//! swapped in once every burning cell has been evaluated, so a cell ignited
//! during a step cannot itself spread until the next one.
//!
//! # Example
//!
//! ```rust
//! use fire_risk_core::{FireAutomaton, Landscape, SpreadParams};
//!
//! let landscape = Landscape::from_codes(3, 3, &[-1, -1, 0, -1, 2, 0, 0, 0, 5]).unwrap();
//! let mut automaton = FireAutomaton::with_seed(&landscape, SpreadParams::default(), 7).unwrap();
//! assert_eq!(automaton.burning_count(), 1);
//! automaton.advance(5);
//! assert_eq!(automaton.steps_taken(), 5);
//! ```

pub mod params;

pub use params::{
    SpreadParams, DEFAULT_BURN_DURATION, DEFAULT_EMPTY_SPREAD_PROB, DEFAULT_SPREAD_DENSITY_SCALE,
    DEFAULT_TREE_SPREAD_PROB,
};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::core_types::{Cell, Grid};
use crate::error::FireRiskError;
use crate::landscape::Landscape;

/// Fire-spread automaton over a landscape
///
/// The random stream `R` is owned by the automaton and threaded through
/// ignition and every step; two automatons built from identically seeded
/// streams evolve identically.
pub struct FireAutomaton<R: Rng = StdRng> {
    // Ping-pong buffers (read from front, write to back, then swap)
    grid: Grid<Cell>,
    grid_back: Grid<Cell>,
    fire_age: Grid<u32>,
    fire_age_back: Grid<u32>,

    params: SpreadParams,
    // Per-slot wind multipliers in MOORE_OFFSETS order (all 1.0 without wind)
    wind_factors: [f64; 8],
    rng: R,

    ignition_cell: usize,
    steps_taken: u64,
    burning: usize,
}

impl FireAutomaton<StdRng> {
    /// Create an automaton driven by a `StdRng` seeded with `seed`
    ///
    /// # Errors
    ///
    /// See [`FireAutomaton::new`].
    pub fn with_seed(
        landscape: &Landscape,
        params: SpreadParams,
        seed: u64,
    ) -> Result<Self, FireRiskError> {
        Self::new(landscape, params, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FireAutomaton<R> {
    /// Copy the landscape into fresh fire state and ignite one tree
    ///
    /// The ignited tree is chosen uniformly among all tree cells using `rng`.
    ///
    /// # Arguments
    ///
    /// * `landscape` - Initial fuel state; it is copied, never borrowed past construction
    /// * `params` - Spread-rule tunables
    /// * `rng` - Random stream owned by the automaton from now on
    ///
    /// # Errors
    ///
    /// Returns [`FireRiskError::InvalidParameter`] if `params` fail validation and
    /// [`FireRiskError::NoFuel`] if the landscape has no tree cells.
    pub fn new(
        landscape: &Landscape,
        params: SpreadParams,
        mut rng: R,
    ) -> Result<Self, FireRiskError> {
        params.validate()?;

        let trees = landscape.tree_indices();
        if trees.is_empty() {
            return Err(FireRiskError::NoFuel);
        }
        let ignition_cell = trees[rng.random_range(0..trees.len())];

        let (width, height) = landscape.dimensions();
        let mut grid = landscape.cells().clone();
        let mut fire_age = Grid::new(width, height);
        grid[ignition_cell] = Cell::Fire;
        fire_age[ignition_cell] = 1;

        let wind_factors = params
            .wind
            .map_or([1.0; 8], |wind| wind.neighbor_factors());

        let (ix, iy) = grid.coords(ignition_cell);
        info!(
            "Fire automaton initialized: {}x{} grid, {} trees, ignition at ({}, {})",
            width,
            height,
            trees.len(),
            ix,
            iy
        );

        Ok(Self {
            grid_back: grid.clone(),
            fire_age_back: fire_age.clone(),
            grid,
            fire_age,
            params,
            wind_factors,
            rng,
            ignition_cell,
            steps_taken: 0,
            burning: 1,
        })
    }

    /// Advance the fire by one time step
    ///
    /// For every cell burning at the start of the step:
    /// - if it has burned for `burn_duration` steps it clears to [`Cell::Burnt`]
    ///   with age 0 and spreads no further
    /// - otherwise its age grows by one and each in-bounds Moore neighbor gets an
    ///   independent ignition draw; a neighbor already set alight this step is
    ///   not drawn for again
    ///
    /// Newly ignited cells start at age 1.
    pub fn step(&mut self) {
        self.grid_back.copy_from(&self.grid);
        self.fire_age_back.copy_from(&self.fire_age);

        let burn_duration = self.params.burn_duration;
        let mut ignited = 0_usize;
        let mut extinguished = 0_usize;

        for idx in 0..self.grid.len() {
            if !self.grid[idx].is_burning() {
                continue;
            }

            if self.fire_age[idx] >= burn_duration {
                self.grid_back[idx] = Cell::Burnt;
                self.fire_age_back[idx] = 0;
                extinguished += 1;
                continue;
            }
            self.fire_age_back[idx] += 1;

            for (slot, n) in self.grid.neighbor_slots(idx) {
                let target = self.grid[n];
                if target.is_burning() || self.grid_back[n].is_burning() {
                    continue;
                }
                let prob =
                    (self.params.ignition_probability(target) * self.wind_factors[slot]).min(1.0);
                if prob > 0.0 && self.rng.random::<f64>() < prob {
                    self.grid_back[n] = Cell::Fire;
                    self.fire_age_back[n] = 1;
                    ignited += 1;
                }
            }
        }

        std::mem::swap(&mut self.grid, &mut self.grid_back);
        std::mem::swap(&mut self.fire_age, &mut self.fire_age_back);

        self.steps_taken += 1;
        self.burning = self.burning + ignited - extinguished;

        debug!(
            "Step {}: {} burning, {} ignited, {} extinguished",
            self.steps_taken, self.burning, ignited, extinguished
        );
    }

    /// Run `steps` consecutive steps
    pub fn advance(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Live cell states (read-only snapshot for renderers and the aggregator)
    #[must_use]
    pub fn grid(&self) -> &Grid<Cell> {
        &self.grid
    }

    /// Live burn ages; non-zero exactly where the grid is burning
    #[must_use]
    pub fn fire_age(&self) -> &Grid<u32> {
        &self.fire_age
    }

    /// Live grid exported as integer codes (`-1` tree, `100` fire, density otherwise)
    #[must_use]
    pub fn grid_codes(&self) -> Vec<i32> {
        self.grid.iter().map(|c| c.code()).collect()
    }

    #[must_use]
    pub fn params(&self) -> &SpreadParams {
        &self.params
    }

    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    /// `(x, y)` of the tree ignited at construction
    #[must_use]
    pub fn ignition_cell(&self) -> (usize, usize) {
        self.grid.coords(self.ignition_cell)
    }

    /// Number of steps run since construction
    #[must_use]
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Number of cells currently burning
    #[must_use]
    pub fn burning_count(&self) -> usize {
        self.burning
    }

    /// True once no cell is burning; further steps change nothing
    #[must_use]
    pub fn is_extinct(&self) -> bool {
        self.burning == 0
    }
}

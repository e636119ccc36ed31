//! Shared fixtures for integration tests
#![allow(dead_code)]

use fire_risk_core::{Cell, FireAutomaton, Grid, Landscape};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Route `tracing` output through the test harness (filter with `RUST_LOG`)
#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Square landscape of density-0 land with trees at the given `(x, y)` cells
pub fn land_with_trees(size: usize, trees: &[(usize, usize)]) -> Landscape {
    let mut cells = Grid::filled(size, size, Cell::Land(0));
    for &(x, y) in trees {
        cells.set(x, y, Cell::Tree);
    }
    Landscape::new(cells).unwrap()
}

/// Random square landscape: each cell is a tree with probability `tree_ratio`,
/// otherwise land with a uniform density in `0..=8`
pub fn random_landscape(size: usize, tree_ratio: f64, seed: u64) -> Landscape {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut codes: Vec<i32> = (0..size * size)
        .map(|_| {
            if rng.random::<f64>() < tree_ratio {
                -1
            } else {
                rng.random_range(0..=8)
            }
        })
        .collect();
    // Always leave at least one tree to ignite
    codes[0] = -1;
    Landscape::from_codes(size, size, &codes).unwrap()
}

/// Burn age is non-zero exactly where the grid burns, and never exceeds the burn duration
pub fn assert_fire_invariants<R: Rng>(automaton: &FireAutomaton<R>) {
    let burn_duration = automaton.params().burn_duration;
    let ages = automaton.fire_age();
    for (idx, cell) in automaton.grid().iter().enumerate() {
        let age = ages[idx];
        assert_eq!(
            age > 0,
            cell.is_burning(),
            "cell {idx}: age {age} disagrees with state {cell:?}"
        );
        assert!(
            age <= burn_duration,
            "cell {idx}: age {age} exceeds burn duration {burn_duration}"
        );
    }
    let burning = automaton.grid().iter().filter(|c| c.is_burning()).count();
    assert_eq!(burning, automaton.burning_count());
}

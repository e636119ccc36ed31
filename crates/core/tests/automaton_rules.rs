//! Transition-rule tests for the fire automaton
//!
//! Grid coordinates are `(x, y)` = (column, row).

mod common;

use common::{assert_fire_invariants, land_with_trees, random_landscape};
use fire_risk_core::{Cell, FireAutomaton, Landscape, SpreadParams};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn no_land_spread() -> SpreadParams {
    SpreadParams {
        tree_spread_prob: 1.0,
        empty_spread_prob: 0.0,
        ..SpreadParams::default()
    }
}

/// Seed whose ignition lands on `(x, y)`
fn automaton_igniting_at(
    landscape: &Landscape,
    params: SpreadParams,
    at: (usize, usize),
) -> FireAutomaton<StdRng> {
    (0..1000)
        .map(|seed| FireAutomaton::with_seed(landscape, params, seed).unwrap())
        .find(|a| a.ignition_cell() == at)
        .expect("no seed ignites the requested cell")
}

#[test]
fn test_invariants_hold_every_step() {
    for seed in 0..4 {
        let landscape = random_landscape(40, 0.5, seed);
        let mut automaton =
            FireAutomaton::with_seed(&landscape, SpreadParams::default(), seed).unwrap();
        assert_fire_invariants(&automaton);
        for _ in 0..60 {
            automaton.step();
            assert_fire_invariants(&automaton);
        }
    }
}

#[test]
fn test_fresh_automaton_has_one_fire_on_a_tree() {
    let landscape = random_landscape(25, 0.3, 8);
    for seed in 0..10 {
        let automaton =
            FireAutomaton::with_seed(&landscape, SpreadParams::default(), seed).unwrap();
        let fires: Vec<usize> = automaton
            .grid()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_burning())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(fires.len(), 1);
        assert_eq!(landscape.cells()[fires[0]], Cell::Tree);
    }
}

#[test]
fn test_ignition_is_uniform_over_trees() {
    let trees = [(0, 0), (4, 0), (2, 2), (0, 4)];
    let landscape = land_with_trees(5, &trees);
    let draws = 400;
    let mut counts = [0usize; 4];

    for seed in 0..draws {
        let automaton = FireAutomaton::with_seed(&landscape, no_land_spread(), seed).unwrap();
        let ignition = automaton.ignition_cell();
        let slot = trees
            .iter()
            .position(|&t| t == ignition)
            .unwrap_or_else(|| panic!("seed {seed} ignited non-tree cell {ignition:?}"));
        counts[slot] += 1;
    }

    // Expected 100 each; 50 is almost six standard deviations below
    for (tree, &count) in trees.iter().zip(&counts) {
        assert!(count > 50, "tree {tree:?} ignited {count} of {draws} times");
    }
    assert_eq!(counts.iter().sum::<usize>(), 400);
}

#[test]
fn test_identical_seeds_evolve_identically() {
    let landscape = random_landscape(30, 0.55, 3);
    let mut a = FireAutomaton::with_seed(&landscape, SpreadParams::default(), 99).unwrap();
    let mut b = FireAutomaton::new(&landscape, SpreadParams::default(), StdRng::seed_from_u64(99))
        .unwrap();
    for _ in 0..40 {
        a.step();
        b.step();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.fire_age(), b.fire_age());
    }
}

#[test]
fn test_cells_away_from_fire_never_change() {
    // Fuel only in the first column; land never catches, so columns 2.. are never adjacent to fire
    let size = 10;
    let mut codes = vec![5; size * size];
    for y in 0..size {
        codes[y * size] = -1;
    }
    let landscape = Landscape::from_codes(size, size, &codes).unwrap();
    let mut automaton = FireAutomaton::with_seed(&landscape, no_land_spread(), 17).unwrap();

    for _ in 0..50 {
        automaton.step();
        for y in 0..size {
            for x in 2..size {
                assert_eq!(*automaton.grid().get(x, y), Cell::Land(5));
            }
        }
    }
}

#[test]
fn test_extinguish_law() {
    let landscape = random_landscape(30, 0.6, 21);
    let mut automaton = FireAutomaton::with_seed(&landscape, SpreadParams::default(), 21).unwrap();
    let burn_duration = automaton.params().burn_duration;

    for _ in 0..80 {
        let expiring: Vec<usize> = automaton
            .fire_age()
            .iter()
            .enumerate()
            .filter(|&(_, &age)| age == burn_duration)
            .map(|(i, _)| i)
            .collect();
        automaton.step();
        for idx in expiring {
            assert_eq!(automaton.grid()[idx], Cell::Burnt);
            assert_eq!(automaton.grid()[idx].code(), 0);
            assert_eq!(automaton.fire_age()[idx], 0);
        }
    }
}

#[test]
fn test_lone_tree_burns_for_full_duration() {
    let landscape = land_with_trees(5, &[(2, 2)]);
    let mut automaton = FireAutomaton::with_seed(&landscape, no_land_spread(), 0).unwrap();

    for expected_age in 2..=10 {
        automaton.step();
        assert_eq!(*automaton.grid().get(2, 2), Cell::Fire);
        assert_eq!(*automaton.fire_age().get(2, 2), expected_age);
    }
    automaton.step();
    assert_eq!(*automaton.grid().get(2, 2), Cell::Burnt);
    assert_eq!(*automaton.fire_age().get(2, 2), 0);
    assert!(automaton.is_extinct());
}

#[test]
fn test_scenario_lone_tree_does_not_spread_to_land() {
    let landscape = land_with_trees(5, &[(2, 2)]);
    let mut automaton = FireAutomaton::with_seed(&landscape, no_land_spread(), 1).unwrap();
    assert_eq!(automaton.ignition_cell(), (2, 2));

    automaton.step();

    assert_eq!(*automaton.grid().get(2, 2), Cell::Fire);
    assert_eq!(*automaton.fire_age().get(2, 2), 2);
    for y in 1..=3 {
        for x in 1..=3 {
            if (x, y) != (2, 2) {
                assert_eq!(*automaton.grid().get(x, y), Cell::Land(0));
                assert_eq!(*automaton.fire_age().get(x, y), 0);
            }
        }
    }
}

#[test]
fn test_scenario_adjacent_tree_ignites_with_age_one() {
    let landscape = land_with_trees(5, &[(2, 2), (1, 2)]);
    let mut automaton = automaton_igniting_at(&landscape, no_land_spread(), (2, 2));

    automaton.step();

    assert_eq!(*automaton.grid().get(1, 2), Cell::Fire);
    assert_eq!(*automaton.fire_age().get(1, 2), 1);
    assert_eq!(*automaton.fire_age().get(2, 2), 2);
}

#[test]
fn test_scenario_single_step_burn_duration() {
    let landscape = land_with_trees(5, &[(2, 2)]);
    let params = SpreadParams {
        burn_duration: 1,
        ..no_land_spread()
    };
    let mut automaton = FireAutomaton::with_seed(&landscape, params, 2).unwrap();
    assert_eq!(*automaton.fire_age().get(2, 2), 1);

    automaton.step();

    assert_eq!(automaton.grid().get(2, 2).code(), 0);
    assert_eq!(*automaton.fire_age().get(2, 2), 0);
}

#[test]
fn test_burning_discards_density_but_landscape_keeps_it() {
    let landscape = Landscape::from_codes(2, 1, &[-1, 3]).unwrap();
    let params = SpreadParams {
        empty_spread_prob: 1.0,
        burn_duration: 2,
        ..SpreadParams::default()
    };
    let mut automaton = FireAutomaton::with_seed(&landscape, params, 6).unwrap();

    automaton.advance(4);

    assert_eq!(automaton.grid()[1], Cell::Burnt);
    assert_eq!(automaton.grid()[1].density(), 0);
    assert_eq!(automaton.grid_codes(), vec![0, 0]);
    assert_eq!(landscape.density_at(1), 3);
    assert_eq!(landscape.to_codes(), vec![-1, 3]);
}

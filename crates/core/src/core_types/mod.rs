//! Core types shared by the automaton and the threat aggregator

pub mod cell;
pub mod grid;
pub mod wind;

pub use cell::{Cell, FIRE_CODE, MAX_DENSITY, TREE_CODE};
pub use grid::{Grid, MOORE_OFFSETS};
pub use wind::{wind_vector, Vec2, WindBias};

//! LAWNLINE simulation engine.
//!
//! Owns the hecs ECS world, runs all game systems, processes player commands,
//! and produces `GameStateSnapshot`s. Completely headless (no presentation
//! dependency), enabling deterministic testing.

pub mod economy;
pub mod engine;
pub mod grid;
pub mod systems;
pub mod timers;
pub mod world_setup;

pub use engine::{ClickOutcome, SimConfig, SimulationEngine};
pub use lawnline_core as core;

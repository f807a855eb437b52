//! LAWNLINE headless runner.
//!
//! Wires the simulation engine to a fixed-rate game loop thread, loads
//! configuration and drives demo runs with a simple autopilot.

pub mod autopilot;
pub mod config;
pub mod game_loop;
pub mod state;

pub use lawnline_core as core;

//! Wave scheduling for LAWNLINE.
//!
//! Implements the wave/difficulty state machine (fixed opening waves,
//! then an escalating endless phase) and the attacker composition draw.

pub mod fsm;
pub mod ramp;

pub use lawnline_core as core;
pub use fsm::{WaveDecision, WaveState, WaveTransition};

#[cfg(test)]
mod tests;

//! Wave scheduler finite state machine.
//!
//! `evaluate` is called each time the scheduler's deferred callback fires.
//! It spawns at most one attacker and tells the caller how long to wait
//! before the next callback. No ECS dependency; operates on plain data.

use rand::Rng;
use serde::{Deserialize, Serialize};

use lawnline_core::constants::*;
use lawnline_core::enums::{AttackerKind, WavePhase};

use crate::ramp::{draw_attacker, endless_interval_ms};

/// Persistent scheduler state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveState {
    pub phase: WavePhase,
    /// Current wave number; keeps counting past the fixed waves.
    pub wave: u32,
    /// Attackers spawned in the current fixed wave.
    pub spawned: u32,
    /// Kills credited since the current wave started.
    pub killed: u32,
    /// Value the endless base interval is reset to on entry.
    pub initial_interval_ms: u64,
    /// Endless base interval before the time ramp is applied.
    pub base_interval_ms: u64,
    /// Interval chosen by the most recent evaluation.
    pub current_interval_ms: u64,
}

/// Phase changes reported by an evaluation, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveTransition {
    /// A fixed wave was cleared and the given wave begins.
    WaveAdvanced(u32),
    /// The last fixed wave was cleared.
    Transitioning,
    /// The endless phase began with the base interval reset.
    EndlessStarted,
}

/// Output of one scheduler callback.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveDecision {
    /// Attacker to spawn now, if any. The caller picks the lane.
    pub spawn: Option<AttackerKind>,
    /// Delay until the next callback.
    pub next_delay_ms: u64,
    pub transitions: Vec<WaveTransition>,
}

impl Default for WaveState {
    fn default() -> Self {
        Self::new(ENDLESS_BASE_INTERVAL_MS)
    }
}

impl WaveState {
    pub fn new(base_interval_ms: u64) -> Self {
        Self {
            phase: WavePhase::EarlyWave(1),
            wave: 1,
            spawned: 0,
            killed: 0,
            initial_interval_ms: base_interval_ms,
            base_interval_ms,
            current_interval_ms: base_interval_ms,
        }
    }

    /// Spawn target of the current fixed wave (zero once endless).
    pub fn target(&self) -> u32 {
        match self.phase {
            WavePhase::EarlyWave(n) => n,
            WavePhase::Transitioning | WavePhase::Endless => 0,
        }
    }

    pub fn in_endless_mode(&self) -> bool {
        matches!(self.phase, WavePhase::Endless)
    }

    /// Credit one kill. Callers guarantee each attacker is credited once.
    pub fn record_kill(&mut self) {
        self.killed += 1;
    }
}

/// Run one scheduler callback at `elapsed_ms` since game start.
///
/// Immediate transitions (a wave cleared while polling, the hand-off to
/// endless) are resolved within the same call, as is the first spawn of
/// the new phase.
pub fn evaluate<R: Rng>(state: &mut WaveState, elapsed_ms: u64, rng: &mut R) -> WaveDecision {
    let mut transitions = Vec::new();

    loop {
        match state.phase {
            WavePhase::EarlyWave(n) => {
                if state.spawned < n {
                    state.spawned += 1;
                    let interval = early_wave_interval_ms(n);
                    state.current_interval_ms = interval;
                    return WaveDecision {
                        spawn: Some(draw_attacker(state.wave, rng)),
                        next_delay_ms: interval,
                        transitions,
                    };
                }

                if state.killed < n {
                    return WaveDecision {
                        spawn: None,
                        next_delay_ms: WAVE_POLL_INTERVAL_MS,
                        transitions,
                    };
                }

                state.wave += 1;
                state.spawned = 0;
                state.killed = 0;
                if n >= EARLY_WAVE_COUNT {
                    state.phase = WavePhase::Transitioning;
                    transitions.push(WaveTransition::Transitioning);
                } else {
                    state.phase = WavePhase::EarlyWave(n + 1);
                    transitions.push(WaveTransition::WaveAdvanced(n + 1));
                }
            }
            WavePhase::Transitioning => {
                state.base_interval_ms = state.initial_interval_ms;
                state.current_interval_ms = state.base_interval_ms;
                state.phase = WavePhase::Endless;
                transitions.push(WaveTransition::EndlessStarted);
            }
            WavePhase::Endless => {
                let interval = endless_interval_ms(state.base_interval_ms, elapsed_ms);
                state.current_interval_ms = interval;
                return WaveDecision {
                    spawn: Some(draw_attacker(state.wave, rng)),
                    next_delay_ms: interval,
                    transitions,
                };
            }
        }
    }
}

fn early_wave_interval_ms(wave: u32) -> u64 {
    wave.checked_sub(1)
        .and_then(|i| EARLY_WAVE_INTERVALS_MS.get(i as usize))
        .copied()
        .unwrap_or(WAVE_POLL_INTERVAL_MS)
}

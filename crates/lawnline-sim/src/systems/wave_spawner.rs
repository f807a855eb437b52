//! Wave spawning system: fires the deferred wave callback and spawns attackers.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use lawnline_core::events::SimEvent;
use lawnline_core::types::SimTime;
use lawnline_waves::fsm::{self, WaveState, WaveTransition};

use crate::grid::LaneGrid;
use crate::timers::DeferredTimer;
use crate::world_setup;

/// Run the wave callback if it is due, then re-arm it.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    grid: &LaneGrid,
    waves: &mut WaveState,
    timer: &mut DeferredTimer,
    rng: &mut ChaCha8Rng,
    time: &SimTime,
    next_id: &mut u32,
    events: &mut Vec<SimEvent>,
) {
    if !timer.fire_if_due(time.now_ms) {
        return;
    }

    let decision = fsm::evaluate(waves, time.elapsed_ms(), rng);

    for transition in &decision.transitions {
        match transition {
            WaveTransition::WaveAdvanced(wave) => {
                info!(wave = *wave, "wave advanced");
                events.push(SimEvent::WaveAdvanced { wave: *wave });
            }
            WaveTransition::Transitioning => {
                info!("early waves cleared, switching to endless mode");
            }
            WaveTransition::EndlessStarted => {
                info!(base_interval_ms = waves.base_interval_ms, "endless mode started");
                events.push(SimEvent::EndlessStarted);
            }
        }
    }

    if let Some(kind) = decision.spawn {
        let row = rng.gen_range(0..grid.rows());
        let id = *next_id;
        *next_id += 1;
        world_setup::spawn_attacker(world, id, kind, row, grid.width());
        debug!(id, ?kind, row, wave = waves.wave, "attacker spawned");
        events.push(SimEvent::AttackerSpawned { id, kind, row });
    }

    timer.arm(time.now_ms + decision.next_delay_ms);
}

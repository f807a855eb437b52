//! Ambient resource drops at random intervals.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use lawnline_core::constants::*;
use lawnline_core::enums::PickupSource;
use lawnline_core::events::SimEvent;
use lawnline_core::types::Position;

use crate::timers::DeferredTimer;
use crate::world_setup;

/// Random delay until the next ambient drop.
pub fn next_delay_ms(rng: &mut ChaCha8Rng) -> u64 {
    rng.gen_range(AMBIENT_DROP_MIN_DELAY_MS..=AMBIENT_DROP_MAX_DELAY_MS)
}

/// Drop a pickup somewhere above the field if the drop timer is due.
pub fn run(
    world: &mut World,
    timer: &mut DeferredTimer,
    rng: &mut ChaCha8Rng,
    field_width: f64,
    now_ms: u64,
    next_id: &mut u32,
    events: &mut Vec<SimEvent>,
) {
    if !timer.fire_if_due(now_ms) {
        return;
    }

    let max_x = (field_width - AMBIENT_DROP_MARGIN).max(AMBIENT_DROP_MARGIN + f64::EPSILON);
    let x = rng.gen_range(AMBIENT_DROP_MARGIN..max_x);
    let y = AMBIENT_DROP_MIN_Y + rng.gen::<f64>() * AMBIENT_DROP_Y_SPAN;

    let id = *next_id;
    *next_id += 1;
    world_setup::spawn_pickup(world, id, PickupSource::Ambient, Position::new(x, y));
    debug!(id, x, y, "ambient pickup dropped");
    events.push(SimEvent::PickupSpawned {
        id,
        source: PickupSource::Ambient,
    });

    timer.arm(now_ms + next_delay_ms(rng));
}

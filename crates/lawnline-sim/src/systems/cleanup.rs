//! Cleanup system: reaps dead attackers, dead defenders, spent projectiles
//! and finished pickups.

use hecs::{Entity, World};

use lawnline_core::components::{Attacker, Defender, Pickup, Projectile};
use lawnline_waves::fsm::WaveState;

/// Remove finished entities, crediting each attacker death to the wave
/// kill count exactly once. Uses a pre-allocated buffer to avoid per-tick
/// allocation.
pub fn run(world: &mut World, waves: &mut WaveState, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, attacker) in world.query_mut::<&mut Attacker>() {
        if attacker.dead {
            if !attacker.counted {
                attacker.counted = true;
                waves.record_kill();
            }
            despawn_buffer.push(entity);
        }
    }

    for (entity, defender) in world.query_mut::<&Defender>() {
        if !defender.alive {
            despawn_buffer.push(entity);
        }
    }

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.spent {
            despawn_buffer.push(entity);
        }
    }

    for (entity, pickup) in world.query_mut::<&Pickup>() {
        if !pickup.phase.is_collectable() {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

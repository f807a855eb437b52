//! Pickup lifecycle: falling, resting, fading, expiry.

use hecs::World;

use lawnline_core::components::Pickup;
use lawnline_core::constants::*;
use lawnline_core::enums::PickupPhase;
use lawnline_core::events::SimEvent;
use lawnline_core::types::Position;

/// Advance every pickup by one frame. Expired and collected pickups are
/// removed by the cleanup system.
pub fn run(world: &mut World, now_ms: u64, events: &mut Vec<SimEvent>) {
    for (_entity, (pickup, pos)) in world.query_mut::<(&mut Pickup, &mut Position)>() {
        match pickup.phase {
            PickupPhase::Falling => {
                pos.y += PICKUP_FALL_SPEED_PER_TICK;
                if pos.y >= pickup.target_y {
                    pos.y = pickup.target_y;
                    pickup.phase = PickupPhase::Resting;
                    pickup.landed_at_ms = Some(now_ms);
                }
            }
            PickupPhase::Resting | PickupPhase::Fading => {
                let landed = pickup.landed_at_ms.unwrap_or(now_ms);
                let since_landing = now_ms.saturating_sub(landed);
                if since_landing >= PICKUP_REST_MS + PICKUP_FADE_MS {
                    pickup.phase = PickupPhase::Expired;
                    pickup.opacity = 0.0;
                    events.push(SimEvent::PickupExpired { id: pickup.id });
                } else if since_landing >= PICKUP_REST_MS {
                    pickup.phase = PickupPhase::Fading;
                    let fading = (since_landing - PICKUP_REST_MS) as f64 / PICKUP_FADE_MS as f64;
                    pickup.opacity = (1.0 - fading).clamp(0.0, 1.0);
                }
            }
            PickupPhase::Expired | PickupPhase::Collected => {}
        }
    }
}

/// Collect a pickup in place, returning its value if it was collectable.
pub fn collect(pickup: &mut Pickup) -> Option<u32> {
    if !pickup.phase.is_collectable() {
        return None;
    }
    pickup.phase = PickupPhase::Collected;
    Some(pickup.value)
}

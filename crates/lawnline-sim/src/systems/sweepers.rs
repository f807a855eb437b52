//! Sweeper motion: entry animation, the one-way run down the lane, and contact kills.

use hecs::World;

use lawnline_core::components::Sweeper;
use lawnline_core::constants::*;
use lawnline_core::enums::SweeperPhase;
use lawnline_core::events::SimEvent;
use lawnline_core::types::Position;

use super::combat;

/// Advance every sweeper by one frame, then resolve sweeper contact.
pub fn run(world: &mut World, field_width: f64, events: &mut Vec<SimEvent>) {
    for (_entity, (sweeper, pos)) in world.query_mut::<(&mut Sweeper, &mut Position)>() {
        match sweeper.phase {
            SweeperPhase::Entering => {
                pos.x += SWEEPER_ENTRY_SPEED_PER_TICK;
                if pos.x >= SWEEPER_REST_X {
                    pos.x = SWEEPER_REST_X;
                    sweeper.phase = SweeperPhase::Idle;
                }
            }
            SweeperPhase::Active => {
                pos.x += sweeper.speed;
                if pos.x > field_width {
                    sweeper.phase = SweeperPhase::Spent;
                }
            }
            SweeperPhase::Idle | SweeperPhase::Spent => {}
        }
    }

    combat::sweep_lanes(world, events);
}

//! Attacker advancement and melee.

use hecs::{Entity, World};

use lawnline_core::components::{Attacker, Defender};
use lawnline_core::constants::*;
use lawnline_core::events::SimEvent;
use lawnline_core::types::Position;

use super::combat;
use crate::grid::LaneGrid;

/// Lane of the first live attacker that reached the left edge, if any.
pub fn breached_row(world: &World) -> Option<usize> {
    world
        .query::<(&Attacker, &Position)>()
        .iter()
        .filter(|(_, (a, pos))| !a.dead && pos.x <= 0.0)
        .map(|(_, (a, _))| a.row)
        .min()
}

/// First live defender in `row`, in column order, whose contact band
/// contains `x`.
pub fn melee_target(world: &World, grid: &LaneGrid, row: usize, x: f64) -> Option<Entity> {
    grid.row_occupants(row).find_map(|(cell, entity)| {
        let alive = world
            .get::<&Defender>(entity)
            .map(|d| d.alive)
            .unwrap_or(false);
        let centre = cell.centre_x();
        (alive && x >= centre - MELEE_CONTACT_BAND && x <= centre).then_some(entity)
    })
}

/// Each live attacker either chews on the defender in front of it or walks
/// one step left. Slowed attackers do both at half rate.
pub fn run(world: &mut World, grid: &mut LaneGrid, now_ms: u64, events: &mut Vec<SimEvent>) {
    let walkers: Vec<(Entity, usize, f64, f64)> = world
        .query::<(&Attacker, &Position)>()
        .iter()
        .filter(|(_, (a, _))| !a.dead)
        .map(|(e, (a, pos))| {
            let factor = if a.is_slowed(now_ms) { SLOW_FACTOR } else { 1.0 };
            (e, a.row, pos.x, factor)
        })
        .collect();

    for (entity, row, x, factor) in walkers {
        if let Some(defender) = melee_target(world, grid, row, x) {
            combat::damage_defender(
                world,
                grid,
                defender,
                ATTACKER_MELEE_DAMAGE_PER_TICK * factor,
                events,
            );
            continue;
        }
        if let Ok((attacker, pos)) = world.query_one_mut::<(&Attacker, &mut Position)>(entity) {
            pos.x -= attacker.speed * factor;
        }
    }
}

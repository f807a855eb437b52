//! Defender actions: firing, resource yields and bomb fuses.
//!
//! The query only decides what happens. Spawns and kills are applied after
//! it closes so the world is never mutated while borrowed.

use hecs::{Entity, World};
use tracing::debug;

use lawnline_core::components::{Attacker, Defender, DefenderAction};
use lawnline_core::constants::*;
use lawnline_core::enums::*;
use lawnline_core::events::SimEvent;
use lawnline_core::types::Position;

use super::combat;
use crate::grid::LaneGrid;
use crate::world_setup;

/// A live attacker as seen by target acquisition.
#[derive(Debug, Clone, Copy)]
struct Target {
    row: usize,
    position: Position,
}

/// Side effects decided while iterating defenders.
enum Action {
    Fire {
        kind: DefenderKind,
        row: usize,
        anchor: Position,
        target: Position,
    },
    Yield {
        anchor: Position,
    },
    Detonate {
        row: usize,
        col: usize,
    },
    Retire {
        entity: Entity,
    },
}

/// Whether `target` counts as being ahead of a defender at `anchor` in `row`.
fn is_ahead(target: &Target, row: usize, anchor: &Position) -> bool {
    target.row == row
        && target.position.x + ATTACKER_WIDTH > TARGET_VISIBLE_EDGE
        && target.position.x > anchor.x
}

/// Run every live defender's action for this tick.
pub fn run(
    world: &mut World,
    grid: &mut LaneGrid,
    now_ms: u64,
    next_id: &mut u32,
    events: &mut Vec<SimEvent>,
) {
    let targets: Vec<Target> = world
        .query::<(&Attacker, &Position)>()
        .iter()
        .filter(|(_, (attacker, _))| !attacker.dead)
        .map(|(_, (attacker, pos))| Target {
            row: attacker.row,
            position: *pos,
        })
        .collect();

    let mut actions = Vec::new();

    for (entity, (defender, anchor)) in world.query_mut::<(&mut Defender, &Position)>() {
        if !defender.alive {
            continue;
        }
        let row = defender.cell.row;

        match &mut defender.action {
            DefenderAction::Fire { cooldown_ticks } => {
                if *cooldown_ticks > 0 {
                    *cooldown_ticks -= 1;
                    continue;
                }
                let mut ahead = targets.iter().filter(|t| is_ahead(t, row, anchor));
                let Some(first) = ahead.next() else {
                    continue;
                };
                let nearest = ahead.fold(*first, |best, t| {
                    if t.position.x < best.position.x {
                        *t
                    } else {
                        best
                    }
                });
                *cooldown_ticks = defender_profile(defender.kind)
                    .fire_interval_ticks
                    .unwrap_or_default();
                actions.push(Action::Fire {
                    kind: defender.kind,
                    row,
                    anchor: *anchor,
                    target: nearest.position,
                });
            }
            DefenderAction::Produce { last_yield_ms } => {
                if now_ms.saturating_sub(*last_yield_ms) >= PRODUCER_YIELD_INTERVAL_MS {
                    *last_yield_ms = now_ms;
                    actions.push(Action::Yield { anchor: *anchor });
                }
            }
            DefenderAction::Block => {}
            DefenderAction::Fuse {
                armed_at_ms,
                detonated_at_ms,
            } => match *detonated_at_ms {
                None if now_ms.saturating_sub(*armed_at_ms) >= BOMB_FUSE_MS => {
                    *detonated_at_ms = Some(now_ms);
                    actions.push(Action::Detonate {
                        row,
                        col: defender.cell.col,
                    });
                }
                Some(at) if now_ms.saturating_sub(at) >= BOMB_LINGER_MS => {
                    actions.push(Action::Retire { entity });
                }
                _ => {}
            },
        }
    }

    for action in actions {
        match action {
            Action::Fire {
                kind,
                row,
                anchor,
                target,
            } => {
                let projectile = match kind {
                    DefenderKind::IceShooter => {
                        world_setup::spawn_pea(world, ProjectileKind::IcePea, row, anchor);
                        ProjectileKind::IcePea
                    }
                    DefenderKind::MelonShooter => {
                        world_setup::spawn_melon(world, row, anchor, target);
                        ProjectileKind::Melon
                    }
                    _ => {
                        world_setup::spawn_pea(world, ProjectileKind::Pea, row, anchor);
                        ProjectileKind::Pea
                    }
                };
                events.push(SimEvent::ProjectileFired {
                    kind: projectile,
                    row,
                });
            }
            Action::Yield { anchor } => {
                let id = *next_id;
                *next_id += 1;
                let at = Position::new(anchor.x + 0.2, anchor.y - PRODUCER_DROP_RISE);
                world_setup::spawn_pickup(world, id, PickupSource::Producer, at);
                debug!(id, "producer yielded a pickup");
                events.push(SimEvent::PickupSpawned {
                    id,
                    source: PickupSource::Producer,
                });
            }
            Action::Detonate { row, col } => {
                let killed = combat::detonate_row(world, row, events);
                debug!(row, col, killed, "bomb detonated");
                events.push(SimEvent::BombDetonated { row, col });
            }
            Action::Retire { entity } => {
                combat::retire_defender(world, grid, entity, events);
            }
        }
    }
}

//! Combat resolution: projectile hits, melee damage, bombs and sweepers.
//!
//! All kills of attackers and defenders go through this module so that the
//! `dead`/`alive` flags flip exactly once per entity.

use hecs::{Entity, World};
use tracing::debug;

use lawnline_core::components::{Attacker, Defender, Health, Projectile, Sweeper};
use lawnline_core::constants::*;
use lawnline_core::enums::{ProjectileKind, StatusTag, SweeperPhase};
use lawnline_core::events::SimEvent;
use lawnline_core::types::Position;

use crate::grid::LaneGrid;

/// Apply damage to an attacker. Returns true if this hit killed it.
pub fn damage_attacker(
    attacker: &mut Attacker,
    health: &mut Health,
    amount: f64,
    events: &mut Vec<SimEvent>,
) -> bool {
    if attacker.dead {
        return false;
    }
    health.current -= amount;
    if health.is_depleted() {
        attacker.dead = true;
        debug!(id = attacker.id, row = attacker.row, "attacker killed");
        events.push(SimEvent::AttackerKilled {
            id: attacker.id,
            row: attacker.row,
        });
        return true;
    }
    false
}

/// Kill an attacker outright.
pub fn kill_attacker(
    attacker: &mut Attacker,
    health: &mut Health,
    events: &mut Vec<SimEvent>,
) -> bool {
    let remaining = health.current.max(0.0);
    damage_attacker(attacker, health, remaining, events)
}

/// Whether a projectile at `pos` overlaps an attacker standing at `target`.
pub fn projectile_overlaps(kind: ProjectileKind, pos: &Position, target: &Position) -> bool {
    match kind {
        ProjectileKind::Melon => {
            pos.x < target.x + ATTACKER_WIDTH
                && pos.x + MELON_SIZE > target.x
                && pos.y > target.y - ATTACKER_HEIGHT
                && pos.y - MELON_SIZE < target.y
        }
        ProjectileKind::Pea | ProjectileKind::IcePea => {
            pos.x + PEA_RADIUS > target.x && pos.x - PEA_RADIUS < target.x + ATTACKER_WIDTH
        }
    }
}

/// Resolve projectile hits. Each projectile damages at most the first
/// overlapping live attacker in its lane and is then spent.
pub fn resolve_projectiles(world: &mut World, now_ms: u64, events: &mut Vec<SimEvent>) {
    let projectiles: Vec<(Entity, Projectile, Position)> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .filter(|(_, (p, _))| !p.spent)
        .map(|(e, (p, pos))| (e, p.clone(), *pos))
        .collect();

    let mut targets: Vec<(Entity, usize, Position)> = world
        .query::<(&Attacker, &Position)>()
        .iter()
        .filter(|(_, (a, _))| !a.dead)
        .map(|(e, (a, pos))| (e, a.row, *pos))
        .collect();

    for (projectile_entity, projectile, pos) in projectiles {
        let hit = targets.iter().position(|(_, row, target)| {
            *row == projectile.row && projectile_overlaps(projectile.kind, &pos, target)
        });
        let Some(index) = hit else {
            continue;
        };
        let target_entity = targets[index].0;

        if let Ok((attacker, health)) =
            world.query_one_mut::<(&mut Attacker, &mut Health)>(target_entity)
        {
            if projectile.status == StatusTag::Slow {
                attacker.slow_until_ms = now_ms + SLOW_DURATION_MS;
            }
            if damage_attacker(attacker, health, projectile.damage, events) {
                targets.swap_remove(index);
            }
        }
        if let Ok(p) = world.query_one_mut::<&mut Projectile>(projectile_entity) {
            p.spent = true;
        }
    }
}

/// Kill every live attacker in a lane. Returns how many died.
pub fn detonate_row(world: &mut World, row: usize, events: &mut Vec<SimEvent>) -> usize {
    let mut killed = 0;
    for (_entity, (attacker, health)) in world.query_mut::<(&mut Attacker, &mut Health)>() {
        if attacker.row == row && kill_attacker(attacker, health, events) {
            killed += 1;
        }
    }
    killed
}

/// Switch idle sweepers to active in lanes where a live attacker has
/// reached the trigger line.
pub fn trigger_sweepers(world: &mut World, events: &mut Vec<SimEvent>) {
    let breached: Vec<usize> = world
        .query::<(&Attacker, &Position)>()
        .iter()
        .filter(|(_, (a, pos))| !a.dead && pos.x < SWEEPER_TRIGGER_X)
        .map(|(_, (a, _))| a.row)
        .collect();
    if breached.is_empty() {
        return;
    }

    for (_entity, sweeper) in world.query_mut::<&mut Sweeper>() {
        if sweeper.phase == SweeperPhase::Idle && breached.contains(&sweeper.row) {
            sweeper.phase = SweeperPhase::Active;
            sweeper.speed = SWEEPER_SPEED_PER_TICK;
            debug!(row = sweeper.row, "sweeper activated");
            events.push(SimEvent::SweeperActivated { row: sweeper.row });
        }
    }
}

/// Kill attackers overlapped by an active sweeper's front edge.
pub fn sweep_lanes(world: &mut World, events: &mut Vec<SimEvent>) {
    let fronts: Vec<(usize, f64)> = world
        .query::<(&Sweeper, &Position)>()
        .iter()
        .filter(|(_, (s, _))| s.phase == SweeperPhase::Active)
        .map(|(_, (s, pos))| (s.row, pos.x + SWEEPER_WIDTH))
        .collect();
    if fronts.is_empty() {
        return;
    }

    for (_entity, (attacker, health, pos)) in
        world.query_mut::<(&mut Attacker, &mut Health, &Position)>()
    {
        let swept = fronts
            .iter()
            .any(|&(row, front)| row == attacker.row && pos.x < front);
        if swept {
            kill_attacker(attacker, health, events);
        }
    }
}

/// Apply melee damage to a defender, killing it when its health runs out.
pub fn damage_defender(
    world: &mut World,
    grid: &mut LaneGrid,
    entity: Entity,
    amount: f64,
    events: &mut Vec<SimEvent>,
) {
    let depleted = match world.query_one_mut::<(&Defender, &mut Health)>(entity) {
        Ok((defender, health)) if defender.alive => {
            health.current -= amount;
            health.is_depleted()
        }
        _ => false,
    };
    if depleted {
        retire_defender(world, grid, entity, events);
    }
}

/// Mark a defender dead and vacate its cell. Does nothing the second time.
pub fn retire_defender(
    world: &mut World,
    grid: &mut LaneGrid,
    entity: Entity,
    events: &mut Vec<SimEvent>,
) {
    let Ok(defender) = world.query_one_mut::<&mut Defender>(entity) else {
        return;
    };
    if !defender.alive {
        return;
    }
    defender.alive = false;
    grid.vacate_if(defender.cell, entity);
    debug!(
        kind = ?defender.kind,
        row = defender.cell.row,
        col = defender.cell.col,
        "defender destroyed"
    );
    events.push(SimEvent::DefenderDestroyed {
        kind: defender.kind,
        row: defender.cell.row,
        col: defender.cell.col,
    });
}

//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. Lists are sorted so that two engines in the
//! same state produce identical snapshots.

use hecs::World;

use lawnline_core::components::*;
use lawnline_core::enums::*;
use lawnline_core::events::SimEvent;
use lawnline_core::state::*;
use lawnline_core::types::{Position, SimTime};
use lawnline_waves::fsm::WaveState;

use crate::economy::Economy;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    economy: &Economy,
    selection: Selection,
    waves: &WaveState,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        game_over: phase == GamePhase::GameOver,
        balance: economy.balance(),
        selection,
        buttons: economy.button_states(time.now_ms),
        wave: build_wave(waves),
        defenders: build_defenders(world),
        attackers: build_attackers(world, time.now_ms),
        projectiles: build_projectiles(world),
        pickups: build_pickups(world),
        sweepers: build_sweepers(world),
        events,
    }
}

fn build_wave(waves: &WaveState) -> WaveView {
    WaveView {
        phase: waves.phase,
        wave: waves.wave,
        target: waves.target(),
        spawned: waves.spawned,
        killed: waves.killed,
        in_endless_mode: waves.in_endless_mode(),
        spawn_interval_ms: waves.current_interval_ms,
    }
}

fn build_defenders(world: &World) -> Vec<DefenderView> {
    let mut defenders: Vec<DefenderView> = world
        .query::<(&Defender, &Position, &Health)>()
        .iter()
        .filter(|(_, (d, _, _))| d.alive)
        .map(|(_, (d, pos, health))| DefenderView {
            kind: d.kind,
            row: d.cell.row,
            col: d.cell.col,
            position: *pos,
            health: health.current,
            max_health: health.max,
            health_ratio: health.ratio(),
        })
        .collect();
    defenders.sort_by_key(|d| (d.row, d.col));
    defenders
}

fn build_attackers(world: &World, now_ms: u64) -> Vec<AttackerView> {
    let mut attackers: Vec<AttackerView> = world
        .query::<(&Attacker, &Position, &Health)>()
        .iter()
        .filter(|(_, (a, _, _))| !a.dead)
        .map(|(_, (a, pos, health))| AttackerView {
            id: a.id,
            kind: a.kind,
            row: a.row,
            position: *pos,
            health: health.current,
            max_health: health.max,
            health_ratio: health.ratio(),
            slowed: a.is_slowed(now_ms),
        })
        .collect();
    attackers.sort_by_key(|a| a.id);
    attackers
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .filter(|(_, (p, _))| !p.spent)
        .map(|(_, (p, pos))| ProjectileView {
            kind: p.kind,
            row: p.row,
            position: *pos,
        })
        .collect();
    projectiles.sort_by(|a, b| a.row.cmp(&b.row).then(a.position.x.total_cmp(&b.position.x)));
    projectiles
}

fn build_pickups(world: &World) -> Vec<PickupView> {
    let mut pickups: Vec<PickupView> = world
        .query::<(&Pickup, &Position)>()
        .iter()
        .filter(|(_, (p, _))| p.phase.is_collectable())
        .map(|(_, (p, pos))| PickupView {
            id: p.id,
            position: *pos,
            phase: p.phase,
            opacity: p.opacity,
        })
        .collect();
    pickups.sort_by_key(|p| p.id);
    pickups
}

fn build_sweepers(world: &World) -> Vec<SweeperView> {
    let mut sweepers: Vec<SweeperView> = world
        .query::<(&Sweeper, &Position)>()
        .iter()
        .map(|(_, (s, pos))| SweeperView {
            row: s.row,
            position: *pos,
            phase: s.phase,
            used: s.used(),
            entering: s.phase == SweeperPhase::Entering,
        })
        .collect();
    sweepers.sort_by_key(|s| s.row);
    sweepers
}

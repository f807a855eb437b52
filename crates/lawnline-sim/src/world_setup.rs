//! Entity spawn factories.
//!
//! Creates sweepers, defenders, attackers, projectiles and pickups with
//! their component bundles. Positions are derived here and nowhere else.

use hecs::{Entity, World};

use lawnline_core::components::*;
use lawnline_core::constants::*;
use lawnline_core::enums::*;
use lawnline_core::types::{GridCell, Position};

/// Spawn one sweeper per lane, starting its entry animation off-field.
pub fn spawn_sweepers(world: &mut World, rows: usize) {
    for row in 0..rows {
        world.spawn((
            Sweeper {
                row,
                phase: SweeperPhase::Entering,
                speed: 0.0,
            },
            Position::new(SWEEPER_START_X, row as f64 + ATTACKER_BASE_OFFSET),
        ));
    }
}

/// Anchor point of a defender inside its cell.
pub fn defender_anchor(cell: GridCell) -> Position {
    Position::new(
        cell.col as f64 + DEFENDER_X_OFFSET,
        cell.row as f64 + DEFENDER_Y_OFFSET,
    )
}

/// Spawn a defender at a cell. The caller owns grid installation.
pub fn spawn_defender(
    world: &mut World,
    kind: DefenderKind,
    cell: GridCell,
    now_ms: u64,
) -> Entity {
    let profile = defender_profile(kind);
    let action = match kind {
        kind if kind.is_shooter() => DefenderAction::Fire { cooldown_ticks: 0 },
        DefenderKind::SunProducer => DefenderAction::Produce {
            last_yield_ms: now_ms,
        },
        DefenderKind::Wall => DefenderAction::Block,
        _ => DefenderAction::Fuse {
            armed_at_ms: now_ms,
            detonated_at_ms: None,
        },
    };

    world.spawn((
        Defender {
            kind,
            cell,
            action,
            alive: true,
        },
        defender_anchor(cell),
        Health::full(profile.max_health),
    ))
}

/// Spawn an attacker on a lane at horizontal position `x`.
pub fn spawn_attacker(world: &mut World, id: u32, kind: AttackerKind, row: usize, x: f64) -> Entity {
    let profile = attacker_profile(kind);
    world.spawn((
        Attacker {
            id,
            kind,
            row,
            speed: profile.speed,
            slow_until_ms: 0,
            dead: false,
            counted: false,
        },
        Position::new(x, row as f64 + ATTACKER_BASE_OFFSET),
        Health::full(profile.max_health),
    ))
}

/// Spawn a straight-line Pea or IcePea from a shooter anchor.
pub fn spawn_pea(world: &mut World, kind: ProjectileKind, row: usize, anchor: Position) -> Entity {
    let (speed, status) = match kind {
        ProjectileKind::IcePea => (ICE_PEA_SPEED_PER_TICK, StatusTag::Slow),
        _ => (PEA_SPEED_PER_TICK, StatusTag::None),
    };
    let (dx, dy) = PEA_MUZZLE_OFFSET;
    world.spawn((
        Projectile {
            kind,
            row,
            damage: PEA_DAMAGE,
            status,
            flight: Flight::Straight { speed },
            spent: false,
        },
        Position::new(anchor.x + dx, anchor.y + dy),
    ))
}

/// Spawn a Melon arcing onto the target's current spot.
pub fn spawn_melon(world: &mut World, row: usize, anchor: Position, target: Position) -> Entity {
    let flight = Flight::Arc(ArcTrajectory {
        origin: anchor,
        destination: target,
        peak_height: MELON_PEAK_HEIGHT,
        frame: 0,
        total_frames: MELON_FLIGHT_FRAMES,
    });
    world.spawn((
        Projectile {
            kind: ProjectileKind::Melon,
            row,
            damage: MELON_DAMAGE,
            status: StatusTag::None,
            flight,
            spent: false,
        },
        anchor,
    ))
}

/// Spawn a falling pickup at `position`.
pub fn spawn_pickup(world: &mut World, id: u32, source: PickupSource, position: Position) -> Entity {
    world.spawn((
        Pickup {
            id,
            source,
            value: PICKUP_VALUE,
            target_y: position.y + PICKUP_FALL_DISTANCE,
            phase: PickupPhase::Falling,
            landed_at_ms: None,
            opacity: 1.0,
        },
        position,
    ))
}

//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Behaviour lives in the simulation systems, which switch over the kind tags.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{GridCell, Position};

/// Hit points shared by defenders and attackers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

impl Health {
    pub fn full(max: f64) -> Self {
        Self { current: max, max }
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Fraction of health remaining, clamped to 0..=1.
    pub fn ratio(&self) -> f64 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.current / self.max).clamp(0.0, 1.0)
    }
}

/// Per-variant internal state of a defender.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DefenderAction {
    /// Shooter variants: ticks until the next shot may be fired.
    Fire { cooldown_ticks: u32 },
    /// SunProducer: clock reading of the last yield (or placement).
    Produce { last_yield_ms: u64 },
    /// Wall: does nothing.
    Block,
    /// Bomb: armed at placement, detonates once.
    Fuse {
        armed_at_ms: u64,
        detonated_at_ms: Option<u64>,
    },
}

/// A player-placed unit. Addressed by its grid cell, never by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defender {
    pub kind: DefenderKind,
    pub cell: GridCell,
    pub action: DefenderAction,
    /// Cleared exactly once, when the defender dies and vacates its cell.
    pub alive: bool,
}

/// A hostile unit walking left along its lane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attacker {
    pub id: u32,
    pub kind: AttackerKind,
    pub row: usize,
    /// Nominal speed per tick.
    pub speed: f64,
    /// Clock reading until which the slow effect applies.
    pub slow_until_ms: u64,
    pub dead: bool,
    /// Set when the death has been credited to the wave kill count.
    pub counted: bool,
}

impl Attacker {
    pub fn is_slowed(&self, now_ms: u64) -> bool {
        now_ms < self.slow_until_ms
    }
}

/// Parabolic flight toward a fixed landing point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcTrajectory {
    pub origin: Position,
    pub destination: Position,
    /// Peak height above the origin.
    pub peak_height: f64,
    pub frame: u32,
    pub total_frames: u32,
}

/// How a projectile moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Flight {
    /// Constant horizontal speed to the right.
    Straight { speed: f64 },
    Arc(ArcTrajectory),
}

/// A projectile travelling along one lane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub row: usize,
    pub damage: f64,
    pub status: StatusTag,
    pub flight: Flight,
    /// Set on the first hit or when leaving the field.
    pub spent: bool,
}

/// A falling resource the player can collect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub source: PickupSource,
    pub value: u32,
    pub target_y: f64,
    pub phase: PickupPhase,
    pub landed_at_ms: Option<u64>,
    /// Visual opacity, 1.0 until fading starts.
    pub opacity: f64,
}

/// The one-shot lane clearer parked in column 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sweeper {
    pub row: usize,
    pub phase: SweeperPhase,
    pub speed: f64,
}

impl Sweeper {
    /// Whether the sweeper has been triggered at some point.
    pub fn used(&self) -> bool {
        matches!(self.phase, SweeperPhase::Active | SweeperPhase::Spent)
    }
}

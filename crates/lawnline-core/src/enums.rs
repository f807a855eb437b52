//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Player-placed unit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenderKind {
    /// Fires Peas down its lane.
    Shooter,
    /// Fires IcePeas that slow their target.
    IceShooter,
    /// Lobs Melons at the nearest attacker ahead.
    MelonShooter,
    /// Periodically yields a pickup.
    SunProducer,
    /// High-health blocker, no action.
    Wall,
    /// Clears its whole lane shortly after placement, then disappears.
    Bomb,
}

impl DefenderKind {
    pub const ALL: [DefenderKind; 6] = [
        DefenderKind::Shooter,
        DefenderKind::IceShooter,
        DefenderKind::MelonShooter,
        DefenderKind::SunProducer,
        DefenderKind::Wall,
        DefenderKind::Bomb,
    ];

    /// Whether this type fires projectiles.
    pub fn is_shooter(self) -> bool {
        matches!(
            self,
            DefenderKind::Shooter | DefenderKind::IceShooter | DefenderKind::MelonShooter
        )
    }
}

/// Hostile unit type. Variants differ only in health and wave gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackerKind {
    #[default]
    Basic,
    ArmoredLight,
    ArmoredHeavy,
}

/// Projectile type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Straight-line point projectile.
    Pea,
    /// Straight-line point projectile carrying a slow.
    IcePea,
    /// Area projectile on a parabolic arc.
    Melon,
}

/// Status effect carried by a projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusTag {
    #[default]
    None,
    Slow,
}

/// Where a pickup came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupSource {
    Ambient,
    Producer,
}

/// Pickup lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupPhase {
    #[default]
    Falling,
    Resting,
    Fading,
    /// Faded out without being collected.
    Expired,
    /// Collected by the player.
    Collected,
}

impl PickupPhase {
    /// Whether the pickup can still be collected.
    pub fn is_collectable(self) -> bool {
        matches!(
            self,
            PickupPhase::Falling | PickupPhase::Resting | PickupPhase::Fading
        )
    }
}

/// Sweeper lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweeperPhase {
    /// Intro animation, cannot be triggered yet.
    #[default]
    Entering,
    /// Parked at the lane start, waiting for a trigger.
    Idle,
    /// Moving right, destroying attackers on contact.
    Active,
    /// Used up and inert.
    Spent,
}

/// Wave scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// One of the fixed opening waves (1-based).
    EarlyWave(u32),
    /// Last fixed wave cleared, endless parameters being reset.
    Transitioning,
    /// Escalating endless phase.
    Endless,
}

impl Default for WavePhase {
    fn default() -> Self {
        WavePhase::EarlyWave(1)
    }
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Constructed but not started.
    #[default]
    Waiting,
    Active,
    /// An attacker reached the left boundary. State is frozen.
    GameOver,
}

/// The tool or defender type the player has armed for the next click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    None,
    Defender(DefenderKind),
    Shovel,
}

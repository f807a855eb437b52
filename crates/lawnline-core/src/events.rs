//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::error::CommandError;

/// Drained into every snapshot; the presentation layer decides what to play or show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    GameStarted,
    DefenderPlaced {
        kind: DefenderKind,
        row: usize,
        col: usize,
    },
    DefenderRemoved {
        kind: DefenderKind,
        row: usize,
        col: usize,
    },
    DefenderDestroyed {
        kind: DefenderKind,
        row: usize,
        col: usize,
    },
    ProjectileFired { kind: ProjectileKind, row: usize },
    AttackerSpawned {
        id: u32,
        kind: AttackerKind,
        row: usize,
    },
    AttackerKilled { id: u32, row: usize },
    BombDetonated { row: usize, col: usize },
    SweeperActivated { row: usize },
    PickupSpawned { id: u32, source: PickupSource },
    PickupCollected { id: u32, value: u32 },
    PickupExpired { id: u32 },
    WaveAdvanced { wave: u32 },
    EndlessStarted,
    /// A queued command was refused.
    CommandRejected { error: CommandError },
    /// An attacker breached the given lane.
    GameOver { row: usize },
}

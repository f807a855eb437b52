//! Player commands sent from the presentation layer to the simulation.
//!
//! Commands are queued and applied at the next tick boundary, strictly
//! between ticks. The engine also exposes each command as a direct method.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start the game clock, wave scheduler and ambient drops.
    StartGame,
    /// Arm a defender type or the shovel for the next click.
    Select { selection: Selection },
    /// Apply the current selection to a grid cell.
    ClickCell { row: usize, col: usize },
    /// Place a defender without going through the selection.
    PlaceDefender {
        row: usize,
        col: usize,
        kind: DefenderKind,
    },
    /// Dig up whatever occupies a cell.
    RemoveDefender { row: usize, col: usize },
    /// Collect a pickup by id.
    CollectPickup { id: u32 },
    /// Collect the first pickup under a pointer position (lane units).
    CollectAt { x: f64, y: f64 },
}

//! Command rejection taxonomy.
//!
//! Every failure is a local, recoverable rejection of one command. The
//! loss condition is a normal terminal state and is not represented here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PlacementRejection {
    #[error("cell is already occupied")]
    CellOccupied,
    #[error("defender type is on cooldown")]
    OnCooldown,
    #[error("not enough resource")]
    InsufficientResource,
    #[error("column is reserved for sweepers")]
    InvalidColumn,
}

/// Why a removal was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RemovalRejection {
    #[error("nothing to remove")]
    NothingToRemove,
}

/// Error returned by every command entry point.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum CommandError {
    #[error("placement rejected: {0}")]
    Placement(#[from] PlacementRejection),
    #[error("removal rejected: {0}")]
    Removal(#[from] RemovalRejection),
    #[error("cell ({row}, {col}) is outside the lane grid")]
    InvalidCell { row: i64, col: i64 },
    #[error("no collectable pickup with id {0}")]
    UnknownPickup(u32),
    #[error("no collectable pickup at ({x:.2}, {y:.2})")]
    NoPickupAt { x: f64, y: f64 },
    #[error("defender type is disabled")]
    SelectionDisabled,
    #[error("game is not running")]
    NotRunning,
}

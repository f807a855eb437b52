//! Game state snapshot: the complete visible state handed to the presentation layer each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{Position, SimTime};

/// Complete game state returned by every tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// True once the loss condition has been raised.
    pub game_over: bool,
    pub balance: u32,
    pub selection: Selection,
    pub buttons: Vec<ButtonState>,
    pub wave: WaveView,
    pub defenders: Vec<DefenderView>,
    pub attackers: Vec<AttackerView>,
    pub projectiles: Vec<ProjectileView>,
    pub pickups: Vec<PickupView>,
    pub sweepers: Vec<SweeperView>,
    pub events: Vec<SimEvent>,
}

/// Per-type availability for cooldown bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ButtonState {
    pub kind: DefenderKind,
    pub disabled: bool,
    /// 0..=100; 100 while unaffordable, else the remaining cooldown share.
    pub cooldown_percent: f64,
}

/// Wave progress for display.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub phase: WavePhase,
    pub wave: u32,
    pub target: u32,
    pub spawned: u32,
    pub killed: u32,
    pub in_endless_mode: bool,
    pub spawn_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenderView {
    pub kind: DefenderKind,
    pub row: usize,
    pub col: usize,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    /// Remaining health in 0..=1, for health bars.
    pub health_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackerView {
    pub id: u32,
    pub kind: AttackerKind,
    pub row: usize,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub health_ratio: f64,
    pub slowed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub kind: ProjectileKind,
    pub row: usize,
    pub position: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub id: u32,
    pub position: Position,
    pub phase: PickupPhase,
    pub opacity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweeperView {
    pub row: usize,
    pub position: Position,
    pub phase: SweeperPhase,
    pub used: bool,
    pub entering: bool,
}

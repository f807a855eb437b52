//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in lane units. x grows to the right, y grows downward;
/// lane `r` spans `y` in `[r, r + 1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A grid cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each active tick).
    pub tick: u64,
    /// Clock reading of the current tick.
    pub now_ms: u64,
    /// Clock reading when the game started.
    pub start_ms: u64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl GridCell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Horizontal centre of the cell, used as the melee contact point.
    pub fn centre_x(&self) -> f64 {
        self.col as f64 + 0.5
    }
}

impl SimTime {
    /// Start the clock at `now_ms`.
    pub fn started_at(now_ms: u64) -> Self {
        Self {
            tick: 0,
            now_ms,
            start_ms: now_ms,
        }
    }

    /// Advance by one tick to the given clock reading. The clock never runs backwards.
    pub fn advance(&mut self, now_ms: u64) {
        self.tick += 1;
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Milliseconds since the game started.
    pub fn elapsed_ms(&self) -> u64 {
        self.now_ms.saturating_sub(self.start_ms)
    }
}

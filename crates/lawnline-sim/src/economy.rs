//! Economy manager: resource balance and per-type cooldown gating.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use lawnline_core::constants::defender_profile;
use lawnline_core::enums::DefenderKind;
use lawnline_core::error::PlacementRejection;
use lawnline_core::state::ButtonState;

/// Balance plus the last placement time of each defender type.
///
/// The balance is unsigned and only debited after an affordability check,
/// so it can never go negative.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Economy {
    balance: u32,
    last_used_ms: HashMap<DefenderKind, u64>,
}

impl Economy {
    pub fn new(balance: u32) -> Self {
        Self {
            balance,
            last_used_ms: HashMap::new(),
        }
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn can_afford(&self, kind: DefenderKind) -> bool {
        self.balance >= defender_profile(kind).cost
    }

    /// Remaining cooldown of a type at `now_ms` (zero when ready).
    pub fn cooldown_remaining_ms(&self, kind: DefenderKind, now_ms: u64) -> u64 {
        let Some(&last) = self.last_used_ms.get(&kind) else {
            return 0;
        };
        let elapsed = now_ms.saturating_sub(last);
        defender_profile(kind).cooldown_ms.saturating_sub(elapsed)
    }

    /// Check every economic gate for a placement, without mutating anything.
    pub fn check(&self, kind: DefenderKind, now_ms: u64) -> Result<(), PlacementRejection> {
        if !self.can_afford(kind) {
            return Err(PlacementRejection::InsufficientResource);
        }
        if self.cooldown_remaining_ms(kind, now_ms) > 0 {
            return Err(PlacementRejection::OnCooldown);
        }
        Ok(())
    }

    /// Debit the cost and start the cooldown. Call only after `check` passed.
    pub fn commit(&mut self, kind: DefenderKind, now_ms: u64) {
        let cost = defender_profile(kind).cost;
        self.balance = self.balance.saturating_sub(cost);
        self.last_used_ms.insert(kind, now_ms);
    }

    pub fn credit(&mut self, amount: u32) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Availability of one type for the cooldown bar.
    pub fn button_state(&self, kind: DefenderKind, now_ms: u64) -> ButtonState {
        let cooldown_ms = defender_profile(kind).cooldown_ms;
        let remaining = self.cooldown_remaining_ms(kind, now_ms);

        let mut disabled = false;
        let mut cooldown_percent = 0.0;

        if remaining > 0 {
            disabled = true;
            cooldown_percent = remaining as f64 / cooldown_ms as f64 * 100.0;
        }
        if !self.can_afford(kind) {
            disabled = true;
            cooldown_percent = 100.0;
        }

        ButtonState {
            kind,
            disabled,
            cooldown_percent,
        }
    }

    pub fn button_states(&self, now_ms: u64) -> Vec<ButtonState> {
        DefenderKind::ALL
            .iter()
            .map(|&kind| self.button_state(kind, now_ms))
            .collect()
    }

    #[cfg(test)]
    pub fn set_balance(&mut self, balance: u32) {
        self.balance = balance;
    }
}

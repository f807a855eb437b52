//! Difficulty ramp: endless spawn interval and wave-gated attacker draw.

use rand::Rng;

use lawnline_core::constants::*;
use lawnline_core::enums::AttackerKind;

/// Endless spawn interval after `elapsed_ms` since game start.
///
/// Shrinks by one step per elapsed speed-up window, never below the floor.
pub fn endless_interval_ms(base_ms: u64, elapsed_ms: u64) -> u64 {
    let level = elapsed_ms / ENDLESS_SPEEDUP_WINDOW_MS;
    base_ms
        .saturating_sub(level.saturating_mul(ENDLESS_INTERVAL_STEP_MS))
        .max(ENDLESS_MIN_INTERVAL_MS)
}

/// Map a uniform roll in `[0, 1)` to an attacker kind for the given wave.
///
/// A kind whose profile is not yet eligible in `wave` falls back to Basic.
pub fn attacker_for_roll(wave: u32, roll: f64) -> AttackerKind {
    let kind = if roll < ARMORED_HEAVY_CHANCE {
        AttackerKind::ArmoredHeavy
    } else if roll < ARMORED_LIGHT_THRESHOLD {
        AttackerKind::ArmoredLight
    } else {
        AttackerKind::Basic
    };
    if attacker_profile(kind).first_wave <= wave {
        kind
    } else {
        AttackerKind::Basic
    }
}

/// Draw an attacker kind for the given wave.
pub fn draw_attacker<R: Rng>(wave: u32, rng: &mut R) -> AttackerKind {
    let roll: f64 = rng.gen();
    attacker_for_roll(wave, roll)
}

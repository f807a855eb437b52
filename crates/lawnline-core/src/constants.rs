//! Simulation constants and tuning parameters.
//!
//! Distances are in lane units: one grid cell is 1.0 wide and 1.0 tall.
//! Rates suffixed `_PER_TICK` apply once per logical tick; everything
//! suffixed `_MS` is compared against the injected millisecond clock.

use crate::enums::{AttackerKind, DefenderKind};

/// Nominal logic tick rate of the presentation refresh (Hz).
pub const TICK_RATE: u32 = 60;

// --- Grid ---

/// Default number of lanes.
pub const DEFAULT_ROWS: usize = 5;

/// Default number of columns, including the sweeper column.
pub const DEFAULT_COLS: usize = 9;

/// Column reserved for sweepers; never plantable.
pub const SWEEPER_COLUMN: usize = 0;

// --- Economy ---

/// Resource balance at game start.
pub const STARTING_BALANCE: u32 = 1000;

// --- Defenders ---

/// Horizontal offset of a defender's anchor inside its cell.
pub const DEFENDER_X_OFFSET: f64 = 0.1;

/// Vertical offset of a defender's anchor inside its lane.
pub const DEFENDER_Y_OFFSET: f64 = 0.4;

/// Attackers must have this much of their body on the field before shooters react.
pub const TARGET_VISIBLE_EDGE: f64 = 1.2;

/// Time between SunProducer yields.
pub const PRODUCER_YIELD_INTERVAL_MS: u64 = 12_000;

/// Height above the producer at which its pickup appears.
pub const PRODUCER_DROP_RISE: f64 = 1.0;

/// Delay between placing a Bomb and its detonation.
pub const BOMB_FUSE_MS: u64 = 500;

/// Delay between detonation and the Bomb vacating its cell.
pub const BOMB_LINGER_MS: u64 = 1000;

// --- Attackers ---

/// Attacker body width.
pub const ATTACKER_WIDTH: f64 = 0.9;

/// Attacker body height (extends upward from its base line).
pub const ATTACKER_HEIGHT: f64 = 1.2;

/// Base line of an attacker relative to the top of its lane.
pub const ATTACKER_BASE_OFFSET: f64 = 1.0;

/// Nominal walking speed.
pub const ATTACKER_SPEED_PER_TICK: f64 = 0.003;

/// Nominal melee damage dealt to a defender in contact.
pub const ATTACKER_MELEE_DAMAGE_PER_TICK: f64 = 0.2;

/// Width of the contact band ending at a defender's cell centre.
pub const MELEE_CONTACT_BAND: f64 = 0.5;

/// Speed and damage multiplier while slowed.
pub const SLOW_FACTOR: f64 = 0.5;

/// Duration of the slow effect applied by an IcePea.
pub const SLOW_DURATION_MS: u64 = 3000;

// --- Projectiles ---

/// Damage of a Pea or IcePea.
pub const PEA_DAMAGE: f64 = 14.0;

/// Collision radius of a Pea or IcePea.
pub const PEA_RADIUS: f64 = 0.08;

pub const PEA_SPEED_PER_TICK: f64 = 0.035;

pub const ICE_PEA_SPEED_PER_TICK: f64 = 0.03;

/// Pea launch point relative to the shooter anchor.
pub const PEA_MUZZLE_OFFSET: (f64, f64) = (0.4, -0.3);

pub const MELON_DAMAGE: f64 = 35.0;

/// Side length of the Melon's square hit box.
pub const MELON_SIZE: f64 = 0.3;

/// Peak height of the Melon arc above its launch height.
pub const MELON_PEAK_HEIGHT: f64 = 1.6;

/// Flight time of a Melon.
pub const MELON_FLIGHT_FRAMES: u32 = 120;

// --- Pickups ---

pub const PICKUP_VALUE: u32 = 25;

pub const PICKUP_FALL_SPEED_PER_TICK: f64 = 0.01;

/// Distance a pickup falls before resting.
pub const PICKUP_FALL_DISTANCE: f64 = 1.0;

pub const PICKUP_REST_MS: u64 = 5000;

pub const PICKUP_FADE_MS: u64 = 2000;

/// Hit-test radius for pointer collection.
pub const PICKUP_RADIUS: f64 = 0.2;

/// Ambient drop delay range (uniform).
pub const AMBIENT_DROP_MIN_DELAY_MS: u64 = 5000;
pub const AMBIENT_DROP_MAX_DELAY_MS: u64 = 10_000;

/// Horizontal margin kept clear by ambient drops.
pub const AMBIENT_DROP_MARGIN: f64 = 0.5;

/// Ambient drops start at y in [MIN, MIN + SPAN).
pub const AMBIENT_DROP_MIN_Y: f64 = 0.3;
pub const AMBIENT_DROP_Y_SPAN: f64 = 1.0;

// --- Sweepers ---

pub const SWEEPER_START_X: f64 = -1.0;

/// X at which the entry animation ends.
pub const SWEEPER_REST_X: f64 = 0.1;

pub const SWEEPER_ENTRY_SPEED_PER_TICK: f64 = 0.02;

pub const SWEEPER_SPEED_PER_TICK: f64 = 0.05;

pub const SWEEPER_WIDTH: f64 = 1.0;

/// Any live attacker left of this x triggers its lane's sweeper.
pub const SWEEPER_TRIGGER_X: f64 = 1.0;

// --- Waves ---

/// Delay between game start and the first wave callback.
pub const FIRST_WAVE_DELAY_MS: u64 = 10_000;

/// Spawn interval of each early wave (wave n uses index n - 1).
pub const EARLY_WAVE_INTERVALS_MS: [u64; 3] = [10_000, 8000, 6000];

/// Number of fixed waves before the endless phase.
pub const EARLY_WAVE_COUNT: u32 = 3;

/// Poll interval while waiting for a wave to be cleared.
pub const WAVE_POLL_INTERVAL_MS: u64 = 1000;

/// First wave number at which armored attackers can spawn.
pub const ARMORED_FIRST_WAVE: u32 = 4;

/// Chance of an ArmoredHeavy once armored attackers are eligible.
pub const ARMORED_HEAVY_CHANCE: f64 = 0.2;

/// Cumulative chance threshold for ArmoredLight (heavy + light).
pub const ARMORED_LIGHT_THRESHOLD: f64 = 0.5;

pub const ENDLESS_BASE_INTERVAL_MS: u64 = 10_000;

pub const ENDLESS_MIN_INTERVAL_MS: u64 = 1000;

pub const ENDLESS_INTERVAL_STEP_MS: u64 = 500;

/// Each elapsed window of this length shortens the endless interval by one step.
pub const ENDLESS_SPEEDUP_WINDOW_MS: u64 = 30_000;

/// Static parameters of a defender type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefenderProfile {
    pub cost: u32,
    pub cooldown_ms: u64,
    pub max_health: f64,
    /// Ticks between shots, for the shooter variants.
    pub fire_interval_ticks: Option<u32>,
}

pub fn defender_profile(kind: DefenderKind) -> DefenderProfile {
    match kind {
        DefenderKind::Shooter => DefenderProfile {
            cost: 100,
            cooldown_ms: 7000,
            max_health: 100.0,
            fire_interval_ticks: Some(175),
        },
        DefenderKind::IceShooter => DefenderProfile {
            cost: 125,
            cooldown_ms: 10_000,
            max_health: 100.0,
            fire_interval_ticks: Some(175),
        },
        DefenderKind::MelonShooter => DefenderProfile {
            cost: 225,
            cooldown_ms: 15_000,
            max_health: 100.0,
            fire_interval_ticks: Some(300),
        },
        DefenderKind::SunProducer => DefenderProfile {
            cost: 50,
            cooldown_ms: 5000,
            max_health: 80.0,
            fire_interval_ticks: None,
        },
        DefenderKind::Wall => DefenderProfile {
            cost: 50,
            cooldown_ms: 50_000,
            max_health: 400.0,
            fire_interval_ticks: None,
        },
        DefenderKind::Bomb => DefenderProfile {
            cost: 150,
            cooldown_ms: 30_000,
            max_health: 100.0,
            fire_interval_ticks: None,
        },
    }
}

/// Static parameters of an attacker type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackerProfile {
    pub max_health: f64,
    pub speed: f64,
    /// Earliest wave in which the scheduler may draw this type.
    pub first_wave: u32,
}

pub fn attacker_profile(kind: AttackerKind) -> AttackerProfile {
    match kind {
        AttackerKind::Basic => AttackerProfile {
            max_health: 100.0,
            speed: ATTACKER_SPEED_PER_TICK,
            first_wave: 1,
        },
        AttackerKind::ArmoredLight => AttackerProfile {
            max_health: 250.0,
            speed: ATTACKER_SPEED_PER_TICK,
            first_wave: ARMORED_FIRST_WAVE,
        },
        AttackerKind::ArmoredHeavy => AttackerProfile {
            max_health: 350.0,
            speed: ATTACKER_SPEED_PER_TICK,
            first_wave: ARMORED_FIRST_WAVE,
        },
    }
}

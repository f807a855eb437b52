//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` plus whatever engine state
//! they need. Entity state lives in components; the engine owns the rest.

pub mod ambient;
pub mod attackers;
pub mod cleanup;
pub mod combat;
pub mod defenders;
pub mod pickups;
pub mod projectiles;
pub mod snapshot;
pub mod sweepers;
pub mod wave_spawner;

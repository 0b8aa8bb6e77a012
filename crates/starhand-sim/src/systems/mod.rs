//! Per-frame systems that operate on the enemy world.
//!
//! Systems are free functions over `&mut World` plus the buffers they
//! fill; they own no state of their own.

pub mod cleanup;
pub mod enemy_ai;
pub mod enemy_fire;
pub mod snapshot;
pub mod wave_spawner;

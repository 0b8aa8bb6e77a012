//! Events emitted by the simulation for audio and visual feedback.
//!
//! Collaborators consume these read-only; the core never depends on them
//! being observed.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Discrete gameplay event, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// The consumed gesture differs from the previous frame's.
    GestureChanged { new: Gesture, old: Gesture },
    /// A weapon discharged (or the beam switched on).
    WeaponFired { weapon: WeaponKind },
    /// The active weapon slot changed.
    WeaponSelected { weapon: WeaponKind },
    /// A harpoon latched onto an enemy.
    HarpoonAttached { enemy_id: u64 },
    /// Barrel roll started; the ship is invulnerable for its duration.
    BarrelRoll,
    /// Shield raised.
    ShieldRaised,
    /// An enemy entered the arena.
    EnemySpawned { enemy_id: u64, kind: EnemyKind },
    /// An enemy opened fire.
    EnemyAttack { kind: EnemyKind, origin: DVec3 },
    /// An enemy died and was removed from the roster.
    EnemyKilled {
        enemy_id: u64,
        kind: EnemyKind,
        score: u32,
    },
    /// Player hull took damage at `point`.
    ShipHit { point: DVec3, damage: f64 },
    /// Player shield absorbed damage at `point`.
    ShieldHit { point: DVec3, absorbed: f64 },
    /// Player hull reached zero.
    ShipDestroyed,
    /// A new wave began spawning.
    WaveStarted {
        wave: u32,
        is_boss: bool,
        enemy_count: u32,
    },
    /// Every enemy of the wave spawned and died.
    WaveComplete { wave: u32, bonus: u32 },
}

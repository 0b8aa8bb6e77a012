//! Game state snapshot: the complete visible state handed to the
//! presentation layer (renderer, HUD, radar, audio) after each frame.

use glam::{DQuat, DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::SimTime;

/// Complete game state produced after each frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Gesture consumed this frame.
    pub gesture: Gesture,
    /// Smoothed aim point in [0,1]².
    pub aim: DVec2,
    pub ship: ShipView,
    pub enemies: Vec<EnemyView>,
    pub weapons: WeaponView,
    pub projectiles: Vec<ProjectileView>,
    pub wave: WaveView,
    pub score: ScoreView,
    pub events: Vec<GameEvent>,
}

/// Player ship status for the HUD and camera.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipView {
    pub position: DVec3,
    pub velocity: DVec3,
    pub orientation: DQuat,
    /// Barrel-roll animation angle (radians, 0 when not rolling).
    pub roll_angle: f64,
    pub speed: f64,
    pub hull_fraction: f64,
    pub shield_fraction: f64,
    pub energy_fraction: f64,
    pub thrusting: bool,
    pub braking: bool,
    pub boosting: bool,
    pub invulnerable: bool,
    pub shield_active: bool,
}

/// One enemy, for rendering and the radar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u64,
    pub kind: EnemyKind,
    pub state: AiState,
    pub position: DVec3,
    pub orientation: DQuat,
    pub health_fraction: f64,
    /// True while the hit flash is showing.
    pub flashing: bool,
}

/// Weapon slots and continuous-weapon visuals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponView {
    pub active: WeaponKind,
    /// Cooldown fraction per slot (0 = ready, 1 = just fired).
    pub cooldowns: Vec<WeaponCooldownView>,
    /// Present while the beam is on.
    pub beam: Option<BeamView>,
    /// Attached harpoon tethers.
    pub tethers: Vec<TetherView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponCooldownView {
    pub weapon: WeaponKind,
    pub fraction: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamView {
    pub start: DVec3,
    pub end: DVec3,
    /// Enemy currently burned by the beam, if any.
    pub target: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TetherView {
    pub harpoon: DVec3,
    pub enemy_id: u64,
}

/// An in-flight projectile from either side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub source: ProjectileSource,
    pub position: DVec3,
    pub velocity: DVec3,
}

/// Current wave progress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub number: u32,
    pub is_boss: bool,
    /// Enemies of this wave not yet killed (spawned or queued).
    pub remaining: i32,
    /// Enemies still waiting to spawn.
    pub queued: u32,
}

/// Running score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u32,
    pub kills: u32,
    pub vanguard_kills: u32,
    pub hunter_kills: u32,
    pub coward_kills: u32,
    pub waves_cleared: u32,
    pub shots_fired: u32,
}

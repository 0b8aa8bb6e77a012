//! Snapshot system: builds a complete GameStateSnapshot from the ship,
//! weapons, and enemy world.
//!
//! This system is read-only; it never modifies simulation state.

use hecs::World;

use starhand_core::enums::GamePhase;
use starhand_core::events::GameEvent;
use starhand_core::state::*;
use starhand_core::types::SimTime;

use starhand_enemy_ai::EnemyAgent;
use starhand_gesture::GestureState;

use crate::score::ScoreState;
use crate::ship::ShipState;
use crate::systems::wave_spawner::WaveOrchestrator;
use crate::weapons::{entity_id, WeaponSystem};

/// Everything a snapshot is built from.
pub struct SnapshotSources<'a> {
    pub time: &'a SimTime,
    pub phase: GamePhase,
    pub gesture: &'a GestureState,
    pub ship: &'a ShipState,
    pub weapons: &'a WeaponSystem,
    pub waves: &'a WaveOrchestrator,
    pub score: &'a ScoreState,
}

pub fn build_snapshot(sources: SnapshotSources<'_>, events: Vec<GameEvent>) -> GameStateSnapshot {
    let projectiles = sources
        .weapons
        .projectile_views()
        .chain(sources.waves.enemy_projectiles().iter().map(|p| p.view()))
        .collect();

    GameStateSnapshot {
        time: *sources.time,
        phase: sources.phase,
        gesture: sources.gesture.gesture,
        aim: sources.gesture.aim,
        ship: sources.ship.view(),
        enemies: build_enemies(sources.waves.world()),
        weapons: sources.weapons.view(),
        projectiles,
        wave: sources.waves.view(),
        score: sources.score.view(),
        events,
    }
}

/// Enemy views ordered by id.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<&EnemyAgent>()
        .iter()
        .map(|(entity, agent)| EnemyView {
            id: entity_id(entity),
            kind: agent.kind,
            state: agent.state,
            position: agent.transform.position,
            orientation: agent.transform.orientation,
            health_fraction: agent.health_fraction(),
            flashing: agent.is_flashing(),
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}

//! Enemy spawn factory.
//!
//! Places new enemies in a forward-biased arc around the ship so they
//! arrive in view.

use glam::{DQuat, DVec3};
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starhand_core::constants::*;
use starhand_core::enums::EnemyKind;
use starhand_core::types::{look_rotation, Transform};

use starhand_enemy_ai::EnemyAgent;

/// Random spawn point within the arc ahead of `ship`.
pub fn spawn_position(rng: &mut ChaCha8Rng, ship: &Transform) -> DVec3 {
    let forward = ship.forward();
    let heading = DVec3::new(forward.x, 0.0, forward.z)
        .try_normalize()
        .unwrap_or(DVec3::NEG_Z);
    let angle = rng.gen_range(-SPAWN_ARC_HALF_ANGLE..=SPAWN_ARC_HALF_ANGLE);
    let distance = rng.gen_range(SPAWN_MIN_DISTANCE..=SPAWN_MAX_DISTANCE);
    let height = rng.gen_range(-SPAWN_HEIGHT_JITTER..=SPAWN_HEIGHT_JITTER);

    ship.position + DQuat::from_rotation_y(angle) * heading * distance + DVec3::Y * height
}

/// Spawn one enemy of `kind` facing the ship.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    kind: EnemyKind,
    ship: &Transform,
) -> Entity {
    let position = spawn_position(rng, ship);
    let mut agent = EnemyAgent::spawn(kind, position, rng);
    if let Some(facing) = look_rotation(ship.position - position) {
        agent.transform.orientation = facing;
    }
    world.spawn((agent,))
}

//! Enemy fire system: moves enemy shots and resolves hits on the ship.

use glam::DVec3;

use starhand_core::constants::*;
use starhand_core::enums::{EnemyKind, ProjectileSource};
use starhand_core::events::GameEvent;
use starhand_core::state::ProjectileView;

use starhand_enemy_ai::AttackDescriptor;

use crate::collision::segment_sphere;
use crate::ship::ShipState;

/// An in-flight enemy shot.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyProjectile {
    pub kind: EnemyKind,
    pub position: DVec3,
    pub velocity: DVec3,
    pub damage: f64,
    pub age_secs: f64,
}

impl EnemyProjectile {
    /// Shot aimed at the attack's target point.
    pub fn from_attack(attack: &AttackDescriptor) -> Self {
        let direction = (attack.target - attack.origin).normalize_or_zero();
        Self {
            kind: attack.kind,
            position: attack.origin,
            velocity: direction * ENEMY_PROJECTILE_SPEED,
            damage: attack.damage,
            age_secs: 0.0,
        }
    }

    pub fn view(&self) -> ProjectileView {
        ProjectileView {
            source: ProjectileSource::Enemy(self.kind),
            position: self.position,
            velocity: self.velocity,
        }
    }
}

/// Advance enemy shots one frame. Returns true if the ship's hull reached
/// zero this frame.
pub fn run(
    projectiles: &mut Vec<EnemyProjectile>,
    ship: &mut ShipState,
    dt: f64,
    events: &mut Vec<GameEvent>,
) -> bool {
    let was_dead = ship.is_dead();
    projectiles.retain_mut(|shot| {
        shot.age_secs += dt;
        if shot.age_secs >= ENEMY_PROJECTILE_TTL {
            return false;
        }
        let start = shot.position;
        shot.position += shot.velocity * dt;

        let Some(t) = segment_sphere(start, shot.position, ship.position(), SHIP_HIT_RADIUS) else {
            return true;
        };
        let point = start + (shot.position - start) * t;
        let outcome = ship.take_damage(shot.damage, point);
        if outcome.shield_absorbed > 0.0 {
            events.push(GameEvent::ShieldHit {
                point,
                absorbed: outcome.shield_absorbed,
            });
        }
        if outcome.hull_damage > 0.0 {
            events.push(GameEvent::ShipHit {
                point,
                damage: outcome.hull_damage,
            });
        }
        false
    });
    !was_dead && ship.is_dead()
}

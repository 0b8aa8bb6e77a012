//! Per-enemy combat record: stats, behavior state, countdowns, transform.

use glam::DVec3;
use rand::Rng;

use starhand_core::constants::*;
use starhand_core::enums::{AiState, EnemyKind};
use starhand_core::types::{frame_blend, look_rotation, Transform};

use crate::fsm::{desired_velocity, select_state, SteeringContext};
use crate::profiles::{get_profile, EnemyProfile};

/// One enemy shot, handed to the orchestrator to spawn a projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackDescriptor {
    pub origin: DVec3,
    pub target: DVec3,
    pub damage: f64,
    pub kind: EnemyKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyAgent {
    pub kind: EnemyKind,
    pub profile: EnemyProfile,
    pub health: f64,
    pub state: AiState,
    /// Seconds spent in the current state.
    pub state_secs: f64,
    /// Seconds until the next shot is allowed.
    pub attack_cooldown_secs: f64,
    /// Seconds of hit flash remaining.
    pub hit_flash_secs: f64,
    /// Offset for the strafe and drift oscillators.
    pub drift_phase: f64,
    /// Seconds since spawn.
    pub age_secs: f64,
    pub transform: Transform,
}

impl EnemyAgent {
    pub fn new(kind: EnemyKind, position: DVec3, drift_phase: f64) -> Self {
        let profile = get_profile(kind);
        Self {
            kind,
            profile,
            health: profile.health,
            state: AiState::Idle,
            state_secs: 0.0,
            attack_cooldown_secs: 0.0,
            hit_flash_secs: 0.0,
            drift_phase,
            age_secs: 0.0,
            transform: Transform::at(position),
        }
    }

    /// New agent with a random oscillator phase.
    pub fn spawn<R: Rng>(kind: EnemyKind, position: DVec3, rng: &mut R) -> Self {
        let phase = rng.gen_range(0.0..std::f64::consts::TAU);
        Self::new(kind, position, phase)
    }

    pub fn position(&self) -> DVec3 {
        self.transform.position
    }

    pub fn health_fraction(&self) -> f64 {
        (self.health / self.profile.health).clamp(0.0, 1.0)
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn is_flashing(&self) -> bool {
        self.hit_flash_secs > 0.0
    }

    /// Advance one frame toward `target` (the player ship, if any).
    /// Returns true when the behavior state changed.
    pub fn update(&mut self, target: Option<DVec3>, dt: f64) -> bool {
        let new_state = match target {
            Some(t) => select_state(
                self.kind,
                &self.profile,
                self.transform.range_to(t),
                self.health_fraction(),
            ),
            None => AiState::Idle,
        };
        let changed = new_state != self.state;
        if changed {
            self.state = new_state;
            self.state_secs = 0.0;
        } else {
            self.state_secs += dt;
        }

        let desired = desired_velocity(&SteeringContext {
            state: self.state,
            position: self.transform.position,
            target,
            speed: self.profile.speed,
            attack_range: self.profile.attack_range,
            clock_secs: self.age_secs + self.drift_phase,
        });
        let blend = frame_blend(ENEMY_VELOCITY_BLEND, dt, TICK_RATE as f64);
        self.transform.velocity += (desired - self.transform.velocity) * blend;
        self.transform.integrate(dt);

        // Face the target unless moving away from it.
        let look = match target {
            Some(t) if !self.state.is_withdrawing() => t - self.transform.position,
            _ => self.transform.velocity,
        };
        if let Some(goal) = look_rotation(look) {
            let step = (self.profile.turn_speed * dt).min(1.0);
            self.transform.orientation = self.transform.orientation.slerp(goal, step).normalize();
        }

        self.attack_cooldown_secs = (self.attack_cooldown_secs - dt).max(0.0);
        self.hit_flash_secs = (self.hit_flash_secs - dt).max(0.0);
        self.age_secs += dt;
        changed
    }

    pub fn can_attack(&self, target: Option<DVec3>) -> bool {
        let Some(target) = target else {
            return false;
        };
        !self.is_dead()
            && self.attack_cooldown_secs <= 0.0
            && self.transform.range_to(target) <= self.profile.attack_range
            && self.state.is_attack_state()
    }

    /// Fire at `target` if allowed, restarting the cooldown.
    pub fn attack(&mut self, target: Option<DVec3>) -> Option<AttackDescriptor> {
        if !self.can_attack(target) {
            return None;
        }
        let target = target?;
        self.attack_cooldown_secs = self.profile.attack_cooldown_secs;
        Some(AttackDescriptor {
            origin: self.transform.position,
            target,
            damage: self.profile.damage,
            kind: self.kind,
        })
    }

    /// Apply damage and start the hit flash. Returns true when dead.
    pub fn take_damage(&mut self, amount: f64) -> bool {
        self.health -= amount;
        self.hit_flash_secs = ENEMY_HIT_FLASH_SECS;
        self.is_dead()
    }
}

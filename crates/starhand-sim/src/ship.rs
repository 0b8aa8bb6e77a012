//! Player ship controller.
//!
//! Converts the consumed gesture and aim point into ship motion and
//! abilities, and owns the hull/shield/energy pools.

use glam::{DQuat, DVec2, DVec3, EulerRot};

use starhand_core::constants::*;
use starhand_core::enums::Gesture;
use starhand_core::state::ShipView;
use starhand_core::types::Transform;

/// Result of applying damage to the ship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub dead: bool,
    /// Damage soaked by the shield pool.
    pub shield_absorbed: f64,
    /// Damage that reached the hull.
    pub hull_damage: f64,
    pub point: DVec3,
}

/// Abilities that started during one `update`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipActions {
    pub barrel_roll_started: bool,
    pub shield_raised: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShipState {
    pub transform: Transform,
    /// Presentation roll during a barrel roll (radians).
    pub roll_angle: f64,
    pub hull: f64,
    pub max_hull: f64,
    pub shield: f64,
    pub max_shield: f64,
    pub energy: f64,
    pub max_energy: f64,
    pub thrusting: bool,
    pub braking: bool,
    pub boosting: bool,
    pub invulnerable: bool,
    pub shield_active: bool,
    /// Seconds of barrel-roll invulnerability left.
    pub invulnerable_secs: f64,
    /// Seconds the raised shield may stay up.
    pub shield_secs: f64,
}

impl Default for ShipState {
    fn default() -> Self {
        Self::new()
    }
}

impl ShipState {
    /// Fresh session ship at the origin facing -Z.
    pub fn new() -> Self {
        Self {
            transform: Transform::default(),
            roll_angle: 0.0,
            hull: SHIP_MAX_HULL,
            max_hull: SHIP_MAX_HULL,
            shield: SHIP_MAX_SHIELD,
            max_shield: SHIP_MAX_SHIELD,
            energy: SHIP_MAX_ENERGY,
            max_energy: SHIP_MAX_ENERGY,
            thrusting: false,
            braking: false,
            boosting: false,
            invulnerable: false,
            shield_active: false,
            invulnerable_secs: 0.0,
            shield_secs: 0.0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn position(&self) -> DVec3 {
        self.transform.position
    }

    pub fn forward(&self) -> DVec3 {
        self.transform.forward()
    }

    /// Weapon muzzle in world space.
    pub fn nose(&self) -> DVec3 {
        self.transform.position + self.forward() * SHIP_NOSE_OFFSET
    }

    pub fn is_dead(&self) -> bool {
        self.hull <= 0.0
    }

    /// Deduct `amount` energy if available.
    pub fn spend_energy(&mut self, amount: f64) -> bool {
        if self.energy < amount {
            return false;
        }
        self.energy = (self.energy - amount).clamp(0.0, self.max_energy);
        true
    }

    /// Continuous drain, floored at zero.
    pub fn drain_energy(&mut self, amount: f64) {
        self.energy = (self.energy - amount).clamp(0.0, self.max_energy);
    }

    /// Advance one frame under `gesture` steering toward `aim`.
    pub fn update(&mut self, gesture: Gesture, aim: DVec2, dt: f64) -> ShipActions {
        let mut actions = ShipActions::default();
        self.tick_timers(dt);

        self.thrusting = false;
        self.braking = false;
        self.boosting = false;
        let forward = self.forward();

        match gesture {
            Gesture::Thrust => {
                self.transform.velocity += forward * SHIP_ACCELERATION * dt;
                self.transform.velocity = self.transform.velocity.clamp_length_max(SHIP_MAX_SPEED);
                self.thrusting = true;
            }
            Gesture::Brake => {
                self.transform.velocity *= (-SHIP_BRAKE_RATE * dt).exp();
                self.braking = true;
            }
            Gesture::Boost if self.energy > SHIP_BOOST_MIN_ENERGY => {
                self.transform.velocity +=
                    forward * SHIP_ACCELERATION * SHIP_BOOST_MULTIPLIER * dt;
                self.transform.velocity =
                    self.transform.velocity.clamp_length_max(SHIP_BOOST_MAX_SPEED);
                self.drain_energy(SHIP_BOOST_DRAIN * dt);
                self.boosting = true;
            }
            Gesture::BarrelRoll if !self.invulnerable => {
                if self.spend_energy(SHIP_BARREL_ROLL_COST) {
                    self.invulnerable = true;
                    self.invulnerable_secs = SHIP_BARREL_ROLL_SECS;
                    self.roll_angle = 0.0;
                    actions.barrel_roll_started = true;
                }
            }
            Gesture::Shield
                if !self.shield_active && self.energy >= SHIP_SHIELD_MIN_ENERGY =>
            {
                self.shield_active = true;
                self.shield_secs = SHIP_SHIELD_ACTIVE_SECS;
                actions.shield_raised = true;
            }
            _ => {}
        }

        // Drag only while no maneuver gesture is held.
        let maneuvering = matches!(
            gesture,
            Gesture::Thrust
                | Gesture::Brake
                | Gesture::Boost
                | Gesture::BarrelRoll
                | Gesture::Shield
        );
        if !maneuvering && !self.thrusting && !self.boosting {
            self.transform.velocity *= SHIP_IDLE_DRAG.powf(dt * TICK_RATE as f64);
        }

        self.steer(aim, dt);
        self.transform.integrate(dt);

        self.energy = (self.energy + SHIP_ENERGY_REGEN * dt).clamp(0.0, self.max_energy);
        self.shield = (self.shield + SHIP_SHIELD_REGEN * dt).min(self.max_shield);
        actions
    }

    /// Countdown the barrel roll and raised shield from earlier frames.
    fn tick_timers(&mut self, dt: f64) {
        if self.invulnerable {
            self.invulnerable_secs -= dt;
            if self.invulnerable_secs <= 0.0 {
                self.invulnerable = false;
                self.invulnerable_secs = 0.0;
                self.roll_angle = 0.0;
            } else {
                let progress = 1.0 - self.invulnerable_secs / SHIP_BARREL_ROLL_SECS;
                self.roll_angle = progress * std::f64::consts::TAU;
            }
        }

        if self.shield_active {
            self.shield_secs -= dt;
            self.drain_energy(SHIP_SHIELD_DRAIN * dt);
            if self.shield_secs <= 0.0 || self.energy <= 0.0 {
                self.shield_active = false;
                self.shield_secs = 0.0;
            }
        }
    }

    /// Slerp toward the yaw/pitch the aim point asks for.
    fn steer(&mut self, aim: DVec2, dt: f64) {
        let yaw = -(aim.x - 0.5) * 2.0 * SHIP_MAX_YAW;
        let pitch = -(aim.y - 0.5) * 2.0 * SHIP_MAX_PITCH;
        let target = DQuat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0);
        let step = (SHIP_TURN_RATE * dt).min(1.0);
        self.transform.orientation = self.transform.orientation.slerp(target, step).normalize();
    }

    /// Apply `amount` damage at `point`. The shield pool soaks first.
    pub fn take_damage(&mut self, amount: f64, point: DVec3) -> DamageOutcome {
        if self.invulnerable {
            return DamageOutcome {
                dead: false,
                shield_absorbed: 0.0,
                hull_damage: 0.0,
                point,
            };
        }
        let absorbed = self.shield.min(amount).max(0.0);
        self.shield -= absorbed;
        let hull_damage = amount - absorbed;
        self.hull -= hull_damage;
        DamageOutcome {
            dead: self.is_dead(),
            shield_absorbed: absorbed,
            hull_damage,
            point,
        }
    }

    /// HUD view of the ship.
    pub fn view(&self) -> ShipView {
        ShipView {
            position: self.transform.position,
            velocity: self.transform.velocity,
            orientation: self.transform.orientation,
            roll_angle: self.roll_angle,
            speed: self.transform.speed(),
            hull_fraction: (self.hull / self.max_hull).clamp(0.0, 1.0),
            shield_fraction: (self.shield / self.max_shield).clamp(0.0, 1.0),
            energy_fraction: (self.energy / self.max_energy).clamp(0.0, 1.0),
            thrusting: self.thrusting,
            braking: self.braking,
            boosting: self.boosting,
            invulnerable: self.invulnerable,
            shield_active: self.shield_active,
        }
    }
}

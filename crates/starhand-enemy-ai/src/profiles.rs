//! Kind-specific stat templates.
//!
//! Consolidates per-kind parameters for the enemy FSM and combat.

use starhand_core::enums::EnemyKind;

/// Fixed stat template for an enemy kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    /// Starting (and maximum) health.
    pub health: f64,
    /// Cruise speed (units/s).
    pub speed: f64,
    /// Orientation slerp rate toward the look target (1/s).
    pub turn_speed: f64,
    /// Damage per shot.
    pub damage: f64,
    /// Range inside which the enemy opens fire.
    pub attack_range: f64,
    /// Seconds between shots.
    pub attack_cooldown_secs: f64,
    /// 0 (timid) to 1 (reckless). Informational for presentation.
    pub aggressiveness: f64,
    /// Health fraction below which the kind breaks off.
    pub retreat_health_fraction: f64,
    /// Collision radius for player weapons.
    pub hit_radius: f64,
    /// Score awarded on kill.
    pub score_value: u32,
}

/// Get the stat profile for a given kind.
pub fn get_profile(kind: EnemyKind) -> EnemyProfile {
    match kind {
        EnemyKind::Vanguard => EnemyProfile {
            health: 60.0,
            speed: 120.0,
            turn_speed: 2.0,
            damage: 15.0,
            attack_range: 100.0,
            attack_cooldown_secs: 1.0,
            aggressiveness: 0.9,
            retreat_health_fraction: 0.2,
            hit_radius: 12.0,
            score_value: 150,
        },
        EnemyKind::Hunter => EnemyProfile {
            health: 80.0,
            speed: 100.0,
            turn_speed: 2.5,
            damage: 10.0,
            attack_range: 300.0,
            attack_cooldown_secs: 1.5,
            aggressiveness: 0.6,
            retreat_health_fraction: 0.3,
            hit_radius: 10.0,
            score_value: 200,
        },
        EnemyKind::Coward => EnemyProfile {
            health: 40.0,
            speed: 90.0,
            turn_speed: 3.0,
            damage: 8.0,
            attack_range: 500.0,
            attack_cooldown_secs: 2.5,
            aggressiveness: 0.2,
            retreat_health_fraction: 0.5,
            hit_radius: 8.0,
            score_value: 100,
        },
    }
}

//! Enemy behavior finite state machine.
//!
//! Pure functions that pick a behavior state from the situation and compute
//! the velocity that state wants. No ECS dependency; operates on plain data.

use glam::{DQuat, DVec3};

use starhand_core::constants::*;
use starhand_core::enums::{AiState, EnemyKind};

use crate::profiles::EnemyProfile;

/// Select the behavior state for one enemy. Evaluated every frame; the
/// first matching rule wins.
pub fn select_state(
    kind: EnemyKind,
    profile: &EnemyProfile,
    distance: f64,
    health_fraction: f64,
) -> AiState {
    let hurt = health_fraction < profile.retreat_health_fraction;
    match kind {
        EnemyKind::Vanguard => {
            if hurt {
                AiState::Kamikaze
            } else if distance < profile.attack_range {
                AiState::Ram
            } else if distance < VANGUARD_CHARGE_RANGE {
                AiState::Charge
            } else {
                AiState::Pursue
            }
        }
        EnemyKind::Hunter => {
            if hurt {
                AiState::Retreat
            } else if distance < HUNTER_EVADE_RANGE {
                AiState::Evade
            } else if distance < profile.attack_range {
                AiState::Strafe
            } else if distance < HUNTER_FLANK_RANGE {
                AiState::Flank
            } else {
                AiState::Pursue
            }
        }
        EnemyKind::Coward => {
            if hurt || distance < COWARD_FLEE_RANGE {
                AiState::Flee
            } else if distance < profile.attack_range {
                AiState::Snipe
            } else if distance < COWARD_APPROACH_RANGE {
                AiState::Approach
            } else {
                AiState::Idle
            }
        }
    }
}

/// Input to the steering function for a single enemy.
pub struct SteeringContext {
    pub state: AiState,
    pub position: DVec3,
    pub target: Option<DVec3>,
    pub speed: f64,
    pub attack_range: f64,
    /// Per-agent oscillator clock (seconds plus phase offset).
    pub clock_secs: f64,
}

/// Velocity the current state steers toward.
pub fn desired_velocity(ctx: &SteeringContext) -> DVec3 {
    let Some(target) = ctx.target else {
        return drift_velocity(ctx);
    };
    let offset = target - ctx.position;
    let distance = offset.length();
    let toward = offset.normalize_or_zero();
    let speed = ctx.speed;

    match ctx.state {
        AiState::Pursue | AiState::Charge => toward * speed,
        AiState::Ram | AiState::Kamikaze => toward * speed * ENEMY_RAM_SPEED_FACTOR,
        AiState::Strafe => {
            let side = strafe_axis(toward) * (ctx.clock_secs * ENEMY_STRAFE_FREQUENCY).sin();
            (side + toward * ENEMY_STRAFE_APPROACH_WEIGHT).normalize_or_zero()
                * speed
                * ENEMY_STRAFE_SPEED_FACTOR
        }
        AiState::Flank => DQuat::from_rotation_y(ENEMY_FLANK_ANGLE) * toward * speed,
        AiState::Evade | AiState::Flee | AiState::Retreat => -toward * speed,
        AiState::Snipe => {
            let near = ctx.attack_range * ENEMY_SNIPE_MIN_FACTOR;
            let far = ctx.attack_range * ENEMY_SNIPE_MAX_FACTOR;
            let nudge = speed * ENEMY_SNIPE_SPEED_FACTOR;
            if distance < near {
                -toward * nudge
            } else if distance > far {
                toward * nudge
            } else {
                DVec3::ZERO
            }
        }
        AiState::Approach => toward * speed * ENEMY_APPROACH_SPEED_FACTOR,
        AiState::Idle => drift_velocity(ctx),
    }
}

/// Horizontal axis perpendicular to `toward`; falls back to +X when the
/// target is straight above or below.
fn strafe_axis(toward: DVec3) -> DVec3 {
    toward.cross(DVec3::Y).try_normalize().unwrap_or(DVec3::X)
}

fn drift_velocity(ctx: &SteeringContext) -> DVec3 {
    let t = ctx.clock_secs;
    DVec3::new((t * 0.5).sin(), (t * 0.3).sin() * 0.3, (t * 0.5).cos())
        * ctx.speed
        * ENEMY_DRIFT_SPEED_FACTOR
}

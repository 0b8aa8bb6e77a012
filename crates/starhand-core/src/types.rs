//! Fundamental geometric and simulation types.

use glam::{DMat3, DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// Rigid-body transform shared by the ship and enemy agents.
/// +Y is up; a body's local forward axis is -Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: DVec3,
    pub velocity: DVec3,
    pub orientation: DQuat,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of frames simulated.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
        }
    }
}

impl Transform {
    /// Stationary transform at `position` facing -Z.
    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Unit forward vector in world space.
    pub fn forward(&self) -> DVec3 {
        self.orientation * DVec3::NEG_Z
    }

    /// Speed magnitude (units/s).
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Range to a world-space point.
    pub fn range_to(&self, point: DVec3) -> f64 {
        self.position.distance(point)
    }

    /// Explicit Euler step: position += velocity * dt.
    pub fn integrate(&mut self, dt: f64) {
        self.position += self.velocity * dt;
    }
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Rotation mapping local forward (-Z) onto `direction`, keeping +Y as up
/// where possible. `None` for a zero-length direction.
pub fn look_rotation(direction: DVec3) -> Option<DQuat> {
    let forward = direction.try_normalize()?;
    let up_hint = if forward.y.abs() > 0.999 {
        DVec3::Z
    } else {
        DVec3::Y
    };
    let right = forward.cross(up_hint).normalize();
    let up = right.cross(forward);
    Some(DQuat::from_mat3(&DMat3::from_cols(right, up, -forward)).normalize())
}

/// Frame-rate independent form of a per-frame blend factor tuned at
/// `reference_hz`: the fraction of the remaining gap closed over `dt`.
pub fn frame_blend(per_frame: f64, dt: f64, reference_hz: f64) -> f64 {
    1.0 - (1.0 - per_frame.clamp(0.0, 1.0)).powf(dt * reference_hz)
}

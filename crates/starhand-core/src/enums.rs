//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Discrete control symbol produced by the gesture classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gesture {
    /// No recognized pose (or no hands).
    #[default]
    Idle,
    /// Right open palm: accelerate forward.
    Thrust,
    /// Right fist: bleed off velocity.
    Brake,
    /// Right index pointing: steer only.
    Aim,
    /// Right pinch: fire the active weapon.
    FirePrimary,
    /// Left pinch: secondary action (weapon cycle).
    FireSecondary,
    /// Two open palms held wide apart.
    BarrelRoll,
    /// Two open palms held close together.
    Boost,
    /// Two fists held together.
    Shield,
}

impl Gesture {
    /// String representation for logs and collaborators.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Thrust => "thrust",
            Self::Brake => "brake",
            Self::Aim => "aim",
            Self::FirePrimary => "fire-primary",
            Self::FireSecondary => "fire-secondary",
            Self::BarrelRoll => "barrel-roll",
            Self::Boost => "boost",
            Self::Shield => "shield",
        }
    }
}

/// Which hand an observation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

/// Enemy type. Each kind has a fixed stat template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Always aggressive melee rusher.
    Vanguard,
    /// Tactical mid-range fighter.
    Hunter,
    /// Long-range sniper that keeps its distance.
    Coward,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [Self::Vanguard, Self::Hunter, Self::Coward];
}

/// Enemy AI behavior state. Recomputed every frame from distance and health.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiState {
    /// Slow independent drift, target out of interest range.
    #[default]
    Idle,
    Pursue,
    Charge,
    Ram,
    Kamikaze,
    Strafe,
    Flank,
    Evade,
    Retreat,
    Flee,
    Snipe,
    Approach,
}

impl AiState {
    /// States from which an enemy may open fire.
    pub fn is_attack_state(&self) -> bool {
        matches!(self, Self::Strafe | Self::Snipe | Self::Ram | Self::Kamikaze)
    }

    /// States that move directly away from the target.
    pub fn is_withdrawing(&self) -> bool {
        matches!(self, Self::Evade | Self::Flee | Self::Retreat)
    }
}

/// Player weapon slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Fast discrete slug, single target.
    #[default]
    Railgun,
    /// Continuous hitscan beam.
    Beam,
    /// Tethering projectile that reels its target in.
    Harpoon,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 3] = [Self::Railgun, Self::Beam, Self::Harpoon];

    /// Next slot in cycling order.
    pub fn next(&self) -> WeaponKind {
        match self {
            Self::Railgun => Self::Beam,
            Self::Beam => Self::Harpoon,
            Self::Harpoon => Self::Railgun,
        }
    }
}

/// Who fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileSource {
    Player(WeaponKind),
    Enemy(EnemyKind),
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    /// Between waves: the previous wave is cleared, the next one is pending.
    Intermission,
    GameOver,
}

//! Simulation constants and tuning parameters.
//!
//! Distances are in world units, times in seconds, energy/health in points.

/// Reference display frame rate (Hz). Per-frame tuning factors are
/// expressed at this rate and rescaled by the actual frame dt.
pub const TICK_RATE: u32 = 60;

/// Seconds per reference frame.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Largest dt accepted for one frame. Longer stalls are clamped.
pub const MAX_FRAME_DT: f64 = 0.1;

// --- Gesture classification ---

/// Number of landmarks per hand.
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Thumb-tip to index-tip distance, in palm sizes, below which a hand pinches.
pub const PINCH_THRESHOLD: f64 = 0.12;

/// A finger is extended when knuckle→tip exceeds this multiple of knuckle→mid-joint.
pub const FINGER_EXTENSION_RATIO: f64 = 1.2;

/// Minimum extended fingers (thumb excluded) for an open palm.
pub const OPEN_PALM_MIN_FINGERS: usize = 3;

/// Palm separation above which two open palms mean barrel roll.
pub const BARREL_ROLL_MIN_PALM_DISTANCE: f64 = 0.4;

/// Palm separation below which two open palms mean boost.
pub const BOOST_MAX_PALM_DISTANCE: f64 = 0.3;

/// Palm separation below which two fists mean shield.
pub const SHIELD_MAX_PALM_DISTANCE: f64 = 0.2;

/// Exponential blend factor applied to the aim point on every classified frame.
pub const AIM_SMOOTHING: f64 = 0.5;

/// How long a gesture survives momentary idle classifications while hands are visible.
pub const GESTURE_HOLD_SECS: f64 = 0.1;

/// Palm sizes at or below this are treated as degenerate landmark sets.
pub const MIN_PALM_SIZE: f64 = 1e-9;

// --- Ship ---

pub const SHIP_MAX_HULL: f64 = 100.0;
pub const SHIP_MAX_SHIELD: f64 = 50.0;
pub const SHIP_MAX_ENERGY: f64 = 100.0;

/// Forward acceleration while thrusting (units/s²).
pub const SHIP_ACCELERATION: f64 = 150.0;

/// Speed cap while thrusting (units/s).
pub const SHIP_MAX_SPEED: f64 = 200.0;

/// Acceleration multiplier while boosting.
pub const SHIP_BOOST_MULTIPLIER: f64 = 2.5;

/// Speed cap while boosting (units/s).
pub const SHIP_BOOST_MAX_SPEED: f64 = 400.0;

/// Energy required (strictly more than) to boost.
pub const SHIP_BOOST_MIN_ENERGY: f64 = 20.0;

/// Energy drained per second while boosting.
pub const SHIP_BOOST_DRAIN: f64 = 25.0;

/// Exponential velocity decay rate while braking (1/s).
pub const SHIP_BRAKE_RATE: f64 = 3.0;

/// Per-reference-frame velocity retention with no movement gesture.
pub const SHIP_IDLE_DRAG: f64 = 0.99;

/// Energy cost of a barrel roll.
pub const SHIP_BARREL_ROLL_COST: f64 = 20.0;

/// Invulnerability window granted by a barrel roll.
pub const SHIP_BARREL_ROLL_SECS: f64 = 0.5;

/// Energy required to raise the shield.
pub const SHIP_SHIELD_MIN_ENERGY: f64 = 10.0;

/// Energy drained per second while the shield is raised.
pub const SHIP_SHIELD_DRAIN: f64 = 20.0;

/// Maximum time the shield stays raised per activation.
pub const SHIP_SHIELD_ACTIVE_SECS: f64 = 3.0;

/// Energy regenerated per second.
pub const SHIP_ENERGY_REGEN: f64 = 10.0;

/// Shield points regenerated per second.
pub const SHIP_SHIELD_REGEN: f64 = 5.0;

/// Orientation slerp rate toward the aim target (1/s).
pub const SHIP_TURN_RATE: f64 = 3.0;

/// Yaw at the horizontal edge of the aim area (radians).
pub const SHIP_MAX_YAW: f64 = 0.8;

/// Pitch at the vertical edge of the aim area (radians).
pub const SHIP_MAX_PITCH: f64 = 0.5;

/// Collision radius of the player ship.
pub const SHIP_HIT_RADIUS: f64 = 15.0;

/// Distance from ship center to the weapon muzzle along forward.
pub const SHIP_NOSE_OFFSET: f64 = 10.0;

// --- Enemy AI ---

/// Vanguard switches from pursue to charge inside this range.
pub const VANGUARD_CHARGE_RANGE: f64 = 800.0;

/// Hunter evades inside this range.
pub const HUNTER_EVADE_RANGE: f64 = 150.0;

/// Hunter flanks inside this range.
pub const HUNTER_FLANK_RANGE: f64 = 600.0;

/// Coward flees inside this range regardless of health.
pub const COWARD_FLEE_RANGE: f64 = 200.0;

/// Coward approaches inside this range.
pub const COWARD_APPROACH_RANGE: f64 = 800.0;

/// Per-reference-frame blend of actual velocity toward desired velocity.
pub const ENEMY_VELOCITY_BLEND: f64 = 0.05;

/// Speed factor for ram and kamikaze runs.
pub const ENEMY_RAM_SPEED_FACTOR: f64 = 1.5;

/// Speed factor while strafing.
pub const ENEMY_STRAFE_SPEED_FACTOR: f64 = 0.8;

/// Weight of the approach component blended into the strafe orbit.
pub const ENEMY_STRAFE_APPROACH_WEIGHT: f64 = 0.2;

/// Strafe orbit angular frequency (rad/s).
pub const ENEMY_STRAFE_FREQUENCY: f64 = 1.5;

/// Flank approach rotation about +Y (radians).
pub const ENEMY_FLANK_ANGLE: f64 = std::f64::consts::FRAC_PI_3;

/// Speed factor for snipe range corrections.
pub const ENEMY_SNIPE_SPEED_FACTOR: f64 = 0.5;

/// Snipe hold band as fractions of attack range.
pub const ENEMY_SNIPE_MIN_FACTOR: f64 = 0.8;
pub const ENEMY_SNIPE_MAX_FACTOR: f64 = 1.2;

/// Speed factor while approaching.
pub const ENEMY_APPROACH_SPEED_FACTOR: f64 = 0.6;

/// Speed factor of the idle drift.
pub const ENEMY_DRIFT_SPEED_FACTOR: f64 = 0.2;

/// Duration of the hit flash after taking damage.
pub const ENEMY_HIT_FLASH_SECS: f64 = 0.1;

/// Speed of enemy shots (units/s).
pub const ENEMY_PROJECTILE_SPEED: f64 = 300.0;

/// Lifetime of enemy shots.
pub const ENEMY_PROJECTILE_TTL: f64 = 3.0;

// --- Weapons ---

pub const RAILGUN_COOLDOWN_SECS: f64 = 0.25;
pub const RAILGUN_ENERGY_COST: f64 = 5.0;
pub const RAILGUN_SPEED: f64 = 800.0;
pub const RAILGUN_DAMAGE: f64 = 25.0;
pub const RAILGUN_TTL: f64 = 2.0;

/// Energy drained per second while the beam is on.
pub const BEAM_ENERGY_DRAIN: f64 = 30.0;

/// Beam damage per second to the nearest enemy on the ray.
pub const BEAM_DPS: f64 = 60.0;

/// Beam reach.
pub const BEAM_MAX_RANGE: f64 = 600.0;

pub const HARPOON_COOLDOWN_SECS: f64 = 2.0;
pub const HARPOON_ENERGY_COST: f64 = 15.0;
pub const HARPOON_SPEED: f64 = 400.0;
pub const HARPOON_DAMAGE: f64 = 10.0;
pub const HARPOON_TTL: f64 = 5.0;

/// Speed at which an attached harpoon reels its target toward the ship.
pub const HARPOON_PULL_SPEED: f64 = 120.0;

// --- Waves ---

/// Waves with a precomputed configuration.
pub const PRECOMPUTED_WAVES: u32 = 20;

/// Base enemy count per wave.
pub const WAVE_BASE_ENEMIES: u32 = 3;

/// Additional enemies per wave number.
pub const WAVE_ENEMIES_PER_LEVEL: f64 = 0.8;

/// Spawn delay of wave 0 (ms); shrinks by `WAVE_SPAWN_DELAY_STEP_MS` per wave.
pub const WAVE_BASE_SPAWN_DELAY_MS: f64 = 2000.0;
pub const WAVE_SPAWN_DELAY_STEP_MS: f64 = 75.0;

/// Floor on the spawn delay, also used for endless waves (ms).
pub const WAVE_MIN_SPAWN_DELAY_MS: f64 = 500.0;

/// Every Nth wave is a boss wave.
pub const BOSS_WAVE_INTERVAL: u32 = 5;

/// Boss wave composition fractions.
pub const BOSS_VANGUARD_FRACTION: f64 = 0.5;
pub const BOSS_HUNTER_FRACTION: f64 = 0.3;

/// Enemies spawn within this many radians either side of the ship's forward.
pub const SPAWN_ARC_HALF_ANGLE: f64 = std::f64::consts::FRAC_PI_3;

/// Spawn distance band from the ship.
pub const SPAWN_MIN_DISTANCE: f64 = 600.0;
pub const SPAWN_MAX_DISTANCE: f64 = 900.0;

/// Vertical spawn jitter either side of the ship.
pub const SPAWN_HEIGHT_JITTER: f64 = 100.0;

/// Default pause between a cleared wave and the next one.
pub const WAVE_INTERMISSION_SECS: f64 = 3.0;

// --- Score ---

/// Bonus per cleared wave, multiplied by the wave number.
pub const WAVE_CLEAR_BONUS: u32 = 250;

/// Multiplier applied to the clear bonus of boss waves.
pub const BOSS_WAVE_BONUS_MULTIPLIER: u32 = 2;

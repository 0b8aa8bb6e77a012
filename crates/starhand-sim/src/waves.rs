//! Wave definitions: the precomputed table and endless synthesis.
//!
//! Composition is drawn from a seeded `ChaCha8Rng`, so a seed fully
//! determines every wave of a session.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starhand_core::constants::*;
use starhand_core::enums::EnemyKind;

/// One wave's spawn plan. Immutable once generated.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveConfig {
    pub wave: u32,
    /// Spawn requests in order.
    pub enemies: Vec<EnemyKind>,
    pub spawn_delay_secs: f64,
    pub is_boss: bool,
}

impl WaveConfig {
    pub fn enemy_count(&self) -> u32 {
        self.enemies.len() as u32
    }

    /// Enemies of `kind` in this wave.
    pub fn count_of(&self, kind: EnemyKind) -> usize {
        self.enemies.iter().filter(|k| **k == kind).count()
    }
}

/// Enemies in wave `wave`: 3 + ⌊0.8 × wave⌋.
pub fn enemy_count(wave: u32) -> u32 {
    WAVE_BASE_ENEMIES + (wave as f64 * WAVE_ENEMIES_PER_LEVEL).floor() as u32
}

pub fn spawn_delay_secs(wave: u32) -> f64 {
    let ms = (WAVE_BASE_SPAWN_DELAY_MS - WAVE_SPAWN_DELAY_STEP_MS * wave as f64)
        .max(WAVE_MIN_SPAWN_DELAY_MS);
    ms / 1000.0
}

pub fn is_boss_wave(wave: u32) -> bool {
    wave > 0 && wave % BOSS_WAVE_INTERVAL == 0
}

/// Percent weights (Coward, Hunter, Vanguard) for normal waves.
fn composition_weights(wave: u32) -> [(EnemyKind, u32); 3] {
    let (coward, hunter, vanguard) = match wave {
        0..=3 => (60, 30, 10),
        4..=8 => (35, 40, 25),
        _ => (20, 40, 40),
    };
    [
        (EnemyKind::Coward, coward),
        (EnemyKind::Hunter, hunter),
        (EnemyKind::Vanguard, vanguard),
    ]
}

fn roll_kind(wave: u32, rng: &mut ChaCha8Rng) -> EnemyKind {
    let weights = composition_weights(wave);
    let total: u32 = weights.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total);
    for (kind, weight) in weights {
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    EnemyKind::Coward
}

/// Independent per-enemy draws from the wave's band.
pub fn normal_composition(wave: u32, count: u32, rng: &mut ChaCha8Rng) -> Vec<EnemyKind> {
    (0..count).map(|_| roll_kind(wave, rng)).collect()
}

/// Fixed-ratio boss mix, uniformly shuffled.
pub fn boss_composition(count: u32, rng: &mut ChaCha8Rng) -> Vec<EnemyKind> {
    let n = count as f64;
    let vanguards = ((n * BOSS_VANGUARD_FRACTION).round() as u32).min(count);
    let hunters = ((n * BOSS_HUNTER_FRACTION).round() as u32).min(count - vanguards);
    let cowards = count - vanguards - hunters;

    let mut enemies = Vec::with_capacity(count as usize);
    enemies.extend(std::iter::repeat(EnemyKind::Vanguard).take(vanguards as usize));
    enemies.extend(std::iter::repeat(EnemyKind::Hunter).take(hunters as usize));
    enemies.extend(std::iter::repeat(EnemyKind::Coward).take(cowards as usize));
    enemies.shuffle(rng);
    enemies
}

/// Table entry for a precomputed wave.
pub fn generate_wave(wave: u32, rng: &mut ChaCha8Rng) -> WaveConfig {
    let count = enemy_count(wave);
    let is_boss = is_boss_wave(wave);
    let enemies = if is_boss {
        boss_composition(count, rng)
    } else {
        normal_composition(wave, count, rng)
    };
    WaveConfig {
        wave,
        enemies,
        spawn_delay_secs: spawn_delay_secs(wave),
        is_boss,
    }
}

/// Config for a wave with no table entry: normal composition at the
/// minimum spawn delay, never a boss.
pub fn synthesize_endless(wave: u32, rng: &mut ChaCha8Rng) -> WaveConfig {
    let count = enemy_count(wave);
    WaveConfig {
        wave,
        enemies: normal_composition(wave, count, rng),
        spawn_delay_secs: WAVE_MIN_SPAWN_DELAY_MS / 1000.0,
        is_boss: false,
    }
}

/// Precomputed configs for waves `1..=PRECOMPUTED_WAVES`.
#[derive(Debug, Clone, Default)]
pub struct WaveTable {
    waves: Vec<WaveConfig>,
}

impl WaveTable {
    pub fn generate(rng: &mut ChaCha8Rng) -> Self {
        Self {
            waves: (1..=PRECOMPUTED_WAVES)
                .map(|wave| generate_wave(wave, rng))
                .collect(),
        }
    }

    pub fn get(&self, wave: u32) -> Option<&WaveConfig> {
        let index = wave.checked_sub(1)? as usize;
        self.waves.get(index)
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }
}

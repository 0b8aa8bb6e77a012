//! Wave orchestration: owns the enemy world and spawns waves over time.
//!
//! The orchestrator reports whether the current wave is complete on every
//! frame; latching that into a single completion event is the engine's job.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use starhand_core::enums::EnemyKind;
use starhand_core::events::GameEvent;
use starhand_core::state::WaveView;

use starhand_enemy_ai::AttackDescriptor;

use crate::ship::ShipState;
use crate::systems::cleanup::{self, Kill};
use crate::systems::enemy_ai;
use crate::systems::enemy_fire::{self, EnemyProjectile};
use crate::waves::{synthesize_endless, WaveConfig, WaveTable};
use crate::weapons::entity_id;
use crate::world_setup;

/// What happened in the enemy half of one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveUpdate {
    /// Queue drained and every spawned enemy dead. Reported on every frame
    /// this holds.
    pub wave_complete: bool,
    pub kills: Vec<Kill>,
    /// The ship's hull reached zero this frame.
    pub ship_destroyed: bool,
}

pub struct WaveOrchestrator {
    world: World,
    table: WaveTable,
    wave: u32,
    config: Option<WaveConfig>,
    queue: VecDeque<EnemyKind>,
    /// Enemies of the current wave not yet killed, queued ones included.
    remaining: i32,
    spawn_clock_secs: f64,
    enemy_projectiles: Vec<EnemyProjectile>,
    despawn_buffer: Vec<Entity>,
    attack_buffer: Vec<AttackDescriptor>,
}

impl WaveOrchestrator {
    /// Empty orchestrator with a wave table drawn from `rng`.
    pub fn new(rng: &mut ChaCha8Rng) -> Self {
        Self {
            world: World::new(),
            table: WaveTable::generate(rng),
            wave: 0,
            config: None,
            queue: VecDeque::new(),
            remaining: 0,
            spawn_clock_secs: 0.0,
            enemy_projectiles: Vec::new(),
            despawn_buffer: Vec::new(),
            attack_buffer: Vec::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn config(&self) -> Option<&WaveConfig> {
        self.config.as_ref()
    }

    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn enemy_count(&self) -> u32 {
        self.world.len()
    }

    pub fn enemy_projectiles(&self) -> &[EnemyProjectile] {
        &self.enemy_projectiles
    }

    pub fn is_wave_complete(&self) -> bool {
        self.queue.is_empty() && self.remaining <= 0
    }

    /// Begin `wave`, or the one after the current wave. The first enemy
    /// spawns on the next update.
    pub fn start_wave(&mut self, wave: Option<u32>, rng: &mut ChaCha8Rng) -> &WaveConfig {
        let number = wave.unwrap_or(self.wave + 1).max(1);
        let config = match self.table.get(number) {
            Some(config) => config.clone(),
            None => {
                log::debug!("wave {number} past the table, using endless config");
                synthesize_endless(number, rng)
            }
        };
        self.install(config)
    }

    fn install(&mut self, config: WaveConfig) -> &WaveConfig {
        log::info!(
            "wave {} started: {} enemies{}",
            config.wave,
            config.enemy_count(),
            if config.is_boss { " (boss)" } else { "" }
        );
        self.wave = config.wave;
        self.remaining = config.enemy_count() as i32;
        self.queue = config.enemies.iter().copied().collect();
        self.spawn_clock_secs = config.spawn_delay_secs;
        self.config.insert(config)
    }

    /// Remove every enemy and enemy shot. The wave number is kept.
    pub fn clear(&mut self) {
        self.world.clear();
        self.enemy_projectiles.clear();
        self.queue.clear();
        self.remaining = 0;
    }

    /// Advance spawning, enemy AI, enemy fire, and kill accounting by one
    /// frame.
    pub fn update(
        &mut self,
        ship: &mut ShipState,
        dt: f64,
        rng: &mut ChaCha8Rng,
        events: &mut Vec<GameEvent>,
    ) -> WaveUpdate {
        if self.config.is_none() {
            let number = self.wave.max(1);
            log::warn!("no config loaded for wave {number}, synthesizing one");
            let config = self.install(synthesize_endless(number, rng));
            events.push(GameEvent::WaveStarted {
                wave: config.wave,
                is_boss: config.is_boss,
                enemy_count: config.enemy_count(),
            });
        }

        // 1. Spawn at most one queued enemy.
        self.spawn_clock_secs += dt;
        let delay = self.config.as_ref().map_or(0.0, |c| c.spawn_delay_secs);
        if self.spawn_clock_secs >= delay {
            if let Some(kind) = self.queue.pop_front() {
                let entity = world_setup::spawn_enemy(&mut self.world, rng, kind, &ship.transform);
                self.spawn_clock_secs = 0.0;
                log::debug!("spawned {kind:?} ({} queued)", self.queue.len());
                events.push(GameEvent::EnemySpawned {
                    enemy_id: entity_id(entity),
                    kind,
                });
            }
        }

        // 2. Enemy AI and attacks.
        self.attack_buffer.clear();
        enemy_ai::run(&mut self.world, Some(ship.position()), dt, &mut self.attack_buffer);
        for attack in &self.attack_buffer {
            events.push(GameEvent::EnemyAttack {
                kind: attack.kind,
                origin: attack.origin,
            });
            self.enemy_projectiles.push(EnemyProjectile::from_attack(attack));
        }

        // 3. Remove the dead.
        let mut kills = Vec::new();
        cleanup::run(&mut self.world, &mut self.despawn_buffer, &mut kills);
        for kill in &kills {
            self.remaining -= 1;
            events.push(GameEvent::EnemyKilled {
                enemy_id: entity_id(kill.entity),
                kind: kill.kind,
                score: kill.score_value,
            });
        }

        // 4. Enemy shots against the ship.
        let ship_destroyed = enemy_fire::run(&mut self.enemy_projectiles, ship, dt, events);

        WaveUpdate {
            wave_complete: self.is_wave_complete(),
            kills,
            ship_destroyed,
        }
    }

    pub fn view(&self) -> WaveView {
        WaveView {
            number: self.wave,
            is_boss: self.config.as_ref().is_some_and(|c| c.is_boss),
            remaining: self.remaining,
            queued: self.queue.len() as u32,
        }
    }
}

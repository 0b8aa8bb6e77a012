//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the ship, weapons, wave orchestrator, and score,
//! processes player commands, runs one frame in fixed order, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use starhand_core::commands::PlayerCommand;
use starhand_core::constants::*;
use starhand_core::enums::{GamePhase, Gesture, WeaponKind};
use starhand_core::error::ConfigError;
use starhand_core::events::GameEvent;
use starhand_core::state::GameStateSnapshot;
use starhand_core::types::SimTime;

use starhand_gesture::GestureState;

use crate::score::ScoreState;
use crate::ship::ShipState;
use crate::systems;
use crate::systems::snapshot::SnapshotSources;
use crate::systems::wave_spawner::WaveOrchestrator;
use crate::weapons::{entity_id, WeaponSystem};

/// Configuration for a simulation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    /// Pause between a cleared wave and the next.
    pub wave_intermission_secs: f64,
    /// Wave a new session starts on.
    pub starting_wave: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            wave_intermission_secs: WAVE_INTERMISSION_SECS,
            starting_wave: 1,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.time_scale.is_finite() || !(0.0..=4.0).contains(&self.time_scale) {
            return Err(ConfigError::InvalidTimeScale(self.time_scale));
        }
        if !self.wave_intermission_secs.is_finite() || self.wave_intermission_secs < 0.0 {
            return Err(ConfigError::InvalidIntermission(self.wave_intermission_secs));
        }
        if self.starting_wave == 0 {
            return Err(ConfigError::InvalidStartingWave(self.starting_wave));
        }
        Ok(())
    }
}

/// Per-frame input: the latest published gesture and the frame time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub gesture: GestureState,
    pub dt_secs: f64,
}

/// The simulation engine. Owns all session state.
pub struct SimulationEngine {
    config: SimConfig,
    time: SimTime,
    phase: GamePhase,
    /// Phase to return to on resume.
    paused_from: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,
    /// Gesture consumed on the previous frame.
    gesture: GestureState,
    ship: ShipState,
    weapons: WeaponSystem,
    waves: WaveOrchestrator,
    score: ScoreState,
    /// Completion already credited for the current wave.
    wave_cleared: bool,
    intermission_remaining_secs: f64,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let waves = WaveOrchestrator::new(&mut rng);
        Self {
            time: SimTime::default(),
            phase: GamePhase::default(),
            paused_from: GamePhase::Active,
            time_scale: config.time_scale,
            rng,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            gesture: GestureState::default(),
            ship: ShipState::new(),
            weapons: WeaponSystem::new(),
            waves,
            score: ScoreState::default(),
            wave_cleared: false,
            intermission_remaining_secs: 0.0,
            config,
        }
    }

    /// Queue a player command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Run one display frame and return the resulting snapshot.
    pub fn update(&mut self, input: FrameInput) -> GameStateSnapshot {
        self.process_commands();

        if matches!(self.phase, GamePhase::Active | GamePhase::Intermission) {
            let frame_dt = if input.dt_secs.is_finite() {
                input.dt_secs.clamp(0.0, MAX_FRAME_DT)
            } else {
                0.0
            };
            let dt = frame_dt * self.time_scale;
            self.run_frame(input.gesture, dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            SnapshotSources {
                time: &self.time,
                phase: self.phase,
                gesture: &self.gesture,
                ship: &self.ship,
                weapons: &self.weapons,
                waves: &self.waves,
                score: &self.score,
            },
            events,
        )
    }

    /// Run one reference-rate frame.
    pub fn tick(&mut self, gesture: GestureState) -> GameStateSnapshot {
        self.update(FrameInput {
            gesture,
            dt_secs: DT,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn ship(&self) -> &ShipState {
        &self.ship
    }

    pub fn weapons(&self) -> &WeaponSystem {
        &self.weapons
    }

    pub fn waves(&self) -> &WaveOrchestrator {
        &self.waves
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    #[cfg(test)]
    pub fn ship_mut(&mut self) -> &mut ShipState {
        &mut self.ship
    }

    #[cfg(test)]
    pub fn waves_mut(&mut self) -> &mut WaveOrchestrator {
        &mut self.waves
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => {
                if self.phase == GamePhase::MainMenu {
                    self.start_session();
                }
            }
            PlayerCommand::Pause => {
                if matches!(self.phase, GamePhase::Active | GamePhase::Intermission) {
                    self.paused_from = self.phase;
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = self.paused_from;
                }
            }
            PlayerCommand::Restart => {
                log::info!("restarting session");
                self.start_session();
            }
            PlayerCommand::SelectWeapon { weapon } => {
                self.select_weapon(weapon);
            }
            PlayerCommand::SetTimeScale { scale } => {
                if scale.is_finite() {
                    self.time_scale = scale.clamp(0.0, 4.0);
                }
            }
        }
    }

    /// Reset every subsystem from the configured seed and begin the
    /// starting wave.
    fn start_session(&mut self) {
        log::info!(
            "session started (seed {}, wave {})",
            self.config.seed,
            self.config.starting_wave
        );
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.time = SimTime::default();
        self.gesture = GestureState::default();
        self.ship.reset();
        self.weapons = WeaponSystem::new();
        self.waves = WaveOrchestrator::new(&mut self.rng);
        self.score = ScoreState::default();
        self.intermission_remaining_secs = 0.0;
        self.phase = GamePhase::Active;
        self.start_wave(Some(self.config.starting_wave));
    }

    fn start_wave(&mut self, wave: Option<u32>) {
        let config = self.waves.start_wave(wave, &mut self.rng);
        self.events.push(GameEvent::WaveStarted {
            wave: config.wave,
            is_boss: config.is_boss,
            enemy_count: config.enemy_count(),
        });
        self.wave_cleared = false;
    }

    fn select_weapon(&mut self, weapon: WeaponKind) {
        if self.weapons.select_weapon(weapon) {
            self.events.push(GameEvent::WeaponSelected { weapon });
        }
    }

    /// One frame in fixed order: gesture, ship, weapons, enemies, wave cycle.
    fn run_frame(&mut self, input: GestureState, dt: f64) {
        let gesture = input.gesture;
        let previous = self.gesture.gesture;
        let onset = gesture != previous;
        if onset {
            self.events.push(GameEvent::GestureChanged {
                new: gesture,
                old: previous,
            });
        }
        self.gesture = input;

        // 1. Ship
        let actions = self.ship.update(gesture, input.aim, dt);
        if actions.barrel_roll_started {
            self.events.push(GameEvent::BarrelRoll);
        }
        if actions.shield_raised {
            self.events.push(GameEvent::ShieldRaised);
        }

        // 2. Weapon triggers
        self.apply_weapon_gesture(gesture, onset);

        // 3. Player projectiles and beam
        let hits = self.weapons.update(&mut self.ship, self.waves.world_mut(), dt);
        for hit in hits.iter().filter(|hit| hit.attached) {
            self.events.push(GameEvent::HarpoonAttached {
                enemy_id: entity_id(hit.enemy),
            });
        }

        // 4. Spawning, enemy AI, enemy fire
        let update = self
            .waves
            .update(&mut self.ship, dt, &mut self.rng, &mut self.events);
        for kill in &update.kills {
            self.score.record_kill(kill.kind, kill.score_value);
        }
        if update.ship_destroyed {
            self.game_over();
            return;
        }

        // 5. Wave completion and intermission
        self.advance_wave_cycle(update.wave_complete, dt);
    }

    fn apply_weapon_gesture(&mut self, gesture: Gesture, onset: bool) {
        match gesture {
            Gesture::FireSecondary if onset => {
                let next = self.weapons.active().next();
                self.select_weapon(next);
            }
            Gesture::FirePrimary => {
                let weapon = self.weapons.active();
                // The beam arms once per trigger pull; a depleted beam stays
                // off until the gesture is released and made again.
                let fired = if weapon == WeaponKind::Beam {
                    onset
                        && !self.weapons.beam_active()
                        && self.weapons.set_beam_active(true, &self.ship)
                } else {
                    self.weapons.fire_primary(&mut self.ship)
                };
                if fired {
                    self.score.shots_fired += 1;
                    self.events.push(GameEvent::WeaponFired { weapon });
                }
            }
            _ => {
                if self.weapons.beam_active() {
                    self.weapons.set_beam_active(false, &self.ship);
                }
            }
        }
    }

    /// Latch the orchestrator's completion signal into one `WaveComplete`
    /// per wave, then count down the intermission.
    fn advance_wave_cycle(&mut self, wave_complete: bool, dt: f64) {
        match self.phase {
            GamePhase::Intermission => {
                self.intermission_remaining_secs -= dt;
                if self.intermission_remaining_secs <= 0.0 {
                    self.phase = GamePhase::Active;
                    self.start_wave(None);
                }
            }
            GamePhase::Active if wave_complete && !self.wave_cleared => {
                self.wave_cleared = true;
                let wave = self.waves.wave();
                let is_boss = self.waves.config().is_some_and(|c| c.is_boss);
                let bonus = self.score.record_wave_clear(wave, is_boss);
                log::info!("wave {wave} complete, bonus {bonus}");
                self.events.push(GameEvent::WaveComplete { wave, bonus });
                self.intermission_remaining_secs = self.config.wave_intermission_secs;
                self.phase = GamePhase::Intermission;
            }
            _ => {}
        }
    }

    fn game_over(&mut self) {
        log::info!(
            "ship destroyed on wave {} with score {}",
            self.waves.wave(),
            self.score.score
        );
        self.events.push(GameEvent::ShipDestroyed);
        self.weapons.cleanup();
        self.phase = GamePhase::GameOver;
    }
}

//! Application state shared between the driver, the landmark feed, and the
//! game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};

use starhand_core::commands::PlayerCommand;
use starhand_core::state::GameStateSnapshot;
use starhand_gesture::shared::SharedGesture;
use starhand_sim::SimConfig;

use crate::game_loop;

/// Commands sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// - `command_tx` is `None` until `start` spawns the loop.
/// - `latest_snapshot` is written by the loop after every frame.
/// - `gesture` is written by whatever feeds hand landmarks.
pub struct AppState {
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub gesture: SharedGesture,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            gesture: SharedGesture::new(),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.command_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Spawn the game loop if it is not already running.
    pub fn start(&self, config: SimConfig) -> Result<(), String> {
        let mut tx_lock = self.command_tx.lock().map_err(|e| e.to_string())?;
        if tx_lock.is_some() {
            return Err("Simulation already running".into());
        }
        let cmd_tx = game_loop::spawn_game_loop(
            config,
            self.gesture.clone(),
            self.latest_snapshot.clone(),
        )
        .map_err(|e| format!("Failed to spawn game loop: {e}"))?;
        *tx_lock = Some(cmd_tx);
        Ok(())
    }

    /// Forward a player command to the running simulation.
    pub fn send_command(&self, command: PlayerCommand) -> Result<(), String> {
        let tx_lock = self.command_tx.lock().map_err(|e| e.to_string())?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::PlayerCommand(command))
                .map_err(|e| format!("Failed to send command: {e}")),
            None => Err("Simulation not started".into()),
        }
    }

    /// Latest snapshot, if the loop has produced one.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Ask the loop to stop. Further commands fail until `start` is called again.
    pub fn shutdown(&self) {
        let mut tx_lock = self
            .command_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(tx) = tx_lock.take() {
            let _ = tx.send(GameLoopCommand::Shutdown);
        }
    }
}

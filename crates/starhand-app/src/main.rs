use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use starhand_app::feed::{self, ScriptedFeed};
use starhand_app::state::AppState;
use starhand_core::commands::PlayerCommand;
use starhand_sim::SimConfig;

/// Seconds to run when `STARHAND_RUN_SECS` is unset.
const DEFAULT_RUN_SECS: u64 = 30;

fn load_config() -> SimConfig {
    let Ok(path) = std::env::var("STARHAND_CONFIG") else {
        return SimConfig::default();
    };
    let loaded = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|text| SimConfig::from_json(&text).map_err(|e| e.to_string()));
    match loaded {
        Ok(config) => {
            log::info!("loaded config from {path}");
            config
        }
        Err(err) => {
            log::warn!("ignoring config {path}: {err}; using defaults");
            SimConfig::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config();
    let run_secs = std::env::var("STARHAND_RUN_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RUN_SECS);

    let state = AppState::new();
    let stop = Arc::new(AtomicBool::new(false));
    let feed_handle =
        match feed::spawn_landmark_feed(ScriptedFeed::demo(), state.gesture.clone(), stop.clone()) {
            Ok(handle) => handle,
            Err(err) => {
                log::error!("failed to start landmark feed: {err}");
                return;
            }
        };

    if let Err(err) = state.start(config) {
        log::error!("{err}");
        stop.store(true, Ordering::Relaxed);
        return;
    }
    if let Err(err) = state.send_command(PlayerCommand::StartGame) {
        log::error!("{err}");
    }

    std::thread::sleep(Duration::from_secs(run_secs));

    if let Some(snapshot) = state.snapshot() {
        log::info!(
            "final: phase {:?}, wave {}, score {}, kills {}, hull {:.0}%",
            snapshot.phase,
            snapshot.wave.number,
            snapshot.score.score,
            snapshot.score.kills,
            snapshot.ship.hull_fraction * 100.0
        );
    }

    state.shutdown();
    stop.store(true, Ordering::Relaxed);
    if feed_handle.join().is_err() {
        log::warn!("landmark feed thread panicked");
    }
}

//! Simulation engine for STARHAND.
//!
//! Ship controller, weapon/projectile system, wave orchestrator, and the
//! engine that runs them once per display frame and produces
//! GameStateSnapshots for the presentation layer.

pub mod collision;
pub mod engine;
pub mod score;
pub mod ship;
pub mod systems;
pub mod waves;
pub mod weapons;
pub mod world_setup;

pub use engine::{FrameInput, SimConfig, SimulationEngine};
pub use starhand_core as core;

#[cfg(test)]
mod tests;

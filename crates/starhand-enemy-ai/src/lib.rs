//! Enemy AI for STARHAND.
//!
//! Per-kind stat profiles, the behavior state machine, and the
//! `EnemyAgent` combat record driven by the wave orchestrator.

pub mod agent;
pub mod fsm;
pub mod profiles;

pub use agent::{AttackDescriptor, EnemyAgent};
pub use starhand_core as core;

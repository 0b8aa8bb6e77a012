//! Core types and definitions for the STARHAND combat core.
//!
//! This crate defines the vocabulary shared across all other crates:
//! gestures, enemy and weapon kinds, commands, state snapshots, events,
//! constants, and the configuration error type. It has no dependency on
//! any rendering or runtime framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

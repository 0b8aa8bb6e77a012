//! Configuration errors.
//!
//! Gameplay never fails: unavailable input, missing energy, and vanished
//! targets are all recovered inside the frame. Only loading a session
//! configuration can be rejected.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for `SimConfig`.
    Parse(String),
    /// Time scale outside `0.0..=4.0` or not finite.
    InvalidTimeScale(f64),
    /// Negative or non-finite intermission.
    InvalidIntermission(f64),
    /// Wave numbers start at 1.
    InvalidStartingWave(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::InvalidTimeScale(scale) => {
                write!(f, "time scale out of range: {scale} (allowed 0.0..=4.0)")
            }
            Self::InvalidIntermission(secs) => {
                write!(f, "wave intermission must be a non-negative duration, got {secs}")
            }
            Self::InvalidStartingWave(wave) => {
                write!(f, "starting wave must be at least 1, got {wave}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

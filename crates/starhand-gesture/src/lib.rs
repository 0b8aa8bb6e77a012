//! Gesture classification for STARHAND.
//!
//! Turns per-frame hand landmark sets into a single control gesture plus a
//! smoothed aim point. Pure data in, pure data out: no camera, no model,
//! no clock. The landmark model itself is an external collaborator.

pub mod classifier;
pub mod landmarks;
pub mod shared;
pub mod synthetic;

pub use classifier::{GestureClassifier, GestureState, GestureUpdate};
pub use landmarks::{HandFrame, HandObservation};
pub use starhand_core as core;

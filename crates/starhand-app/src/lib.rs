//! STARHAND headless driver.
//!
//! Wires the gesture classifier and the simulation together: a scripted
//! landmark feed stands in for the camera, and a fixed-rate game loop
//! consumes whatever gesture was published last.

pub mod feed;
pub mod game_loop;
pub mod state;

pub use starhand_core as core;

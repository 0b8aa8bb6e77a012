//! Hand-off point between the hand-tracking callback stream and the frame loop.
//!
//! The tracker thread publishes whole `GestureState` values; the frame loop
//! copies out whichever value was written last. No partial updates are
//! ever visible.

use std::sync::{Arc, Mutex, PoisonError};

use crate::classifier::GestureState;

/// Last-writer-wins slot shared between threads.
#[derive(Debug, Clone, Default)]
pub struct SharedGesture {
    inner: Arc<Mutex<GestureState>>,
}

impl SharedGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the published state.
    pub fn publish(&self, state: GestureState) {
        // The value is Copy and stored in one assignment; poisoning never tears it.
        let mut slot = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = state;
    }

    /// Copy of the most recently published state.
    pub fn latest(&self) -> GestureState {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

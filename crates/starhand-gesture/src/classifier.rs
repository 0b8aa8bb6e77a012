//! Gesture priority chain and temporal smoothing.
//!
//! Raw classification is a pure function of the current frame's hands.
//! `GestureClassifier` layers the only carried state on top: the aim
//! low-pass filter and the hold timers that suppress one-frame dropouts.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use starhand_core::constants::*;
use starhand_core::enums::Gesture;

use crate::landmarks::{HandFeatures, HandFrame};

/// Published gesture state, replaced as a whole every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureState {
    pub gesture: Gesture,
    /// Seconds the current gesture has been continuously output.
    pub hold_secs: f64,
    /// Smoothed aim point in [0,1]².
    pub aim: DVec2,
}

impl Default for GestureState {
    fn default() -> Self {
        Self {
            gesture: Gesture::Idle,
            hold_secs: 0.0,
            aim: DVec2::splat(0.5),
        }
    }
}

impl GestureState {
    /// A state holding `gesture` with a centered aim.
    pub fn with_gesture(gesture: Gesture) -> Self {
        Self {
            gesture,
            ..Default::default()
        }
    }
}

/// Gesture transition between two consecutive frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureChange {
    pub new: Gesture,
    pub old: Gesture,
}

/// Result of classifying one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureUpdate {
    pub state: GestureState,
    /// Set only on frames where the gesture differs from the previous frame.
    pub change: Option<GestureChange>,
}

/// Features for both hand slots of one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameFeatures {
    pub left: Option<HandFeatures>,
    pub right: Option<HandFeatures>,
}

impl FrameFeatures {
    pub fn from_frame(frame: &HandFrame) -> Self {
        Self {
            left: frame.left.as_ref().map(|h| h.features()),
            right: frame.right.as_ref().map(|h| h.features()),
        }
    }
}

/// Classify a frame with no temporal state. First match wins:
/// two-hand gestures, then right hand, then left hand, then idle.
pub fn classify_hands(frame: &HandFrame) -> Gesture {
    classify_features(&FrameFeatures::from_frame(frame))
}

pub fn classify_features(features: &FrameFeatures) -> Gesture {
    if let (Some(left), Some(right)) = (&features.left, &features.right) {
        if let Some(gesture) = classify_two_hands(left, right) {
            return gesture;
        }
    }
    if let Some(gesture) = features.right.as_ref().and_then(classify_right) {
        return gesture;
    }
    if let Some(gesture) = features.left.as_ref().and_then(classify_left) {
        return gesture;
    }
    Gesture::Idle
}

fn classify_two_hands(left: &HandFeatures, right: &HandFeatures) -> Option<Gesture> {
    let palm_distance = left
        .palm_center
        .truncate()
        .distance(right.palm_center.truncate());
    let both_open = left.is_open_palm() && right.is_open_palm();
    let both_fists = left.is_fist() && right.is_fist();

    if both_open && palm_distance > BARREL_ROLL_MIN_PALM_DISTANCE {
        Some(Gesture::BarrelRoll)
    } else if both_open && palm_distance < BOOST_MAX_PALM_DISTANCE {
        Some(Gesture::Boost)
    } else if both_fists && palm_distance < SHIELD_MAX_PALM_DISTANCE {
        Some(Gesture::Shield)
    } else {
        None
    }
}

fn classify_right(hand: &HandFeatures) -> Option<Gesture> {
    if hand.is_pinching() {
        Some(Gesture::FirePrimary)
    } else if hand.is_fist() {
        Some(Gesture::Brake)
    } else if hand.is_open_palm() {
        Some(Gesture::Thrust)
    } else if hand.is_pointing() {
        Some(Gesture::Aim)
    } else {
        None
    }
}

fn classify_left(hand: &HandFeatures) -> Option<Gesture> {
    hand.is_pinching().then_some(Gesture::FireSecondary)
}

/// Stateful classifier: raw classification plus aim smoothing and
/// flicker suppression.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    state: GestureState,
    /// Time since the held gesture was last produced by raw classification.
    since_detected_secs: f64,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest output.
    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Classify one camera frame. `dt_secs` is the time since the previous call.
    pub fn classify(&mut self, frame: &HandFrame, dt_secs: f64) -> GestureUpdate {
        let dt = dt_secs.max(0.0);
        let features = FrameFeatures::from_frame(frame);
        let raw = classify_features(&features);
        let previous = self.state.gesture;

        let gesture = if frame.is_empty() {
            Gesture::Idle
        } else if raw == Gesture::Idle && previous != Gesture::Idle {
            // Hands still visible: ride out brief misclassifications.
            self.since_detected_secs += dt;
            if self.since_detected_secs < GESTURE_HOLD_SECS {
                previous
            } else {
                Gesture::Idle
            }
        } else {
            self.since_detected_secs = 0.0;
            raw
        };

        let hold_secs = if gesture == previous {
            self.state.hold_secs + dt
        } else {
            0.0
        };

        let aim = match &features.right {
            Some(right) => smooth_aim(self.state.aim, right.aim_target()),
            None => self.state.aim,
        };

        self.state = GestureState {
            gesture,
            hold_secs,
            aim,
        };

        let change = (gesture != previous).then(|| {
            log::debug!("gesture {} -> {}", previous.as_str(), gesture.as_str());
            GestureChange {
                new: gesture,
                old: previous,
            }
        });

        GestureUpdate {
            state: self.state,
            change,
        }
    }
}

/// One step of the aim low-pass filter, clamped to the unit square.
pub fn smooth_aim(current: DVec2, target: DVec2) -> DVec2 {
    (current + (target - current) * AIM_SMOOTHING).clamp(DVec2::ZERO, DVec2::ONE)
}

//! Scripted landmark feed standing in for the camera and hand tracker.
//!
//! Replays a looping script of synthetic hand poses through the gesture
//! classifier on its own thread and publishes each result to the shared
//! gesture slot, the same way a tracker callback would.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use glam::DVec2;

use starhand_core::enums::Handedness;
use starhand_gesture::shared::SharedGesture;
use starhand_gesture::synthetic::{synthetic_hand, HandPose};
use starhand_gesture::{GestureClassifier, HandFrame};

/// Rate the tracker delivers frames at.
pub const FEED_RATE_HZ: u32 = 30;

/// One hand in a script step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandSpec {
    pub handedness: Handedness,
    pub center: DVec2,
    pub pose: HandPose,
}

impl HandSpec {
    pub fn right(x: f64, y: f64, pose: HandPose) -> Self {
        Self {
            handedness: Handedness::Right,
            center: DVec2::new(x, y),
            pose,
        }
    }

    pub fn left(x: f64, y: f64, pose: HandPose) -> Self {
        Self {
            handedness: Handedness::Left,
            center: DVec2::new(x, y),
            pose,
        }
    }
}

/// Hands held for `duration_secs`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStep {
    pub label: &'static str,
    pub duration_secs: f64,
    pub hands: Vec<HandSpec>,
}

impl ScriptStep {
    fn new(label: &'static str, duration_secs: f64, hands: Vec<HandSpec>) -> Self {
        Self {
            label,
            duration_secs,
            hands,
        }
    }

    pub fn frame(&self) -> HandFrame {
        HandFrame::from_observations(
            self.hands
                .iter()
                .map(|h| synthetic_hand(h.handedness, h.center, h.pose)),
        )
    }
}

/// Looping playback over a script.
#[derive(Debug, Clone)]
pub struct ScriptedFeed {
    script: Vec<ScriptStep>,
    index: usize,
    step_elapsed_secs: f64,
}

impl ScriptedFeed {
    pub fn new(script: Vec<ScriptStep>) -> Self {
        Self {
            script,
            index: 0,
            step_elapsed_secs: 0.0,
        }
    }

    /// A pass through every control gesture.
    pub fn demo() -> Self {
        use HandPose::*;
        Self::new(vec![
            ScriptStep::new("cruise", 2.0, vec![HandSpec::right(0.5, 0.5, OpenPalm)]),
            ScriptStep::new("aim", 1.5, vec![HandSpec::right(0.7, 0.4, Point)]),
            ScriptStep::new("fire", 2.0, vec![HandSpec::right(0.7, 0.4, Pinch)]),
            ScriptStep::new("cycle weapon", 0.3, vec![HandSpec::left(0.3, 0.5, Pinch)]),
            ScriptStep::new("hands down", 0.5, vec![]),
            ScriptStep::new("beam", 1.5, vec![HandSpec::right(0.5, 0.5, Pinch)]),
            ScriptStep::new(
                "barrel roll",
                0.3,
                vec![HandSpec::left(0.2, 0.5, OpenPalm), HandSpec::right(0.8, 0.5, OpenPalm)],
            ),
            ScriptStep::new(
                "boost",
                1.5,
                vec![HandSpec::left(0.45, 0.5, OpenPalm), HandSpec::right(0.55, 0.5, OpenPalm)],
            ),
            ScriptStep::new(
                "shield",
                0.5,
                vec![HandSpec::left(0.45, 0.5, Fist), HandSpec::right(0.55, 0.5, Fist)],
            ),
            ScriptStep::new("brake", 1.0, vec![HandSpec::right(0.5, 0.5, Fist)]),
        ])
    }

    pub fn current(&self) -> Option<&ScriptStep> {
        self.script.get(self.index)
    }

    /// Advance by `dt_secs` and return the hands visible at the new time.
    pub fn next_frame(&mut self, dt_secs: f64) -> HandFrame {
        if self.script.is_empty() {
            return HandFrame::empty();
        }
        self.step_elapsed_secs += dt_secs.max(0.0);
        for _ in 0..self.script.len() {
            let duration = self.script[self.index].duration_secs;
            if self.step_elapsed_secs < duration {
                break;
            }
            self.step_elapsed_secs -= duration;
            self.index = (self.index + 1) % self.script.len();
            log::debug!("feed step: {}", self.script[self.index].label);
        }
        self.script[self.index].frame()
    }
}

/// Run `feed` through a classifier on a new thread until `stop` is set.
pub fn spawn_landmark_feed(
    mut feed: ScriptedFeed,
    gesture: SharedGesture,
    stop: Arc<AtomicBool>,
) -> io::Result<JoinHandle<()>> {
    let period = Duration::from_nanos(1_000_000_000 / FEED_RATE_HZ as u64);
    std::thread::Builder::new()
        .name("starhand-landmark-feed".into())
        .spawn(move || {
            let mut classifier = GestureClassifier::new();
            let mut last = Instant::now();
            while !stop.load(Ordering::Relaxed) {
                let now = Instant::now();
                let dt = (now - last).as_secs_f64();
                last = now;

                let frame = feed.next_frame(dt);
                let update = classifier.classify(&frame, dt);
                if let Some(change) = update.change {
                    log::debug!("gesture {:?} -> {:?}", change.old, change.new);
                }
                gesture.publish(update.state);

                std::thread::sleep(period);
            }
        })
}

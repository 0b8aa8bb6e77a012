//! Canonical synthetic hand poses.
//!
//! Used by the headless driver's scripted feed and by tests. Offsets are
//! laid out for a right hand in image space (y down); left hands mirror x.

use glam::{DVec2, DVec3};

use starhand_core::constants::HAND_LANDMARK_COUNT;
use starhand_core::enums::Handedness;

use crate::landmarks::{Finger, HandLandmark, HandObservation};

/// Basic hand shapes the classifier distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandPose {
    /// All fingers and thumb extended.
    OpenPalm,
    /// Everything curled.
    Fist,
    /// Thumb tip touching index tip.
    Pinch,
    /// Index extended, rest curled.
    Point,
}

const WRIST: (f64, f64) = (0.0, 0.10);
const THUMB_CMC: (f64, f64) = (-0.04, 0.06);
const THUMB_MCP: (f64, f64) = (-0.06, 0.04);
const THUMB_IP: (f64, f64) = (-0.08, 0.02);
const THUMB_TIP_OPEN: (f64, f64) = (-0.10, 0.0);
const THUMB_TIP_CURLED: (f64, f64) = (-0.02, 0.0);

fn knuckle(finger: Finger) -> (f64, f64) {
    match finger {
        Finger::Index => (-0.03, -0.02),
        Finger::Middle => (0.0, -0.02),
        Finger::Ring => (0.03, -0.02),
        Finger::Pinky => (0.06, -0.01),
    }
}

/// Build a 21-landmark hand of `pose` whose wrist-to-knuckle frame is
/// anchored at `center`.
pub fn synthetic_hand(handedness: Handedness, center: DVec2, pose: HandPose) -> HandObservation {
    let mirror = match handedness {
        Handedness::Right => 1.0,
        Handedness::Left => -1.0,
    };
    let at = |(x, y): (f64, f64)| DVec3::new(center.x + x * mirror, center.y + y, 0.0);

    let mut landmarks = [DVec3::ZERO; HAND_LANDMARK_COUNT];
    landmarks[HandLandmark::Wrist.index()] = at(WRIST);
    landmarks[HandLandmark::ThumbCmc.index()] = at(THUMB_CMC);
    landmarks[HandLandmark::ThumbMcp.index()] = at(THUMB_MCP);
    landmarks[HandLandmark::ThumbIp.index()] = at(THUMB_IP);

    for finger in Finger::ALL {
        let extended = match pose {
            HandPose::OpenPalm | HandPose::Pinch => true,
            HandPose::Point => finger == Finger::Index,
            HandPose::Fist => false,
        };
        let (kx, ky) = knuckle(finger);
        // Curled fingers fold back toward the knuckle past the middle joint.
        let (dip, tip) = if extended {
            (-0.05, -0.07)
        } else {
            (-0.02, -0.01)
        };
        landmarks[finger.mcp().index()] = at((kx, ky));
        landmarks[finger.pip().index()] = at((kx, ky - 0.03));
        landmarks[finger.dip().index()] = at((kx, ky + dip));
        landmarks[finger.tip().index()] = at((kx, ky + tip));
    }

    let thumb_tip = match pose {
        HandPose::OpenPalm => at(THUMB_TIP_OPEN),
        HandPose::Fist | HandPose::Point => at(THUMB_TIP_CURLED),
        HandPose::Pinch => {
            landmarks[HandLandmark::IndexTip.index()] + DVec3::new(0.005 * mirror, 0.0, 0.0)
        }
    };
    landmarks[HandLandmark::ThumbTip.index()] = thumb_tip;

    HandObservation::new(handedness, landmarks)
}

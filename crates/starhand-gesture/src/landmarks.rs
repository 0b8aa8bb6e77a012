//! Hand landmark data and per-hand feature derivation.
//!
//! Landmarks follow the common 21-point hand model in normalized image
//! space (x right, y down, both in [0,1]; z is relative depth).

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use starhand_core::constants::*;
use starhand_core::enums::Handedness;

/// The 21 hand landmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl HandLandmark {
    /// Array index (0-20).
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// The four non-thumb fingers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 4] = [Self::Index, Self::Middle, Self::Ring, Self::Pinky];

    /// Knuckle joint.
    pub fn mcp(&self) -> HandLandmark {
        match self {
            Self::Index => HandLandmark::IndexMcp,
            Self::Middle => HandLandmark::MiddleMcp,
            Self::Ring => HandLandmark::RingMcp,
            Self::Pinky => HandLandmark::PinkyMcp,
        }
    }

    /// Middle joint.
    pub fn pip(&self) -> HandLandmark {
        match self {
            Self::Index => HandLandmark::IndexPip,
            Self::Middle => HandLandmark::MiddlePip,
            Self::Ring => HandLandmark::RingPip,
            Self::Pinky => HandLandmark::PinkyPip,
        }
    }

    pub fn dip(&self) -> HandLandmark {
        match self {
            Self::Index => HandLandmark::IndexDip,
            Self::Middle => HandLandmark::MiddleDip,
            Self::Ring => HandLandmark::RingDip,
            Self::Pinky => HandLandmark::PinkyDip,
        }
    }

    pub fn tip(&self) -> HandLandmark {
        match self {
            Self::Index => HandLandmark::IndexTip,
            Self::Middle => HandLandmark::MiddleTip,
            Self::Ring => HandLandmark::RingTip,
            Self::Pinky => HandLandmark::PinkyTip,
        }
    }
}

/// One detected hand for one camera frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandObservation {
    pub handedness: Handedness,
    pub landmarks: [DVec3; HAND_LANDMARK_COUNT],
}

impl HandObservation {
    pub fn new(handedness: Handedness, landmarks: [DVec3; HAND_LANDMARK_COUNT]) -> Self {
        Self {
            handedness,
            landmarks,
        }
    }

    pub fn landmark(&self, landmark: HandLandmark) -> DVec3 {
        self.landmarks[landmark.index()]
    }

    /// Derive classification features for this hand.
    pub fn features(&self) -> HandFeatures {
        HandFeatures::from_observation(self)
    }
}

/// Derived per-hand features used by the gesture priority chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandFeatures {
    /// 3D wrist to middle knuckle distance; the normalization base.
    pub palm_size: f64,
    /// Thumb-tip to index-tip distance in palm sizes.
    pub pinch_distance: f64,
    pub thumb_extended: bool,
    /// Extension flags for index, middle, ring, pinky.
    pub fingers_extended: [bool; 4],
    /// Mean of the wrist and the four knuckles.
    pub palm_center: DVec3,
    /// Unit vector from index knuckle to index tip (zero if degenerate).
    pub pointing_direction: DVec3,
    /// Index fingertip position.
    pub index_tip: DVec3,
}

impl HandFeatures {
    pub fn from_observation(hand: &HandObservation) -> Self {
        let wrist = hand.landmark(HandLandmark::Wrist);
        let palm_size = wrist.distance(hand.landmark(HandLandmark::MiddleMcp));

        let thumb_tip = hand.landmark(HandLandmark::ThumbTip);
        let index_tip = hand.landmark(HandLandmark::IndexTip);
        let pinch_distance = if palm_size > MIN_PALM_SIZE {
            thumb_tip.distance(index_tip) / palm_size
        } else {
            f64::INFINITY
        };

        // Image x is mirrored between hands: a right thumb opens toward -x.
        let thumb_mcp = hand.landmark(HandLandmark::ThumbMcp);
        let thumb_extended = match hand.handedness {
            Handedness::Right => thumb_tip.x < thumb_mcp.x,
            Handedness::Left => thumb_tip.x > thumb_mcp.x,
        };

        let fingers_extended = Finger::ALL.map(|finger| is_finger_extended(hand, finger));

        let palm_center = (wrist
            + Finger::ALL
                .iter()
                .map(|finger| hand.landmark(finger.mcp()))
                .sum::<DVec3>())
            / 5.0;

        let pointing_direction =
            (index_tip - hand.landmark(HandLandmark::IndexMcp)).normalize_or_zero();

        Self {
            palm_size,
            pinch_distance,
            thumb_extended,
            fingers_extended,
            palm_center,
            pointing_direction,
            index_tip,
        }
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch_distance < PINCH_THRESHOLD
    }

    /// Extended non-thumb fingers.
    pub fn extended_count(&self) -> usize {
        self.fingers_extended.iter().filter(|e| **e).count()
    }

    pub fn is_fist(&self) -> bool {
        self.extended_count() == 0 && !self.thumb_extended
    }

    pub fn is_open_palm(&self) -> bool {
        self.extended_count() >= OPEN_PALM_MIN_FINGERS && self.thumb_extended
    }

    /// Only the index finger extended.
    pub fn is_pointing(&self) -> bool {
        self.fingers_extended == [true, false, false, false]
    }

    /// Raw aim target in screen space: the index tip while pointing,
    /// otherwise the palm center, mirrored horizontally.
    pub fn aim_target(&self) -> DVec2 {
        let source = if self.is_pointing() {
            self.index_tip
        } else {
            self.palm_center
        };
        DVec2::new(1.0 - source.x, source.y)
    }
}

/// Knuckle→tip beats knuckle→mid-joint by the extension ratio, measured in 2D.
fn is_finger_extended(hand: &HandObservation, finger: Finger) -> bool {
    let mcp = hand.landmark(finger.mcp()).truncate();
    let pip = hand.landmark(finger.pip()).truncate();
    let tip = hand.landmark(finger.tip()).truncate();
    mcp.distance(tip) > FINGER_EXTENSION_RATIO * mcp.distance(pip)
}

/// All hands seen in one camera frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HandFrame {
    pub left: Option<HandObservation>,
    pub right: Option<HandObservation>,
}

impl HandFrame {
    /// Frame with no hands.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Slot observations by handedness. A repeated handedness replaces the
    /// earlier observation.
    pub fn from_observations(observations: impl IntoIterator<Item = HandObservation>) -> Self {
        let mut frame = Self::default();
        for hand in observations {
            match hand.handedness {
                Handedness::Left => frame.left = Some(hand),
                Handedness::Right => frame.right = Some(hand),
            }
        }
        frame
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

//! Hand and face landmark records.
//!
//! Records are produced fresh every frame by the external tracker and are
//! only ever read by the gesture engines. Construction validates the point
//! count so every anatomical index below is in bounds.

use serde::{Deserialize, Serialize};
use touchless_common::error::{TouchlessError, TouchlessResult};

/// Indices into the 21-point hand skeleton.
pub mod hand_index {
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_PIP: usize = 14;
    pub const RING_TIP: usize = 16;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_TIP: usize = 20;

    /// Points in a complete hand skeleton.
    pub const COUNT: usize = 21;

    /// `(tip, pip)` pairs for index, middle, ring, pinky.
    pub const FINGER_JOINTS: [(usize, usize); 4] = [
        (INDEX_TIP, INDEX_PIP),
        (MIDDLE_TIP, MIDDLE_PIP),
        (RING_TIP, RING_PIP),
        (PINKY_TIP, PINKY_PIP),
    ];
}

/// Indices into the face mesh.
pub mod face_index {
    use super::EyeContour;

    pub const NOSE_TIP: usize = 1;

    pub const LEFT_EYE: EyeContour = EyeContour {
        top: 159,
        bottom: 145,
        left: 33,
        right: 133,
    };

    pub const RIGHT_EYE: EyeContour = EyeContour {
        top: 386,
        bottom: 374,
        left: 362,
        right: 263,
    };

    /// Shortest mesh that contains every index used above.
    pub const MIN_COUNT: usize = 387;
}

/// Four mesh indices outlining one eye.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyeContour {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

/// A landmark position in camera-frame pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Landmark {
    pub x: i32,
    pub y: i32,
}

impl Landmark {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another landmark.
    pub fn distance_to(&self, other: &Landmark) -> f64 {
        let dx = other.x as f64 - self.x as f64;
        let dy = other.y as f64 - self.y as f64;
        dx.hypot(dy)
    }
}

impl From<(i32, i32)> for Landmark {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Landmark> for (i32, i32) {
    fn from(lm: Landmark) -> Self {
        (lm.x, lm.y)
    }
}

/// Which hand the tracker reports. Labels refer to the mirrored frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HandLabel {
    Left,
    Right,
}

impl std::fmt::Display for HandLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandLabel::Left => f.write_str("Left"),
            HandLabel::Right => f.write_str("Right"),
        }
    }
}

/// One detected hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHandRecord")]
pub struct HandRecord {
    label: HandLabel,
    #[serde(rename = "lm")]
    landmarks: Vec<Landmark>,
}

#[derive(Deserialize)]
struct RawHandRecord {
    label: HandLabel,
    lm: Vec<Landmark>,
}

impl TryFrom<RawHandRecord> for HandRecord {
    type Error = TouchlessError;

    fn try_from(raw: RawHandRecord) -> Result<Self, Self::Error> {
        Self::new(raw.label, raw.lm)
    }
}

impl HandRecord {
    /// Build a hand record, rejecting skeletons with missing points.
    pub fn new(label: HandLabel, landmarks: Vec<Landmark>) -> TouchlessResult<Self> {
        if landmarks.len() < hand_index::COUNT {
            return Err(TouchlessError::landmark(format!(
                "{label} hand has {} landmarks, expected {}",
                landmarks.len(),
                hand_index::COUNT
            )));
        }
        Ok(Self { label, landmarks })
    }

    pub fn label(&self) -> HandLabel {
        self.label
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    /// Landmark at a `hand_index` position.
    pub fn point(&self, index: usize) -> Landmark {
        self.landmarks[index]
    }
}

/// One detected face mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFaceRecord")]
pub struct FaceRecord {
    #[serde(rename = "lm")]
    landmarks: Vec<Landmark>,
}

#[derive(Deserialize)]
struct RawFaceRecord {
    lm: Vec<Landmark>,
}

impl TryFrom<RawFaceRecord> for FaceRecord {
    type Error = TouchlessError;

    fn try_from(raw: RawFaceRecord) -> Result<Self, Self::Error> {
        Self::new(raw.lm)
    }
}

impl FaceRecord {
    /// Build a face record, rejecting meshes too short for the eye and
    /// nose indices.
    pub fn new(landmarks: Vec<Landmark>) -> TouchlessResult<Self> {
        if landmarks.len() < face_index::MIN_COUNT {
            return Err(TouchlessError::landmark(format!(
                "face mesh has {} landmarks, expected at least {}",
                landmarks.len(),
                face_index::MIN_COUNT
            )));
        }
        Ok(Self { landmarks })
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn point(&self, index: usize) -> Landmark {
        self.landmarks[index]
    }

    pub fn nose_tip(&self) -> Landmark {
        self.landmarks[face_index::NOSE_TIP]
    }
}

/// The hands detected in one frame, at most one per label.
///
/// Serialized as a list of records; a repeated label replaces the earlier
/// record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<HandRecord>", into = "Vec<HandRecord>")]
pub struct HandsFrame {
    left: Option<HandRecord>,
    right: Option<HandRecord>,
}

impl HandsFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hand, replacing any existing hand with the same label.
    pub fn insert(&mut self, hand: HandRecord) {
        match hand.label() {
            HandLabel::Left => self.left = Some(hand),
            HandLabel::Right => self.right = Some(hand),
        }
    }

    pub fn with(mut self, hand: HandRecord) -> Self {
        self.insert(hand);
        self
    }

    pub fn get(&self, label: HandLabel) -> Option<&HandRecord> {
        match label {
            HandLabel::Left => self.left.as_ref(),
            HandLabel::Right => self.right.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn len(&self) -> usize {
        self.left.is_some() as usize + self.right.is_some() as usize
    }
}

impl From<Vec<HandRecord>> for HandsFrame {
    fn from(hands: Vec<HandRecord>) -> Self {
        hands
            .into_iter()
            .fold(HandsFrame::new(), |frame, hand| frame.with(hand))
    }
}

impl From<HandsFrame> for Vec<HandRecord> {
    fn from(frame: HandsFrame) -> Self {
        frame.left.into_iter().chain(frame.right).collect()
    }
}

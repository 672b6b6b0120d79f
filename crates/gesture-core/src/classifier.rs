//! Pose classification from raw landmark geometry.
//!
//! Purely geometric and stateless. There is no hysteresis here; the
//! engines absorb per-frame flicker with cooldowns instead.

use touchless_landmark_model::{hand_index, EyeContour, FaceRecord, HandLabel, HandRecord};

/// Which fingers are extended, thumb first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerState {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerState {
    pub const OPEN_PALM: FingerState = FingerState::from_array([true; 5]);
    pub const FIST: FingerState = FingerState::from_array([false; 5]);

    pub const fn from_array(fingers: [bool; 5]) -> Self {
        Self {
            thumb: fingers[0],
            index: fingers[1],
            middle: fingers[2],
            ring: fingers[3],
            pinky: fingers[4],
        }
    }

    pub fn to_array(self) -> [bool; 5] {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
    }

    /// Number of extended fingers.
    pub fn count(self) -> usize {
        self.to_array().iter().filter(|up| **up).count()
    }

    /// All five fingers extended.
    pub fn is_open_palm(self) -> bool {
        self.count() == 5
    }

    /// No finger extended.
    pub fn is_fist(self) -> bool {
        self.count() == 0
    }

    /// Index up, middle/ring/pinky down. Thumb ignored.
    pub fn is_pointing(self) -> bool {
        self.index && !self.middle && !self.ring && !self.pinky
    }

    /// Index and middle up, ring/pinky down. Thumb ignored.
    pub fn is_two_finger(self) -> bool {
        self.index && self.middle && !self.ring && !self.pinky
    }
}

/// Classify which fingers of a hand are extended.
///
/// The thumb is tested laterally against its interphalangeal joint, mirrored
/// between hands. The other four fingers are up when the tip sits strictly
/// above (smaller y than) the proximal interphalangeal joint.
pub fn fingers_up(hand: &HandRecord, label: HandLabel) -> FingerState {
    let thumb_tip = hand.point(hand_index::THUMB_TIP);
    let thumb_ip = hand.point(hand_index::THUMB_IP);
    let thumb = match label {
        HandLabel::Right => thumb_tip.x > thumb_ip.x,
        HandLabel::Left => thumb_tip.x < thumb_ip.x,
    };

    let [index, middle, ring, pinky] = hand_index::FINGER_JOINTS
        .map(|(tip, pip)| hand.point(tip).y < hand.point(pip).y);

    FingerState {
        thumb,
        index,
        middle,
        ring,
        pinky,
    }
}

/// Ratio of eyelid gap to eye width for one eye.
///
/// A zero-width contour reports 1.0 (fully open).
pub fn eye_aspect_ratio(face: &FaceRecord, eye: EyeContour) -> f64 {
    let vertical = face.point(eye.top).distance_to(&face.point(eye.bottom));
    let horizontal = face.point(eye.left).distance_to(&face.point(eye.right));

    if horizontal == 0.0 {
        return 1.0;
    }

    vertical / horizontal
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use touchless_landmark_model::{face_index, Landmark};

    /// A hand whose every point sits at (100, 100) except the overrides.
    fn hand_with(label: HandLabel, overrides: &[(usize, i32, i32)]) -> HandRecord {
        let mut points = vec![Landmark::new(100, 100); hand_index::COUNT];
        for &(i, x, y) in overrides {
            points[i] = Landmark::new(x, y);
        }
        HandRecord::new(label, points).unwrap()
    }

    fn face_with(overrides: &[(usize, i32, i32)]) -> FaceRecord {
        let mut points = vec![Landmark::new(0, 0); face_index::MIN_COUNT];
        for &(i, x, y) in overrides {
            points[i] = Landmark::new(x, y);
        }
        FaceRecord::new(points).unwrap()
    }

    #[test]
    fn test_right_thumb_extends_to_larger_x() {
        let hand = hand_with(
            HandLabel::Right,
            &[(hand_index::THUMB_TIP, 130, 100), (hand_index::THUMB_IP, 110, 100)],
        );
        assert!(fingers_up(&hand, HandLabel::Right).thumb);
        assert!(!fingers_up(&hand, HandLabel::Left).thumb);
    }

    #[test]
    fn test_finger_up_requires_strictly_higher_tip() {
        let hand = hand_with(
            HandLabel::Right,
            &[
                (hand_index::INDEX_TIP, 100, 50),
                (hand_index::INDEX_PIP, 100, 80),
                (hand_index::MIDDLE_TIP, 100, 80),
                (hand_index::MIDDLE_PIP, 100, 80),
            ],
        );
        let state = fingers_up(&hand, HandLabel::Right);
        assert!(state.index);
        assert!(!state.middle);
        assert!(state.is_pointing());
    }

    #[test]
    fn test_flat_hand_is_a_fist() {
        let hand = hand_with(HandLabel::Left, &[]);
        let state = fingers_up(&hand, HandLabel::Left);
        assert_eq!(state, FingerState::FIST);
        assert!(state.is_fist());
        assert_eq!(state.count(), 0);
    }

    #[test]
    fn test_pose_predicates_ignore_thumb() {
        let two = FingerState::from_array([true, true, true, false, false]);
        assert!(two.is_two_finger());
        assert!(!two.is_pointing());
        assert!(FingerState::from_array([false, true, false, false, false]).is_pointing());
        assert!(FingerState::OPEN_PALM.is_open_palm());
    }

    #[test]
    fn test_eye_aspect_ratio() {
        let eye = face_index::LEFT_EYE;
        let face = face_with(&[
            (eye.top, 50, 40),
            (eye.bottom, 50, 46),
            (eye.left, 30, 43),
            (eye.right, 60, 43),
        ]);
        assert!((eye_aspect_ratio(&face, eye) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_zero_width_eye_reads_fully_open() {
        let eye = face_index::RIGHT_EYE;
        let face = face_with(&[(eye.top, 10, 0), (eye.bottom, 10, 30)]);
        assert_eq!(eye_aspect_ratio(&face, eye), 1.0);
    }

    proptest! {
        #[test]
        fn thumb_classification_mirrors_between_hands(
            tip_x in 0i32..640,
            ip_x in 0i32..640,
        ) {
            let hand = hand_with(
                HandLabel::Right,
                &[(hand_index::THUMB_TIP, tip_x, 100), (hand_index::THUMB_IP, ip_x, 100)],
            );
            let right = fingers_up(&hand, HandLabel::Right).thumb;
            let left = fingers_up(&hand, HandLabel::Left).thumb;
            if tip_x == ip_x {
                prop_assert!(!right && !left);
            } else {
                prop_assert_ne!(right, left);
            }
        }
    }
}

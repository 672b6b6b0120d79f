//! Two-hand gesture engine.
//!
//! The left hand scrolls and pauses, the right hand drives the pointer:
//!
//! | Hand  | Pose                         | Action                       |
//! |-------|------------------------------|------------------------------|
//! | Left  | open palm                    | pause (held while the pose is) |
//! | Left  | index + middle up            | `SCROLL`, sign from tip offset |
//! | Right | index up only                | `MOVE` to the index tip      |
//! | Right | thumb tip near index tip     | `CLICK`                      |
//! | Right | fist / anything else         | `DRAG_START` / `DRAG_STOP`   |
//!
//! The left hand is evaluated first because its pause state gates the
//! right hand in the same frame.

use touchless_common::clock::{Cooldown, SessionClock};
use touchless_common::config::HandGestureConfig;
use touchless_landmark_model::{hand_index, Action, HandLabel, HandRecord, HandsFrame, Perception};

use crate::classifier::fingers_up;
use crate::GestureSource;

/// Stateful hand gesture engine.
#[derive(Debug)]
pub struct HandGestureEngine {
    config: HandGestureConfig,
    clock: SessionClock,
    paused: bool,
    click_gate: Cooldown,
    scroll_gate: Cooldown,
}

impl HandGestureEngine {
    /// Create an engine whose clock starts now.
    pub fn new(config: &HandGestureConfig) -> Self {
        Self::with_clock(config, SessionClock::start())
    }

    /// Create an engine sharing an existing session clock.
    pub fn with_clock(config: &HandGestureConfig, clock: SessionClock) -> Self {
        Self {
            config: config.clone(),
            clock,
            paused: false,
            click_gate: Cooldown::new(config.click_cooldown_secs),
            scroll_gate: Cooldown::new(config.scroll_cooldown_secs),
        }
    }

    /// Whether the left palm currently holds the pause pose.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn last_click_secs(&self) -> Option<f64> {
        self.click_gate.last_fired_secs()
    }

    pub fn last_scroll_secs(&self) -> Option<f64> {
        self.scroll_gate.last_fired_secs()
    }

    /// Decide this frame's actions using the engine's own clock.
    pub fn get_actions(&mut self, hands: &HandsFrame) -> Vec<Action> {
        let now = self.clock.elapsed_secs();
        self.get_actions_at(hands, now)
    }

    /// Decide this frame's actions as if observed at `now_secs`.
    pub fn get_actions_at(&mut self, hands: &HandsFrame, now_secs: f64) -> Vec<Action> {
        let mut actions = Vec::new();

        if let Some(left) = hands.get(HandLabel::Left) {
            self.evaluate_left(left, now_secs, &mut actions);
        }

        if let Some(right) = hands.get(HandLabel::Right) {
            self.evaluate_right(right, now_secs, &mut actions);
        }

        actions
    }

    fn evaluate_left(&mut self, hand: &HandRecord, now_secs: f64, actions: &mut Vec<Action>) {
        let fingers = fingers_up(hand, HandLabel::Left);

        let paused = fingers.is_open_palm();
        if paused != self.paused {
            tracing::info!(paused, "Pointer pause changed");
        }
        self.paused = paused;

        if !fingers.is_two_finger() {
            return;
        }

        if !self.scroll_gate.is_ready(now_secs) {
            tracing::trace!(now_secs, "Scroll suppressed by cooldown");
            return;
        }

        let index_y = hand.point(hand_index::INDEX_TIP).y as i64;
        let middle_y = hand.point(hand_index::MIDDLE_TIP).y as i64;
        let band = self.config.scroll_dead_band_px as i64;

        if middle_y < index_y - band {
            actions.push(Action::Scroll {
                amount: self.config.scroll_amount,
            });
        } else if middle_y > index_y + band {
            actions.push(Action::Scroll {
                amount: self.config.scroll_amount.saturating_neg(),
            });
        }

        // An undecided offset still consumes the window.
        self.scroll_gate.fire(now_secs);
    }

    fn evaluate_right(&mut self, hand: &HandRecord, now_secs: f64, actions: &mut Vec<Action>) {
        let fingers = fingers_up(hand, HandLabel::Right);
        let index_tip = hand.point(hand_index::INDEX_TIP);
        let thumb_tip = hand.point(hand_index::THUMB_TIP);

        if !self.paused && fingers.is_pointing() {
            actions.push(Action::Move {
                x: index_tip.x,
                y: index_tip.y,
            });
        }

        let pinch = index_tip.distance_to(&thumb_tip);
        let click_allowed = !self.paused || self.config.click_while_paused;
        if pinch < self.config.click_threshold_px && click_allowed {
            if self.click_gate.is_ready(now_secs) {
                actions.push(Action::Click);
                self.click_gate.fire(now_secs);
            } else {
                tracing::trace!(now_secs, pinch, "Click suppressed by cooldown");
            }
        }

        if !self.paused {
            if fingers.is_fist() {
                actions.push(Action::DragStart);
            } else {
                actions.push(Action::DragStop);
            }
        }
    }
}

impl GestureSource for HandGestureEngine {
    fn actions_at(&mut self, perception: &Perception, now_secs: f64) -> Vec<Action> {
        match perception {
            Perception::Hands { hands } => self.get_actions_at(hands, now_secs),
            Perception::Face { .. } => {
                tracing::debug!("Hand engine ignoring face frame");
                Vec::new()
            }
        }
    }

    fn name(&self) -> &'static str {
        "hand"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use touchless_landmark_model::Landmark;

    /// Finger poses for building synthetic hands. `true` = extended.
    fn hand(label: HandLabel, fingers: [bool; 5]) -> Vec<Landmark> {
        let mut points = vec![Landmark::new(300, 300); hand_index::COUNT];

        // Thumb tip sits outside (extended) or inside (folded) the IP joint,
        // low enough that it never pinches a fingertip by accident.
        let outward = match label {
            HandLabel::Right => 1,
            HandLabel::Left => -1,
        };
        points[hand_index::THUMB_IP] = Landmark::new(300, 300);
        let thumb_dx = if fingers[0] { 40 * outward } else { -40 * outward };
        points[hand_index::THUMB_TIP] = Landmark::new(300 + thumb_dx, 340);

        for (i, (tip, pip)) in hand_index::FINGER_JOINTS.iter().enumerate() {
            let x = 260 + 25 * i as i32;
            points[*pip] = Landmark::new(x, 250);
            points[*tip] = Landmark::new(x, if fingers[i + 1] { 200 } else { 280 });
        }
        points
    }

    fn record(label: HandLabel, points: Vec<Landmark>) -> HandRecord {
        HandRecord::new(label, points).unwrap()
    }

    fn right(fingers: [bool; 5]) -> HandRecord {
        record(HandLabel::Right, hand(HandLabel::Right, fingers))
    }

    fn left(fingers: [bool; 5]) -> HandRecord {
        record(HandLabel::Left, hand(HandLabel::Left, fingers))
    }

    const POINTING: [bool; 5] = [false, true, false, false, false];
    const OPEN: [bool; 5] = [true; 5];
    const FIST: [bool; 5] = [false; 5];
    const TWO: [bool; 5] = [false, true, true, false, false];

    fn engine() -> HandGestureEngine {
        HandGestureEngine::new(&HandGestureConfig::default())
    }

    #[test]
    fn test_open_left_palm_pauses_and_release_unpauses() {
        let mut engine = engine();
        engine.get_actions_at(&HandsFrame::new().with(left(OPEN)), 0.0);
        assert!(engine.is_paused());

        engine.get_actions_at(&HandsFrame::new().with(left(TWO)), 0.05);
        assert!(!engine.is_paused());
    }

    #[test]
    fn test_pause_persists_without_left_hand() {
        let mut engine = engine();
        engine.get_actions_at(&HandsFrame::new().with(left(OPEN)), 0.0);
        let actions = engine.get_actions_at(&HandsFrame::new().with(right(POINTING)), 0.1);
        assert!(engine.is_paused());
        assert!(actions.is_empty());
    }

    #[test]
    fn test_pointing_right_hand_moves_to_index_tip() {
        let mut engine = engine();
        let hand = right(POINTING);
        let tip = hand.point(hand_index::INDEX_TIP);
        let actions = engine.get_actions_at(&HandsFrame::new().with(hand), 0.0);
        assert_eq!(
            actions,
            vec![Action::Move { x: tip.x, y: tip.y }, Action::DragStop]
        );
    }

    #[test]
    fn test_fist_emits_drag_start_every_frame() {
        let mut engine = engine();
        for t in [0.0, 0.03, 0.06] {
            let actions = engine.get_actions_at(&HandsFrame::new().with(right(FIST)), t);
            assert_eq!(actions, vec![Action::DragStart]);
        }
    }

    #[test]
    fn test_paused_frame_blocks_right_hand_in_same_frame() {
        let mut engine = engine();
        let frame = HandsFrame::new().with(left(OPEN)).with(right(FIST));
        assert!(engine.get_actions_at(&frame, 0.0).is_empty());
    }

    #[test]
    fn test_click_while_paused_knob() {
        let config = HandGestureConfig {
            click_while_paused: true,
            ..Default::default()
        };
        let mut engine = HandGestureEngine::new(&config);

        let mut points = hand(HandLabel::Right, POINTING);
        points[hand_index::THUMB_TIP] = points[hand_index::INDEX_TIP];
        let frame = HandsFrame::new()
            .with(left(OPEN))
            .with(record(HandLabel::Right, points));

        assert_eq!(engine.get_actions_at(&frame, 0.0), vec![Action::Click]);
    }

    #[test]
    fn test_scroll_ignores_thumb() {
        let mut engine = engine();
        let mut points = hand(HandLabel::Left, [true, true, true, false, false]);
        points[hand_index::MIDDLE_TIP].y = points[hand_index::INDEX_TIP].y - 30;
        let actions =
            engine.get_actions_at(&HandsFrame::new().with(record(HandLabel::Left, points)), 0.0);
        assert_eq!(actions, vec![Action::Scroll { amount: 60 }]);
    }

    #[test]
    fn test_scroll_cooldown_blocks_second_scroll() {
        let mut engine = engine();
        let mut points = hand(HandLabel::Left, TWO);
        points[hand_index::MIDDLE_TIP].y = points[hand_index::INDEX_TIP].y + 30;
        let frame = HandsFrame::new().with(record(HandLabel::Left, points));

        assert_eq!(
            engine.get_actions_at(&frame, 0.0),
            vec![Action::Scroll { amount: -60 }]
        );
        assert!(engine.get_actions_at(&frame, 0.05).is_empty());
        assert_eq!(
            engine.get_actions_at(&frame, 0.10),
            vec![Action::Scroll { amount: -60 }]
        );
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let mut engine = engine();

        let mut points = hand(HandLabel::Left, TWO);
        points[hand_index::INDEX_TIP].y = i32::MIN;
        let frame = HandsFrame::new().with(record(HandLabel::Left, points));
        assert_eq!(
            engine.get_actions_at(&frame, 0.0),
            vec![Action::Scroll { amount: -60 }]
        );

        let mut points = hand(HandLabel::Right, POINTING);
        points[hand_index::THUMB_TIP] = Landmark::new(i32::MIN, 0);
        points[hand_index::INDEX_TIP] = Landmark::new(i32::MAX, 0);
        let actions =
            engine.get_actions_at(&HandsFrame::new().with(record(HandLabel::Right, points)), 1.0);
        assert!(!actions.contains(&Action::Click));
    }

    #[test]
    fn test_source_ignores_face_frames() {
        let mut engine = engine();
        let actions = engine.actions_at(&Perception::Face { face: None }, 0.0);
        assert!(actions.is_empty());
        assert_eq!(GestureSource::name(&engine), "hand");
    }
}

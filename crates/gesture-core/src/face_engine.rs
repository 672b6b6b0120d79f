//! Face gesture engine: the nose tip steers, a blink clicks.

use touchless_common::clock::{Cooldown, SessionClock};
use touchless_common::config::FaceGestureConfig;
use touchless_landmark_model::{face_index, Action, FaceRecord, Perception};

use crate::classifier::eye_aspect_ratio;
use crate::GestureSource;

/// Stateful face gesture engine.
#[derive(Debug)]
pub struct FaceGestureEngine {
    blink_threshold: f64,
    clock: SessionClock,
    click_gate: Cooldown,
}

impl FaceGestureEngine {
    pub fn new(config: &FaceGestureConfig) -> Self {
        Self::with_clock(config, SessionClock::start())
    }

    pub fn with_clock(config: &FaceGestureConfig, clock: SessionClock) -> Self {
        Self {
            blink_threshold: config.blink_threshold,
            clock,
            click_gate: Cooldown::new(config.click_cooldown_secs),
        }
    }

    pub fn last_click_secs(&self) -> Option<f64> {
        self.click_gate.last_fired_secs()
    }

    /// Mean eye aspect ratio of both eyes.
    pub fn frame_ear(face: &FaceRecord) -> f64 {
        let left = eye_aspect_ratio(face, face_index::LEFT_EYE);
        let right = eye_aspect_ratio(face, face_index::RIGHT_EYE);
        (left + right) / 2.0
    }

    pub fn get_actions(&mut self, face: &FaceRecord) -> Vec<Action> {
        let now = self.clock.elapsed_secs();
        self.get_actions_at(face, now)
    }

    /// Always `MOVE` then `DEBUG`, with a `CLICK` between them when the
    /// eyes are closed and the cooldown has elapsed.
    pub fn get_actions_at(&mut self, face: &FaceRecord, now_secs: f64) -> Vec<Action> {
        let nose = face.nose_tip();
        let mut actions = vec![Action::Move {
            x: nose.x,
            y: nose.y,
        }];

        let ear = Self::frame_ear(face);
        if ear < self.blink_threshold {
            if self.click_gate.is_ready(now_secs) {
                actions.push(Action::Click);
                self.click_gate.fire(now_secs);
            } else {
                tracing::trace!(now_secs, ear, "Blink click suppressed by cooldown");
            }
        }

        actions.push(Action::Debug { ear });
        actions
    }
}

impl GestureSource for FaceGestureEngine {
    fn actions_at(&mut self, perception: &Perception, now_secs: f64) -> Vec<Action> {
        match perception {
            Perception::Face { face: Some(face) } => self.get_actions_at(face, now_secs),
            Perception::Face { face: None } => Vec::new(),
            Perception::Hands { .. } => {
                tracing::debug!("Face engine ignoring hands frame");
                Vec::new()
            }
        }
    }

    fn name(&self) -> &'static str {
        "face"
    }
}

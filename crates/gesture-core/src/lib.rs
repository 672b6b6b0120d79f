//! Touchless Gesture Core
//!
//! Turns per-frame landmarks into pointer actions:
//! - **Classifier:** Finger extension and eye openness from raw geometry
//! - **Hand Engine:** Right hand moves, pinches, and drags; left hand
//!   scrolls and pauses
//! - **Face Engine:** Nose steers, blinks click
//!
//! This crate is pure decision logic. It never touches the OS pointer;
//! callers apply the returned actions.

pub mod classifier;
pub mod face_engine;
pub mod hand_engine;

pub use classifier::{eye_aspect_ratio, fingers_up, FingerState};
pub use face_engine::FaceGestureEngine;
pub use hand_engine::HandGestureEngine;

use touchless_landmark_model::{Action, Perception};

/// A component that produces an ordered action list for each frame.
///
/// One implementation is chosen at startup and kept for the whole session.
pub trait GestureSource {
    /// Decide the actions for one perception snapshot taken at `now_secs`.
    fn actions_at(&mut self, perception: &Perception, now_secs: f64) -> Vec<Action>;

    /// Source name for logging.
    fn name(&self) -> &'static str;
}

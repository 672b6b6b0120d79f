//! Touchless Control
//!
//! Runs the frame-driven loop: pull a perception frame, let the gesture
//! source decide, apply the actions to the pointer in order. Everything runs
//! on the calling thread; a shared stop flag ends the loop between frames.

pub mod session;

pub use session::{ControlSession, SessionState, SessionSummary};

//! Touchless Pointer Output
//!
//! Applies gesture actions to the OS pointer:
//! - **Motion filter:** Jitter deadzone, max-step clamp, exponential smoothing
//! - **Controller:** Camera-to-screen mapping, idempotent drag, click/scroll
//! - **Backends:** Real OS pointer (`enigo` feature), dry-run logger, recorder
//!
//! The controller is generic over [`PointerBackend`] so tests can swap the
//! OS for a [`backends::RecordingBackend`].

pub mod backends;
pub mod controller;
pub mod smoothing;

pub use controller::PointerController;
pub use smoothing::{MotionFilter, MotionStep};
pub use touchless_platform_core::{PointerBackend, ScreenSize};

//! Touchless Landmark Model
//!
//! Defines the data contracts that flow through a control session:
//! - **Landmarks:** Per-frame hand skeletons and face meshes in camera pixels
//! - **Frames:** One perception snapshot per camera frame, stored as JSONL
//! - **Actions:** Discrete pointer commands produced by the gesture engines
//!
//! All landmark coordinates are integer pixels in a horizontally flipped
//! (mirror) camera frame, origin top-left.

pub mod action;
pub mod frame;
pub mod landmark;

pub use action::*;
pub use frame::*;
pub use landmark::*;

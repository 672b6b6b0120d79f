//! Touchless Landmark Source
//!
//! The boundary to the external hand/face tracker. A tracker process writes
//! one perception frame per camera frame; sources hand those frames to the
//! control loop:
//!
//! - **JSONL:** Frames streamed from a file or stdin
//! - **Stub:** Preloaded frames for tests and dry runs
//!
//! [`writer::FrameWriter`] records a live stream so it can be replayed.

pub mod sources;
pub mod writer;

pub use sources::{JsonlSource, StubSource};
pub use writer::FrameWriter;

use touchless_common::error::TouchlessResult;
use touchless_landmark_model::PerceptionFrame;

/// A stream of perception frames.
pub trait LandmarkSource {
    /// Next frame. `None` means the stream has ended.
    fn poll(&mut self) -> TouchlessResult<Option<PerceptionFrame>>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

impl<S: LandmarkSource + ?Sized> LandmarkSource for Box<S> {
    fn poll(&mut self) -> TouchlessResult<Option<PerceptionFrame>> {
        (**self).poll()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

//! Control session management.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use touchless_common::clock::SessionClock;
use touchless_common::config::AppConfig;
use touchless_common::error::{TouchlessError, TouchlessResult};
use touchless_gesture_core::GestureSource;
use touchless_landmark_model::{Action, PerceptionFrame};
use touchless_landmark_source::{FrameWriter, LandmarkSource};
use touchless_pointer_output::{PointerBackend, PointerController};

/// State of a control session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, no frame processed yet.
    Idle,
    /// Processing frames.
    Running,
    /// Loop ended. A stopped session cannot be run again.
    Stopped,
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: u64,
    pub actions: u64,
    pub pointer_errors: u64,
}

/// A gesture source and a pointer controller driven frame by frame.
pub struct ControlSession<G: GestureSource, B: PointerBackend> {
    engine: G,
    controller: PointerController<B>,
    clock: SessionClock,
    camera_size: (u32, u32),
    recorder: Option<FrameWriter>,
    stop_flag: Arc<AtomicBool>,
    state: SessionState,
    summary: SessionSummary,
}

impl<G: GestureSource, B: PointerBackend> ControlSession<G, B> {
    pub fn new(config: &AppConfig, engine: G, backend: B) -> TouchlessResult<Self> {
        Self::with_clock(config, engine, backend, SessionClock::start())
    }

    pub fn with_clock(
        config: &AppConfig,
        engine: G,
        backend: B,
        clock: SessionClock,
    ) -> TouchlessResult<Self> {
        let controller = PointerController::new(&config.pointer, backend)?;
        Ok(Self {
            engine,
            controller,
            clock,
            camera_size: (config.camera.width, config.camera.height),
            recorder: None,
            stop_flag: Arc::new(AtomicBool::new(false)),
            state: SessionState::Idle,
            summary: SessionSummary::default(),
        })
    }

    /// Record every processed frame. Frames without a timestamp are stamped
    /// with the session clock.
    pub fn record_to(&mut self, writer: FrameWriter) {
        tracing::info!(path = %writer.path().display(), "Recording perception frames");
        self.recorder = Some(writer);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn engine(&self) -> &G {
        &self.engine
    }

    pub fn controller(&self) -> &PointerController<B> {
        &self.controller
    }

    /// Set the stop flag.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Get the stop flag for external coordination.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Process one frame and return the actions the engine decided.
    ///
    /// Pointer failures are logged and counted; the remaining actions of the
    /// frame are still applied.
    pub fn step(&mut self, frame: &PerceptionFrame) -> TouchlessResult<Vec<Action>> {
        if self.state == SessionState::Stopped {
            return Err(TouchlessError::unsupported("Session already stopped"));
        }
        self.state = SessionState::Running;

        let t_ns = frame
            .timestamp_ns
            .unwrap_or_else(|| self.clock.elapsed_ns());
        let now = SessionClock::ns_to_secs(t_ns);

        if let Some(recorder) = self.recorder.as_mut() {
            if frame.timestamp_ns.is_some() {
                recorder.write_frame(frame)?;
            } else {
                recorder.write_frame(&frame.clone().at(t_ns))?;
            }
        }

        let actions = self.engine.actions_at(&frame.perception, now);
        let frame_size = frame.size_or(self.camera_size);
        for action in &actions {
            if let Err(e) = self.controller.apply(action, frame_size) {
                self.summary.pointer_errors += 1;
                tracing::warn!(action = action.name(), error = %e, "Pointer action failed");
            }
        }

        self.summary.frames += 1;
        self.summary.actions += actions.len() as u64;
        Ok(actions)
    }

    /// Pull frames from `source` until it ends or the stop flag is set.
    pub fn run<S: LandmarkSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> TouchlessResult<SessionSummary> {
        if self.state != SessionState::Idle {
            return Err(TouchlessError::unsupported("Session already started"));
        }

        tracing::info!(
            engine = self.engine.name(),
            source = source.name(),
            backend = self.controller.backend().name(),
            "Control session started"
        );

        let result = self.pump(source);
        self.finish();
        result.map(|()| self.summary)
    }

    fn pump<S: LandmarkSource + ?Sized>(&mut self, source: &mut S) -> TouchlessResult<()> {
        while !self.stop_flag.load(Ordering::Relaxed) {
            match source.poll()? {
                Some(frame) => {
                    self.step(&frame)?;
                }
                None => {
                    tracing::debug!("Landmark stream ended");
                    break;
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self) {
        if self.controller.is_dragging() {
            if let Err(e) = self.controller.drag_stop() {
                tracing::warn!(error = %e, "Failed to release drag at session end");
            }
        }
        if let Some(recorder) = self.recorder.as_mut() {
            if let Err(e) = recorder.flush() {
                tracing::warn!(error = %e, "Failed to flush frame recording");
            }
        }

        self.state = SessionState::Stopped;
        tracing::info!(
            frames = self.summary.frames,
            actions = self.summary.actions,
            pointer_errors = self.summary.pointer_errors,
            "Control session stopped"
        );
    }
}

//! Pointer controller: camera-space actions in, OS pointer primitives out.

use touchless_common::config::PointerConfig;
use touchless_common::error::TouchlessResult;
use touchless_landmark_model::Action;
use touchless_platform_core::{ActiveZone, PointerBackend, ScreenSize};

use crate::smoothing::{MotionFilter, MotionStep};

/// Stateful pointer controller over a [`PointerBackend`].
///
/// Owns the last issued screen position and the drag state. Both only change
/// after the backend accepted the corresponding primitive.
pub struct PointerController<B: PointerBackend> {
    backend: B,
    screen: ScreenSize,
    frame_margin: u32,
    enable_drag: bool,
    filter: MotionFilter,
    dragging: bool,
}

impl<B: PointerBackend> PointerController<B> {
    /// Build a controller. The screen size is queried once, here.
    pub fn new(config: &PointerConfig, backend: B) -> TouchlessResult<Self> {
        let screen = backend.screen_size()?;
        tracing::info!(
            backend = backend.name(),
            width = screen.width,
            height = screen.height,
            "Pointer controller ready"
        );

        Ok(Self {
            backend,
            screen,
            frame_margin: config.frame_margin,
            enable_drag: config.enable_drag,
            filter: MotionFilter::from_config(config),
            dragging: false,
        })
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// Last screen position issued to the backend.
    pub fn previous_position(&self) -> Option<(f64, f64)> {
        self.filter.previous()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Move toward a camera-space point.
    ///
    /// Returns the issued screen position, or `None` when the target fell
    /// inside the deadzone.
    pub fn move_cursor(
        &mut self,
        camera_x: f64,
        camera_y: f64,
        camera_width: u32,
        camera_height: u32,
    ) -> TouchlessResult<Option<(f64, f64)>> {
        let zone = ActiveZone::new(self.frame_margin, camera_width, camera_height);
        let (target_x, target_y) = zone.to_screen(camera_x, camera_y, self.screen);

        let step = self.filter.propose(target_x, target_y);
        let (x, y) = match step {
            MotionStep::Discarded => {
                tracing::trace!(target_x, target_y, "Move inside deadzone, discarded");
                return Ok(None);
            }
            MotionStep::Smoothed { x, y, clamped: true } => {
                tracing::debug!(target_x, target_y, "Move clamped to max step");
                (x, y)
            }
            MotionStep::Jump { x, y } | MotionStep::Smoothed { x, y, .. } => (x, y),
        };

        self.backend.move_to(x, y)?;
        self.filter.commit(x, y);
        Ok(Some((x, y)))
    }

    pub fn click(&mut self) -> TouchlessResult<()> {
        self.backend.click()
    }

    pub fn scroll(&mut self, amount: i32) -> TouchlessResult<()> {
        self.backend.scroll(amount)
    }

    /// Press the button unless a drag is already held.
    pub fn drag_start(&mut self) -> TouchlessResult<()> {
        if self.dragging {
            return Ok(());
        }
        self.backend.button_down()?;
        self.dragging = true;
        tracing::debug!("Drag started");
        Ok(())
    }

    /// Release the button if a drag is held.
    pub fn drag_stop(&mut self) -> TouchlessResult<()> {
        if !self.dragging {
            return Ok(());
        }
        self.backend.button_up()?;
        self.dragging = false;
        tracing::debug!("Drag stopped");
        Ok(())
    }

    /// Apply one action. `frame_size` is the camera frame the action's
    /// coordinates refer to.
    pub fn apply(&mut self, action: &Action, frame_size: (u32, u32)) -> TouchlessResult<()> {
        match *action {
            Action::Move { x, y } => {
                self.move_cursor(x as f64, y as f64, frame_size.0, frame_size.1)?;
            }
            Action::Click => self.click()?,
            Action::Scroll { amount } => self.scroll(amount)?,
            Action::DragStart if self.enable_drag => self.drag_start()?,
            Action::DragStop if self.enable_drag => self.drag_stop()?,
            Action::DragStart | Action::DragStop => {}
            Action::Debug { ear } => {
                tracing::trace!(ear, "Eye aspect ratio");
            }
        }
        Ok(())
    }
}

impl<B: PointerBackend> Drop for PointerController<B> {
    fn drop(&mut self) {
        if self.dragging {
            if let Err(e) = self.backend.button_up() {
                tracing::warn!(error = %e, "Failed to release held button");
            }
        }
    }
}

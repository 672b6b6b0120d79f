//! Pointer backend implementations.
//!
//! Each backend delivers the five pointer primitives somewhere different:
//! the real OS pointer, the log, or an in-memory list.

use touchless_common::error::{TouchlessError, TouchlessResult};
use touchless_platform_core::{PointerBackend, ScreenSize};

/// OS pointer through the `enigo` crate.
#[cfg(feature = "enigo")]
pub struct EnigoBackend {
    enigo: enigo::Enigo,
    screen: ScreenSize,
}

/// Wheel units per emitted notch. Gesture scroll amounts use the
/// 60-per-gesture scale of desktop automation tools; enigo counts notches.
#[cfg(feature = "enigo")]
const SCROLL_UNITS_PER_NOTCH: f64 = 20.0;

#[cfg(feature = "enigo")]
impl EnigoBackend {
    pub fn new() -> TouchlessResult<Self> {
        use enigo::Mouse;

        let enigo = enigo::Enigo::new(&enigo::Settings::default()).map_err(|e| {
            TouchlessError::pointer(format!("Failed to connect to the display server: {e}"))
        })?;
        let (width, height) = enigo
            .main_display()
            .map_err(|e| TouchlessError::pointer(format!("Failed to query display size: {e}")))?;

        Ok(Self {
            enigo,
            screen: ScreenSize::new(width.max(1) as u32, height.max(1) as u32),
        })
    }

    fn press(&mut self, direction: enigo::Direction, what: &str) -> TouchlessResult<()> {
        use enigo::Mouse;

        self.enigo
            .button(enigo::Button::Left, direction)
            .map_err(|e| TouchlessError::pointer(format!("Failed to {what}: {e}")))
    }
}

#[cfg(feature = "enigo")]
impl PointerBackend for EnigoBackend {
    fn screen_size(&self) -> TouchlessResult<ScreenSize> {
        Ok(self.screen)
    }

    fn move_to(&mut self, x: f64, y: f64) -> TouchlessResult<()> {
        use enigo::Mouse;

        let max_x = self.screen.width.saturating_sub(1) as f64;
        let max_y = self.screen.height.saturating_sub(1) as f64;
        let x = x.round().clamp(0.0, max_x) as i32;
        let y = y.round().clamp(0.0, max_y) as i32;
        self.enigo
            .move_mouse(x, y, enigo::Coordinate::Abs)
            .map_err(|e| TouchlessError::pointer(format!("Failed to move pointer: {e}")))
    }

    fn click(&mut self) -> TouchlessResult<()> {
        self.press(enigo::Direction::Click, "click")
    }

    fn scroll(&mut self, amount: i32) -> TouchlessResult<()> {
        use enigo::Mouse;

        let notches = (amount as f64 / SCROLL_UNITS_PER_NOTCH).round() as i32;
        let notches = if notches == 0 { amount.signum() } else { notches };
        // enigo scrolls down for positive lengths.
        self.enigo
            .scroll(-notches, enigo::Axis::Vertical)
            .map_err(|e| TouchlessError::pointer(format!("Failed to scroll: {e}")))
    }

    fn button_down(&mut self) -> TouchlessResult<()> {
        self.press(enigo::Direction::Press, "press button")
    }

    fn button_up(&mut self) -> TouchlessResult<()> {
        self.press(enigo::Direction::Release, "release button")
    }

    fn name(&self) -> &str {
        "enigo"
    }
}

/// Logs every primitive instead of moving the pointer.
pub struct DryRunBackend {
    screen: ScreenSize,
}

impl DryRunBackend {
    pub fn new(screen: ScreenSize) -> Self {
        Self { screen }
    }
}

impl PointerBackend for DryRunBackend {
    fn screen_size(&self) -> TouchlessResult<ScreenSize> {
        Ok(self.screen)
    }

    fn move_to(&mut self, x: f64, y: f64) -> TouchlessResult<()> {
        tracing::debug!(x = format_args!("{x:.1}"), y = format_args!("{y:.1}"), "move_to");
        Ok(())
    }

    fn click(&mut self) -> TouchlessResult<()> {
        tracing::info!("click");
        Ok(())
    }

    fn scroll(&mut self, amount: i32) -> TouchlessResult<()> {
        tracing::info!(amount, "scroll");
        Ok(())
    }

    fn button_down(&mut self) -> TouchlessResult<()> {
        tracing::info!("button_down");
        Ok(())
    }

    fn button_up(&mut self) -> TouchlessResult<()> {
        tracing::info!("button_up");
        Ok(())
    }

    fn name(&self) -> &str {
        "dry-run"
    }
}

/// A primitive issued to a [`RecordingBackend`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerCall {
    MoveTo { x: f64, y: f64 },
    Click,
    Scroll { amount: i32 },
    ButtonDown,
    ButtonUp,
}

/// Test backend that records primitives instead of issuing them.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    screen: ScreenSize,
    calls: Vec<PointerCall>,
    failing: bool,
}

impl RecordingBackend {
    pub fn new(screen: ScreenSize) -> Self {
        Self {
            screen,
            calls: Vec::new(),
            failing: false,
        }
    }

    /// A backend whose primitives all fail (nothing is recorded).
    pub fn failing(screen: ScreenSize) -> Self {
        Self {
            failing: true,
            ..Self::new(screen)
        }
    }

    pub fn calls(&self) -> &[PointerCall] {
        &self.calls
    }

    /// Positions of every recorded move, in order.
    pub fn moves(&self) -> Vec<(f64, f64)> {
        self.calls
            .iter()
            .filter_map(|call| match *call {
                PointerCall::MoveTo { x, y } => Some((x, y)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: PointerCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    fn record(&mut self, call: PointerCall) -> TouchlessResult<()> {
        if self.failing {
            return Err(TouchlessError::pointer(format!(
                "recording backend rejected {call:?}"
            )));
        }
        self.calls.push(call);
        Ok(())
    }
}

impl PointerBackend for RecordingBackend {
    fn screen_size(&self) -> TouchlessResult<ScreenSize> {
        Ok(self.screen)
    }

    fn move_to(&mut self, x: f64, y: f64) -> TouchlessResult<()> {
        self.record(PointerCall::MoveTo { x, y })
    }

    fn click(&mut self) -> TouchlessResult<()> {
        self.record(PointerCall::Click)
    }

    fn scroll(&mut self, amount: i32) -> TouchlessResult<()> {
        self.record(PointerCall::Scroll { amount })
    }

    fn button_down(&mut self) -> TouchlessResult<()> {
        self.record(PointerCall::ButtonDown)
    }

    fn button_up(&mut self) -> TouchlessResult<()> {
        self.record(PointerCall::ButtonUp)
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Pick the best pointer backend available in this build.
///
/// `screen` overrides the size reported by the dry-run fallback.
pub fn detect_best_backend(screen: Option<ScreenSize>) -> Box<dyn PointerBackend> {
    #[cfg(feature = "enigo")]
    match EnigoBackend::new() {
        Ok(backend) => {
            tracing::info!("Using enigo pointer backend");
            return Box::new(backend);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to initialize enigo backend, using dry-run");
        }
    }

    #[cfg(not(feature = "enigo"))]
    tracing::warn!("Built without the `enigo` feature; pointer actions will only be logged");

    Box::new(DryRunBackend::new(screen.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_backend_collects_calls() {
        let mut backend = RecordingBackend::new(ScreenSize::new(800, 600));
        backend.move_to(1.0, 2.0).unwrap();
        backend.click().unwrap();
        backend.scroll(-60).unwrap();
        assert_eq!(
            backend.calls(),
            &[
                PointerCall::MoveTo { x: 1.0, y: 2.0 },
                PointerCall::Click,
                PointerCall::Scroll { amount: -60 },
            ]
        );
        assert_eq!(backend.moves(), vec![(1.0, 2.0)]);
    }

    #[test]
    fn test_failing_backend_records_nothing() {
        let mut backend = RecordingBackend::failing(ScreenSize::default());
        let err = backend.button_down().unwrap_err();
        assert!(matches!(err, TouchlessError::Pointer { .. }));
        assert!(backend.calls().is_empty());
    }

    #[cfg(not(feature = "enigo"))]
    #[test]
    fn test_detect_falls_back_to_dry_run() {
        let backend = detect_best_backend(Some(ScreenSize::new(1280, 720)));
        assert_eq!(backend.name(), "dry-run");
        assert_eq!(backend.screen_size().unwrap(), ScreenSize::new(1280, 720));
    }
}

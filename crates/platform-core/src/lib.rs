//! Touchless platform core contracts.
//!
//! This crate holds the pointer output contract implemented by every OS
//! backend, plus the camera-to-screen coordinate mapping shared by the
//! pointer controller and diagnostic tooling.

use serde::{Deserialize, Serialize};
use touchless_common::error::TouchlessResult;

/// Screen resolution in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

/// OS pointer primitives.
///
/// Backends are driven from a single control loop and never concurrently.
pub trait PointerBackend {
    /// Current screen resolution. Queried once when a controller is built.
    fn screen_size(&self) -> TouchlessResult<ScreenSize>;

    /// Move the pointer to absolute screen coordinates.
    fn move_to(&mut self, x: f64, y: f64) -> TouchlessResult<()>;

    /// Press and release the left button.
    fn click(&mut self) -> TouchlessResult<()>;

    /// Scroll vertically. Positive scrolls up.
    fn scroll(&mut self, amount: i32) -> TouchlessResult<()>;

    /// Press the left button without releasing.
    fn button_down(&mut self) -> TouchlessResult<()>;

    /// Release the left button.
    fn button_up(&mut self) -> TouchlessResult<()>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

impl<B: PointerBackend + ?Sized> PointerBackend for Box<B> {
    fn screen_size(&self) -> TouchlessResult<ScreenSize> {
        (**self).screen_size()
    }

    fn move_to(&mut self, x: f64, y: f64) -> TouchlessResult<()> {
        (**self).move_to(x, y)
    }

    fn click(&mut self) -> TouchlessResult<()> {
        (**self).click()
    }

    fn scroll(&mut self, amount: i32) -> TouchlessResult<()> {
        (**self).scroll(amount)
    }

    fn button_down(&mut self) -> TouchlessResult<()> {
        (**self).button_down()
    }

    fn button_up(&mut self) -> TouchlessResult<()> {
        (**self).button_up()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// The inset rectangle of the camera frame that maps onto the full screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveZone {
    pub margin: f64,
    pub frame_width: f64,
    pub frame_height: f64,
}

impl ActiveZone {
    pub fn new(margin: u32, frame_width: u32, frame_height: u32) -> Self {
        Self {
            margin: margin as f64,
            frame_width: frame_width as f64,
            frame_height: frame_height as f64,
        }
    }

    /// Clamp a camera point into the zone, then map it linearly onto
    /// `[0, screen.width] x [0, screen.height]`.
    pub fn to_screen(&self, camera_x: f64, camera_y: f64, screen: ScreenSize) -> (f64, f64) {
        let x = remap_axis(
            camera_x,
            self.margin,
            self.frame_width - self.margin,
            screen.width as f64,
        );
        let y = remap_axis(
            camera_y,
            self.margin,
            self.frame_height - self.margin,
            screen.height as f64,
        );
        (x, y)
    }
}

/// Clamp `value` into `[lo, hi]` and map that range onto `[0, out_max]`.
///
/// An empty or inverted input range maps everything to the midpoint.
pub fn remap_axis(value: f64, lo: f64, hi: f64, out_max: f64) -> f64 {
    let span = hi - lo;
    if !(span > 0.0) {
        return out_max / 2.0;
    }
    let clamped = value.clamp(lo, hi);
    (clamped - lo) / span * out_max
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn remap_hits_zone_edges() {
        assert_eq!(remap_axis(80.0, 80.0, 560.0, 1920.0), 0.0);
        assert_eq!(remap_axis(560.0, 80.0, 560.0, 1920.0), 1920.0);
        assert_eq!(remap_axis(320.0, 80.0, 560.0, 1920.0), 960.0);
    }

    #[test]
    fn points_outside_zone_clamp_to_edges() {
        let zone = ActiveZone::new(80, 640, 480);
        let screen = ScreenSize::new(1920, 1080);
        assert_eq!(zone.to_screen(0.0, 0.0, screen), zone.to_screen(80.0, 80.0, screen));
        assert_eq!(
            zone.to_screen(640.0, 480.0, screen),
            zone.to_screen(560.0, 400.0, screen)
        );
    }

    #[test]
    fn degenerate_zone_maps_to_center() {
        let zone = ActiveZone::new(320, 640, 480);
        let (x, y) = zone.to_screen(100.0, 100.0, ScreenSize::new(1920, 1080));
        assert_eq!((x, y), (960.0, 540.0));
    }

    proptest! {
        #[test]
        fn remap_stays_on_screen(
            value in -10_000.0_f64..10_000.0,
            margin in 0u32..200,
        ) {
            let zone = ActiveZone::new(margin, 640, 480);
            let screen = ScreenSize::new(2560, 1440);
            let (x, y) = zone.to_screen(value, value, screen);
            prop_assert!((0.0..=2560.0).contains(&x));
            prop_assert!((0.0..=1440.0).contains(&y));
        }
    }
}

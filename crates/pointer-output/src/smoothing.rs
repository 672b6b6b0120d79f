//! Screen-space motion filtering for live pointer control.
//!
//! Each target passes through three stages relative to the last issued
//! position:
//!
//! 1. **Deadzone:** targets closer than `deadzone_px` are dropped.
//! 2. **Max step:** targets farther than `max_step_px` are pulled in along
//!    the same direction, bounding single-frame tracking glitches.
//! 3. **Smoothing:** the pointer covers `1 / smoothing` of the remaining
//!    distance. Larger factors are smoother but lag more.
//!
//! The first target after construction is taken as-is.

use touchless_common::config::PointerConfig;

/// Outcome of filtering one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionStep {
    /// No previous position existed; jump straight to the target.
    Jump { x: f64, y: f64 },

    /// Regular filtered move. `clamped` is set when the target was pulled in.
    Smoothed { x: f64, y: f64, clamped: bool },

    /// Inside the deadzone.
    Discarded,
}

impl MotionStep {
    /// Position to issue, if any.
    pub fn position(&self) -> Option<(f64, f64)> {
        match *self {
            MotionStep::Jump { x, y } | MotionStep::Smoothed { x, y, .. } => Some((x, y)),
            MotionStep::Discarded => None,
        }
    }
}

/// Stateful deadzone / max-step / exponential filter.
#[derive(Debug, Clone)]
pub struct MotionFilter {
    smoothing: f64,
    deadzone_px: f64,
    max_step_px: f64,
    previous: Option<(f64, f64)>,
}

impl MotionFilter {
    pub fn new(smoothing: f64, deadzone_px: f64, max_step_px: f64) -> Self {
        Self {
            smoothing: smoothing.max(1.0),
            deadzone_px: deadzone_px.max(0.0),
            max_step_px: max_step_px.max(0.0),
            previous: None,
        }
    }

    pub fn from_config(config: &PointerConfig) -> Self {
        Self::new(config.smoothing, config.deadzone_px, config.max_step_px)
    }

    /// Last committed position.
    pub fn previous(&self) -> Option<(f64, f64)> {
        self.previous
    }

    /// Filter a target without changing state.
    pub fn propose(&self, target_x: f64, target_y: f64) -> MotionStep {
        let Some((prev_x, prev_y)) = self.previous else {
            return MotionStep::Jump {
                x: target_x,
                y: target_y,
            };
        };

        let mut dx = target_x - prev_x;
        let mut dy = target_y - prev_y;
        let distance = dx.hypot(dy);

        if distance < self.deadzone_px {
            return MotionStep::Discarded;
        }

        let clamped = distance > self.max_step_px;
        if clamped {
            let scale = self.max_step_px / distance;
            dx *= scale;
            dy *= scale;
        }

        MotionStep::Smoothed {
            x: prev_x + dx / self.smoothing,
            y: prev_y + dy / self.smoothing,
            clamped,
        }
    }

    /// Record a position as issued.
    pub fn commit(&mut self, x: f64, y: f64) {
        self.previous = Some((x, y));
    }

    /// Filter and commit in one step.
    pub fn step(&mut self, target_x: f64, target_y: f64) -> MotionStep {
        let step = self.propose(target_x, target_y);
        if let Some((x, y)) = step.position() {
            self.commit(x, y);
        }
        step
    }
}

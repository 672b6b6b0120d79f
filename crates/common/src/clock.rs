//! Clock utilities for gesture timing.
//!
//! Every cooldown in the gesture engines is measured against a monotonic
//! epoch captured when a control session starts. Recorded landmark streams
//! carry nanosecond offsets from that same kind of epoch, so live and
//! replayed sessions share one time base.

use std::time::Instant;

/// A session clock that provides monotonic timestamps relative to
/// a fixed epoch (the moment the session started).
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// The instant the session started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a new session clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Get nanoseconds elapsed since session start.
    pub fn elapsed_ns(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    /// Get seconds elapsed since session start.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// Convert an elapsed nanosecond value to seconds.
    pub fn ns_to_secs(ns: u64) -> f64 {
        ns as f64 / 1_000_000_000.0
    }

    /// Convert seconds to nanoseconds, rounding to the nearest value.
    pub fn secs_to_ns(secs: f64) -> u64 {
        (secs * 1_000_000_000.0).round() as u64
    }
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::start()
    }
}

/// Gate that opens once `cooldown_secs` have passed since it last fired.
///
/// A gate that has never fired is open.
#[derive(Debug, Clone, Copy)]
pub struct Cooldown {
    cooldown_secs: f64,
    last_fired_secs: Option<f64>,
}

impl Cooldown {
    pub fn new(cooldown_secs: f64) -> Self {
        Self {
            cooldown_secs,
            last_fired_secs: None,
        }
    }

    /// Whether the gate is open at `now_secs`.
    pub fn is_ready(&self, now_secs: f64) -> bool {
        match self.last_fired_secs {
            None => true,
            Some(last) => now_secs - last >= self.cooldown_secs,
        }
    }

    /// Record that the gated action consumed the window at `now_secs`.
    pub fn fire(&mut self, now_secs: f64) {
        self.last_fired_secs = Some(now_secs);
    }

    /// Time of the last consumed window, if any.
    pub fn last_fired_secs(&self) -> Option<f64> {
        self.last_fired_secs
    }

    pub fn cooldown_secs(&self) -> f64 {
        self.cooldown_secs
    }
}

//! Application configuration.
//!
//! Loaded once at startup and handed to each component by reference.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{TouchlessError, TouchlessResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Camera the landmark tracker reads from.
    pub camera: CameraConfig,

    /// Pointer output and motion filtering.
    pub pointer: PointerConfig,

    /// Hand gesture thresholds.
    pub hand: HandGestureConfig,

    /// Face gesture thresholds.
    pub face: FaceGestureConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Camera parameters. Also the fallback frame size for frames that
/// do not declare their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub index: u32,
    pub width: u32,
    pub height: u32,
}

/// Pointer controller parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Inset (camera pixels) of the active zone on every side of the frame.
    pub frame_margin: u32,

    /// Exponential smoothing divisor. 1.0 disables smoothing.
    pub smoothing: f64,

    /// Moves shorter than this (screen pixels) are discarded.
    pub deadzone_px: f64,

    /// Longest distance (screen pixels) a single target may lie from the
    /// previous position before it is pulled in.
    pub max_step_px: f64,

    /// Whether fist drags press and release the button.
    pub enable_drag: bool,
}

/// Thresholds for the two-hand gesture engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandGestureConfig {
    /// Thumb-to-index pinch distance (camera pixels) that counts as a click.
    pub click_threshold_px: f64,

    pub click_cooldown_secs: f64,

    pub scroll_cooldown_secs: f64,

    /// Magnitude of each emitted scroll.
    pub scroll_amount: i32,

    /// Vertical tip offset (camera pixels) that must be exceeded before a
    /// scroll direction is chosen.
    pub scroll_dead_band_px: i32,

    /// Allow pinch clicks while the left palm holds the pause pose.
    pub click_while_paused: bool,
}

/// Thresholds for the face gesture engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceGestureConfig {
    /// Eye aspect ratio below which the eyes count as closed.
    pub blink_threshold: f64,

    pub click_cooldown_secs: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "touchless=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            width: 640,
            height: 480,
        }
    }
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            frame_margin: 80,
            smoothing: 8.0,
            deadzone_px: 2.0,
            max_step_px: 120.0,
            enable_drag: true,
        }
    }
}

impl Default for HandGestureConfig {
    fn default() -> Self {
        Self {
            click_threshold_px: 28.0,
            click_cooldown_secs: 0.35,
            scroll_cooldown_secs: 0.10,
            scroll_amount: 60,
            scroll_dead_band_px: 10,
            click_while_paused: false,
        }
    }
}

impl Default for FaceGestureConfig {
    fn default() -> Self {
        Self {
            blink_threshold: 0.20,
            click_cooldown_secs: 0.6,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> TouchlessResult<Self> {
        if !path.exists() {
            return Err(TouchlessError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the standard location, returning the path written.
    pub fn save(&self) -> TouchlessResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, path: &Path) -> TouchlessResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject knob combinations the controller and engines cannot honor.
    pub fn validate(&self) -> TouchlessResult<()> {
        let margin = self.pointer.frame_margin as u64 * 2;
        if margin >= self.camera.width as u64 || margin >= self.camera.height as u64 {
            return Err(TouchlessError::config(format!(
                "frame_margin {} leaves no active zone in a {}x{} frame",
                self.pointer.frame_margin, self.camera.width, self.camera.height
            )));
        }
        if !(self.pointer.smoothing >= 1.0) {
            return Err(TouchlessError::config(format!(
                "pointer.smoothing must be >= 1.0, got {}",
                self.pointer.smoothing
            )));
        }
        if !(self.pointer.deadzone_px >= 0.0) {
            return Err(TouchlessError::config("pointer.deadzone_px must be >= 0"));
        }
        if !(self.pointer.max_step_px >= self.pointer.deadzone_px) {
            return Err(TouchlessError::config(
                "pointer.max_step_px must be >= pointer.deadzone_px",
            ));
        }
        for (name, value) in [
            ("hand.click_threshold_px", self.hand.click_threshold_px),
            ("hand.click_cooldown_secs", self.hand.click_cooldown_secs),
            ("hand.scroll_cooldown_secs", self.hand.scroll_cooldown_secs),
            ("face.blink_threshold", self.face.blink_threshold),
            ("face.click_cooldown_secs", self.face.click_cooldown_secs),
        ] {
            if !(value > 0.0) {
                return Err(TouchlessError::config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.hand.scroll_amount <= 0 {
            return Err(TouchlessError::config(format!(
                "hand.scroll_amount must be positive, got {}",
                self.hand.scroll_amount
            )));
        }
        if self.hand.scroll_dead_band_px < 0 {
            return Err(TouchlessError::config(
                "hand.scroll_dead_band_px must be >= 0",
            ));
        }
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("touchless").join("config.json")
}

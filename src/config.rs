//! Gameplay tuning
//!
//! Every constant the simulation reads lives in `GameConfig`. Defaults match
//! the shipped feel of the game; a RON file can override any subset of
//! fields (missing fields fall back to the defaults).

use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Error type for config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tuning constants for a play session.
///
/// Units: pixels, pixels per second, milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Viewport width in pixels
    pub viewport_width: f32,
    /// Viewport height in pixels
    pub viewport_height: f32,

    /// Frame time the delta factor is normalized against (60 fps)
    pub baseline_frame_ms: f32,

    /// Downward acceleration applied by the physics backend
    pub gravity: f32,
    /// Target horizontal run speed
    pub run_speed: f32,
    /// Vertical velocity set by a jump (negative = up)
    pub jump_velocity: f32,
    /// Absolute cap on vertical speed
    pub max_fall_speed: f32,
    /// Jumps available before touching ground again
    pub max_jumps: u32,
    /// Blend strength toward run speed per baseline frame
    pub run_acceleration: f32,

    /// Vertical velocity set by a pad boost (negative = up)
    pub pad_boost_velocity: f32,
    /// Pad cooldown before it can boost again
    pub pad_reset_delay_ms: f64,
    /// Cosmetic boost-hair duration
    pub boost_hair_ms: f32,

    /// Delay between death and respawn
    pub respawn_delay_ms: f64,

    /// Camera smoothing at the baseline frame rate
    pub camera_lerp: f32,

    pub coin_value: u32,
    pub multiplier_step: f32,
    pub max_multiplier: f32,

    /// Full open-close-open cycle of a smasher
    pub smasher_period_ms: f64,
    /// Portion of the cycle a smasher stays shut
    pub smasher_closed_ms: f64,

    /// Floating-text slots created at level start
    pub floating_text_pool_size: usize,
    pub floating_text_duration_ms: f32,
    pub floating_text_rise: f32,

    /// Scene started once the goal is reached
    pub completion_scene: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 960.0,
            viewport_height: 540.0,
            baseline_frame_ms: 1000.0 / 60.0,
            gravity: 1600.0,
            run_speed: 280.0,
            jump_velocity: -560.0,
            max_fall_speed: 900.0,
            max_jumps: 3,
            run_acceleration: 0.35,
            pad_boost_velocity: -750.0,
            pad_reset_delay_ms: 150.0,
            boost_hair_ms: 350.0,
            respawn_delay_ms: 400.0,
            camera_lerp: 0.08,
            coin_value: 10,
            multiplier_step: 0.5,
            max_multiplier: 5.0,
            smasher_period_ms: 2000.0,
            smasher_closed_ms: 900.0,
            floating_text_pool_size: 12,
            floating_text_duration_ms: 400.0,
            floating_text_rise: 30.0,
            completion_scene: "menu".to_string(),
        }
    }
}

impl GameConfig {
    /// Load config from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Parse config from a RON string and validate it
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_jumps == 0 {
            return Err(ConfigError::Invalid("max_jumps must be at least 1".into()));
        }
        if !(self.max_multiplier >= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "max_multiplier must be >= 1 (got {})",
                self.max_multiplier
            )));
        }
        if !(self.baseline_frame_ms > 0.0) {
            return Err(ConfigError::Invalid("baseline_frame_ms must be positive".into()));
        }
        if !(self.smasher_period_ms > 0.0) || !(self.smasher_closed_ms >= 0.0) {
            return Err(ConfigError::Invalid("smasher timings must be positive".into()));
        }
        if self.smasher_closed_ms >= self.smasher_period_ms {
            return Err(ConfigError::Invalid(format!(
                "smasher_closed_ms ({}) must be shorter than smasher_period_ms ({})",
                self.smasher_closed_ms, self.smasher_period_ms
            )));
        }
        if !(self.floating_text_duration_ms > 0.0) {
            return Err(ConfigError::Invalid("floating_text_duration_ms must be positive".into()));
        }
        if self.pad_reset_delay_ms < 0.0 || self.respawn_delay_ms < 0.0 {
            return Err(ConfigError::Invalid("delays cannot be negative".into()));
        }
        Ok(())
    }

    /// Frame delta normalized against the baseline frame, clamped to [0.25, 4]
    /// so tab suspension or a zero-length frame cannot blow up blending.
    pub fn delta_factor(&self, delta_ms: f32) -> f32 {
        (delta_ms / self.baseline_frame_ms).clamp(0.25, 4.0)
    }
}

// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Engine configuration
//!
//! Every field defaults to the tuned value, so an empty file (or no file)
//! yields the standard game feel. Files are TOML or RON, chosen by
//! extension:
//!
//! ```toml
//! viewport_width = 640
//! scale = 2.0
//!
//! [physics]
//! gravity = 0.2
//! max_jumps = 3
//! ```

pub use serde::{Deserialize, Serialize};

use crate::time::DEFAULT_MAX_TIME_FACTOR;
use std::path::Path;

/// Configuration loading and saving
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a `.toml` or `.ron` file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Self::from_str_as(&contents, DataFormat::from_path(path)?)
    }

    /// Parse configuration from in-memory contents
    fn from_str_as(contents: &str, format: DataFormat) -> Result<Self, ConfigError> {
        match format {
            DataFormat::Toml => {
                toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            DataFormat::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Serialise configuration in `format`
    fn to_string_as(&self, format: DataFormat) -> Result<String, ConfigError> {
        match format {
            DataFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
            }
            DataFormat::Ron => ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }

    /// Save configuration to a `.toml` or `.ron` file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = self.to_string_as(DataFormat::from_path(path)?)?;
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Text formats accepted for configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// TOML
    Toml,
    /// Rusty Object Notation
    Ron,
}

impl DataFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(DataFormat::Toml),
            Some("ron") => Ok(DataFormat::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Where the camera places its target on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetMode {
    /// Target at the top-left of the view
    Normal,
    /// Target at the centre of the view
    #[default]
    Center,
}

/// Movement tuning, in units per 60 Hz tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Horizontal acceleration while running
    pub run_accel: f32,
    /// Horizontal deceleration with no input
    pub stop_decel: f32,
    /// Speeds closer to zero than this snap to rest
    pub stop_epsilon: f32,
    /// Horizontal acceleration while rolling
    pub roll_accel: f32,
    /// Extra speed allowed while rolling
    pub roll_speed_bonus: f32,
    /// Downward acceleration
    pub gravity: f32,
    /// Upward speed of the first jump
    pub jump_speed: f32,
    /// Horizontal speed of a jump off a wall
    pub wall_kick_speed: f32,
    /// Downward pulse applied when jump is released early
    pub release_pulse: f32,
    /// Held frames after which an early release no longer cuts the jump
    pub release_frame_threshold: u32,
    /// Airborne jumps before landing
    pub max_jumps: u8,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        PhysicsTuning {
            run_accel: 0.2,
            stop_decel: 0.3,
            stop_epsilon: 0.18,
            roll_accel: 2.0,
            roll_speed_bonus: 2.0,
            gravity: 0.13,
            jump_speed: 5.0,
            wall_kick_speed: 5.0,
            release_pulse: 2.0,
            release_frame_threshold: 25,
            max_jumps: 2,
        }
    }
}

/// Engine-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window title
    pub title: String,
    /// Viewport width in screen pixels
    pub viewport_width: u32,
    /// Viewport height in screen pixels
    pub viewport_height: u32,
    /// Screen pixels per world unit
    pub scale: f32,
    /// Outline every entity box
    pub draw_debug: bool,
    /// Ceiling on the per-frame time factor
    pub max_time_factor: f32,
    /// Camera anchor
    pub target_mode: TargetMode,
    /// World units the camera shifts up to leave room for the HUD
    pub hud_bias: f32,
    /// Movement tuning
    pub physics: PhysicsTuning,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            title: "Scroller".to_string(),
            viewport_width: 800,
            viewport_height: 600,
            scale: 2.0,
            draw_debug: false,
            max_time_factor: DEFAULT_MAX_TIME_FACTOR,
            target_mode: TargetMode::Center,
            hud_bias: 20.0,
            physics: PhysicsTuning::default(),
        }
    }
}

impl Config for EngineConfig {}

//! Game settings
//!
//! Loaded from an optional JSON file; any missing field takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, GameResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Presentation ===
    /// Logical render width (input arrives in this space)
    pub logical_width: f32,
    /// Logical render height
    pub logical_height: f32,
    /// Root directory prefixed to every sprite path
    pub asset_root: String,

    // === Timing ===
    /// Fixed logic rate
    pub ticks_per_second: u32,
    /// Catch-up ticks allowed per rendered frame
    pub max_frameskip: u32,
    /// Start/finish transition length in ticks
    pub transition_ticks: u32,

    // === Determinism ===
    /// RNG seed; `None` seeds from the clock at startup
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logical_width: LOGICAL_WIDTH,
            logical_height: LOGICAL_HEIGHT,
            asset_root: "res".to_string(),

            ticks_per_second: TICKS_PER_SECOND,
            max_frameskip: MAX_FRAMESKIP,
            transition_ticks: ANIMATION_DURATION_TICKS,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document
    pub fn from_json_str(json: &str) -> GameResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read and parse a settings file
    pub fn read_from(path: impl AsRef<Path>) -> GameResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load from a file, falling back to defaults if it is absent or invalid
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(GameError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Milliseconds per logic tick
    pub fn tick_ms(&self) -> u64 {
        1000 / u64::from(self.ticks_per_second.max(1))
    }

    /// Seconds covered by one scheduled tick
    pub fn tick_dt(&self) -> f32 {
        self.tick_ms() as f32 / 1000.0
    }

    /// Clamp values that would stall or divide by zero
    fn sanitized(mut self) -> Self {
        self.ticks_per_second = self.ticks_per_second.clamp(1, 1000);
        self.max_frameskip = self.max_frameskip.max(1);
        if self.logical_width <= 0.0 || self.logical_height <= 0.0 {
            self.logical_width = LOGICAL_WIDTH;
            self.logical_height = LOGICAL_HEIGHT;
        }
        self
    }
}

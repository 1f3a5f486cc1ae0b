//! Game settings and preferences
//!
//! Grid dimensions and the base tick interval. The interval is what the
//! UI's speed slider drives; turbo and slow-motion scale it from here.

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BASE_INTERVAL_MS, GRID_HEIGHT, GRID_WIDTH, MAX_BASE_INTERVAL_MS, MIN_BASE_INTERVAL_MS,
};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Playfield width in cells
    pub grid_width: i32,
    /// Playfield height in cells
    pub grid_height: i32,
    /// Base tick interval in milliseconds (speed slider)
    pub base_interval_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            base_interval_ms: DEFAULT_BASE_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// Clamp everything into playable ranges
    pub fn sanitize(&mut self) {
        self.grid_width = self.grid_width.max(8);
        self.grid_height = self.grid_height.max(8);
        self.base_interval_ms = self
            .base_interval_ms
            .clamp(MIN_BASE_INTERVAL_MS, MAX_BASE_INTERVAL_MS);
    }

    /// Map a 0-100 speed slider position to a base interval: slider 0 is
    /// the slowest (200 ms), slider 100 the fastest (50 ms)
    pub fn interval_from_slider(slider: u32) -> u32 {
        let t = slider.min(100) as f32 / 100.0;
        let span = (MAX_BASE_INTERVAL_MS - MIN_BASE_INTERVAL_MS) as f32;
        (MAX_BASE_INTERVAL_MS as f32 - t * span).round() as u32
    }

    /// Parse settings from JSON, falling back to defaults on any error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(mut settings) => {
                settings.sanitize();
                settings
            }
            Err(err) => {
                log::warn!("ignoring bad settings JSON: {err}");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_endpoints() {
        assert_eq!(Settings::interval_from_slider(0), MAX_BASE_INTERVAL_MS);
        assert_eq!(Settings::interval_from_slider(100), MIN_BASE_INTERVAL_MS);
        assert_eq!(Settings::interval_from_slider(50), 125);
        // Out-of-range input clamps to the fast end
        assert_eq!(Settings::interval_from_slider(500), MIN_BASE_INTERVAL_MS);
    }

    #[test]
    fn test_sanitize_clamps() {
        let mut settings = Settings {
            grid_width: 2,
            grid_height: 1000,
            base_interval_ms: 5,
        };
        settings.sanitize();
        assert_eq!(settings.grid_width, 8);
        assert_eq!(settings.grid_height, 1000);
        assert_eq!(settings.base_interval_ms, MIN_BASE_INTERVAL_MS);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings::default();
        assert_eq!(Settings::from_json(&settings.to_json()), settings);
    }

    #[test]
    fn test_bad_json_falls_back_to_defaults() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }
}

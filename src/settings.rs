//! Game settings and tunables
//!
//! Loaded from a JSON file (every field optional) and validated at startup.
//! Bad generator parameters are configuration errors, never runtime faults.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::generator::GeneratorConfig;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("settings are not valid json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be within 0.0..=1.0 (got {value})")]
    OutOfUnitRange { field: &'static str, value: f32 },
    #[error("gap height {gap_height} must be smaller than viewport height {viewport_height}")]
    GapTooTall { gap_height: f32, viewport_height: f32 },
    #[error("highest gap top {top} falls outside viewport height {viewport_height}")]
    GapOutOfBounds { top: f32, viewport_height: f32 },
    #[error("lowest gap bottom {bottom} lies inside the ground strip ({ground_height})")]
    GapBelowGround { bottom: f32, ground_height: f32 },
    #[error("jitter range {jitter_range} leaves no integer offset to draw")]
    JitterTooSmall { jitter_range: f32 },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub ground_height: f32,

    // === Walls ===
    pub wall_width: f32,
    pub wall_height: f32,
    /// Seconds for a wall to travel the viewport width plus its own width
    pub wall_travel_time: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Jitter range as a fraction of viewport height
    pub jitter_ratio: f32,
    /// Absolute jitter range, overrides `jitter_ratio`
    pub jitter_range: Option<f32>,
    /// Gap height as a fraction of viewport height
    pub gap_ratio: f32,
    /// Absolute gap height, overrides `gap_ratio`
    pub gap_height: Option<f32>,

    // === Bird ===
    pub bird_radius: f32,
    pub bird_spawn_x_ratio: f32,
    pub bird_spawn_y_ratio: f32,
    pub gravity: f32,
    pub flap_speed: f32,
    pub flap_frame_time: f32,
    pub death_roll_factor: f32,
    pub death_roll_duration: f32,

    // === Scenery ===
    pub ground_tile_width: f32,
    pub ground_scroll_period: f32,
    pub cloud_tile_width: f32,
    pub cloud_scroll_period: f32,

    /// Seed of the obstacle RNG stream
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            ground_height: GROUND_HEIGHT,

            wall_width: WALL_WIDTH,
            wall_height: WALL_HEIGHT,
            wall_travel_time: WALL_TRAVEL_TIME,
            spawn_interval: SPAWN_INTERVAL,
            jitter_ratio: JITTER_RATIO,
            jitter_range: None,
            gap_ratio: GAP_RATIO,
            gap_height: None,

            bird_radius: BIRD_RADIUS,
            bird_spawn_x_ratio: BIRD_SPAWN_X_RATIO,
            bird_spawn_y_ratio: BIRD_SPAWN_Y_RATIO,
            gravity: GRAVITY,
            flap_speed: FLAP_SPEED,
            flap_frame_time: FLAP_FRAME_TIME,
            death_roll_factor: DEATH_ROLL_FACTOR,
            death_roll_duration: DEATH_ROLL_DURATION,

            ground_tile_width: GROUND_TILE_WIDTH,
            ground_scroll_period: GROUND_SCROLL_PERIOD,
            cloud_tile_width: CLOUD_TILE_WIDTH,
            cloud_scroll_period: CLOUD_SCROLL_PERIOD,

            seed: 0x5eed_f1a9,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check every tunable; generator parameters included
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("wall_width", self.wall_width),
            ("wall_height", self.wall_height),
            ("wall_travel_time", self.wall_travel_time),
            ("spawn_interval", self.spawn_interval),
            ("bird_radius", self.bird_radius),
            ("flap_speed", self.flap_speed),
            ("flap_frame_time", self.flap_frame_time),
            ("death_roll_duration", self.death_roll_duration),
            ("ground_tile_width", self.ground_tile_width),
            ("ground_scroll_period", self.ground_scroll_period),
            ("cloud_tile_width", self.cloud_tile_width),
            ("cloud_scroll_period", self.cloud_scroll_period),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let unit = [
            ("bird_spawn_x_ratio", self.bird_spawn_x_ratio),
            ("bird_spawn_y_ratio", self.bird_spawn_y_ratio),
            ("ground_height / viewport_height", self.ground_height / self.viewport_height),
        ];
        for (field, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfUnitRange { field, value });
            }
        }

        self.generator_config().validate()
    }

    /// Jitter range in points
    pub fn effective_jitter_range(&self) -> f32 {
        self.jitter_range
            .unwrap_or(self.viewport_height * self.jitter_ratio)
    }

    /// Gap height in points
    pub fn effective_gap_height(&self) -> f32 {
        self.gap_height
            .unwrap_or(self.viewport_height * self.gap_ratio)
    }

    /// Bird spawn point
    pub fn bird_spawn(&self) -> Vec2 {
        Vec2::new(
            self.viewport_width * self.bird_spawn_x_ratio,
            self.viewport_height * self.bird_spawn_y_ratio,
        )
    }

    /// Horizontal wall speed (pt/s)
    pub fn scroll_speed(&self) -> f32 {
        (self.viewport_width + self.wall_width) / self.wall_travel_time
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            ground_height: self.ground_height,
            wall_width: self.wall_width,
            wall_height: self.wall_height,
            jitter_range: self.effective_jitter_range(),
            gap_height: self.effective_gap_height(),
            bird_radius: self.bird_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_defaults_validate() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert!((settings.effective_gap_height() - 667.0 / 5.0).abs() < 1e-3);
        assert!((settings.effective_jitter_range() - 667.0 / 4.0).abs() < 1e-3);
        assert!(settings.bird_spawn().abs_diff_eq(Vec2::new(75.0, 466.9), 1e-3));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"viewport_height": 500.0, "seed": 7}"#).unwrap();
        assert_eq!(settings.viewport_height, 500.0);
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.wall_width, WALL_WIDTH);
        assert_eq!(settings.gap_height, None);
    }

    #[test]
    fn test_gap_taller_than_viewport_rejected() {
        let settings = Settings {
            gap_height: Some(700.0),
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::GapTooTall { .. })
        ));
    }

    #[test]
    fn test_gap_inside_ground_rejected() {
        // Lowest gap bottom with defaults is 250
        let settings = Settings {
            ground_height: 300.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::GapBelowGround { ground_height, .. }) if ground_height == 300.0
        ));
    }

    #[test]
    fn test_non_positive_field_named() {
        let settings = Settings {
            spawn_interval: 0.0,
            ..Default::default()
        };
        match settings.validate() {
            Err(ConfigError::NonPositive { field, .. }) => assert_eq!(field, "spawn_interval"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir()
            .join(format!("flappy-slit-settings-{}-{}", std::process::id(), n))
            .join("settings.json");
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings, Settings::default());
    }
}

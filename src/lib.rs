//! Flappy Slit - a Flappy Bird run lifecycle on a headless scene
//!
//! Core modules:
//! - `sim`: Run state machine, obstacle generator and the deterministic scene driver
//! - `persistence`: Integer key-value stores for the best score
//! - `highscores`: Best score record on top of an injected store
//! - `settings`: Tunables, loaded from JSON and validated at startup
//! - `hud`: Score label text

pub mod highscores;
pub mod hud;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use highscores::BestScore;
pub use settings::{ConfigError, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Store key of the persisted best score
    pub const BEST_SCORE_KEY: &str = "BEST";

    /// Viewport defaults (points, y-up)
    pub const VIEWPORT_WIDTH: f32 = 375.0;
    pub const VIEWPORT_HEIGHT: f32 = 667.0;
    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Wall sprite size
    pub const WALL_WIDTH: f32 = 60.0;
    pub const WALL_HEIGHT: f32 = 400.0;
    /// Seconds for a wall to cross the viewport plus its own width
    pub const WALL_TRAVEL_TIME: f32 = 4.0;
    /// Seconds between wall spawns
    pub const SPAWN_INTERVAL: f32 = 2.0;

    /// Vertical jitter range as a fraction of viewport height
    pub const JITTER_RATIO: f32 = 0.25;
    /// Gap height as a fraction of viewport height
    pub const GAP_RATIO: f32 = 0.2;

    /// Bird defaults
    pub const BIRD_RADIUS: f32 = 15.0;
    pub const BIRD_SPAWN_X_RATIO: f32 = 0.2;
    pub const BIRD_SPAWN_Y_RATIO: f32 = 0.7;
    /// Gravity (pt/s², negative is down)
    pub const GRAVITY: f32 = -600.0;
    /// Upward speed set by a tap (replaces vertical velocity)
    pub const FLAP_SPEED: f32 = 300.0;
    /// Seconds per flap animation frame
    pub const FLAP_FRAME_TIME: f32 = 0.2;

    /// Death roll: rotates by π · y · factor radians over the duration
    pub const DEATH_ROLL_FACTOR: f32 = 0.01;
    pub const DEATH_ROLL_DURATION: f32 = 1.0;

    /// Scenery tiles (width, seconds per tile)
    pub const GROUND_TILE_WIDTH: f32 = 336.0;
    pub const GROUND_SCROLL_PERIOD: f32 = 5.0;
    pub const CLOUD_TILE_WIDTH: f32 = 300.0;
    pub const CLOUD_SCROLL_PERIOD: f32 = 20.0;
}

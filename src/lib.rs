//! Catch Fall - catch the falling objects before they hit the ground
//!
//! Core modules:
//! - `sim`: Deterministic simulation (basket, falling objects, scoring, game state)
//! - `game`: Frame driver wiring the simulation to the high-score sync
//! - `highscores`: Client-side high score synchronization (local or remote)
//! - `persistence`: Durable local high score storage
//! - `server`: The high-score store and its HTTP API
//! - `settings`: Game and server configuration

pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod server;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, StorageError, SyncError};
pub use game::Game;
pub use highscores::{HighScoreSync, SharedHighScore};
pub use settings::{DifficultyRamp, GameConfig, Persistence, ServerConfig};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const TICK_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 600.0;
    pub const FIELD_HEIGHT: f32 = 400.0;

    /// Basket defaults
    pub const BASKET_WIDTH: f32 = 80.0;
    pub const BASKET_HEIGHT: f32 = 20.0;
    /// Distance from the basket's top edge to the bottom of the field
    pub const BASKET_BOTTOM_OFFSET: f32 = 30.0;
    /// Horizontal basket movement per tick
    pub const BASKET_STEP: f32 = 5.0;

    /// Falling object edge length
    pub const OBJECT_SIZE: f32 = 20.0;
    /// Per-tick spawn chance (~one object every 50 ticks)
    pub const SPAWN_PROBABILITY: f64 = 0.02;

    /// Lives at the start of every session
    pub const STARTING_LIVES: u8 = 3;

    /// Fall speed at session start (units per tick)
    pub const BASE_FALL_SPEED: f32 = 1.0;
    /// Fall speed gained at each ramp milestone
    pub const RAMP_INCREMENT: f32 = 0.5;
    /// Score interval between ramp milestones
    pub const RAMP_EVERY: u64 = 10;

    /// High-score API endpoint used when none is configured
    pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/high-scores";
    /// Key the high score is stored under in local persistence
    pub const HIGH_SCORE_KEY: &str = "highScore";
}

//! Game state and core simulation types
//!
//! Everything that belongs to one session lives in [`GameState`] and is rebuilt
//! together by [`GameState::reset`]. The high score is not session state; it
//! lives in [`crate::SharedHighScore`] because the network tasks write it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyController;
use super::spawner::Spawner;
use crate::consts::*;
use crate::settings::GameConfig;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Active gameplay, ticks advance the simulation
    Playing,
    /// Lives exhausted, frozen until reset
    GameOver,
}

/// The player's basket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Basket {
    /// Basket centered horizontally, resting near the bottom of the field
    pub fn centered(field_width: f32, field_height: f32) -> Self {
        Self {
            pos: Vec2::new(
                field_width / 2.0 - BASKET_WIDTH / 2.0,
                field_height - BASKET_BOTTOM_OFFSET,
            ),
            width: BASKET_WIDTH,
            height: BASKET_HEIGHT,
        }
    }

    /// Rightmost legal x for this basket
    #[inline]
    pub fn max_x(&self, field_width: f32) -> f32 {
        (field_width - self.width).max(0.0)
    }

    /// Keep the basket inside `[0, field_width - width]`
    pub fn clamp_to(&mut self, field_width: f32) {
        self.pos.x = self.pos.x.clamp(0.0, self.max_x(field_width));
    }

    /// Horizontal center (used by the autopilot)
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }
}

/// An object falling toward the basket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    /// Top-left corner
    pub pos: Vec2,
    /// Edge length of the square
    pub size: f32,
}

impl FallingObject {
    /// New object at the top of the field
    pub fn at_top(x: f32, size: f32) -> Self {
        Self {
            pos: Vec2::new(x, 0.0),
            size,
        }
    }
}

/// Things that happened during a tick, for renderers and audio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { x: f32 },
    Caught { pos: Vec2, score: u64 },
    Missed { pos: Vec2, lives: u8 },
    SpeedUp { fall_speed: f32 },
    GameOver { final_score: u64 },
}

/// Playfield bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

/// Complete per-session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Spawner seed for reproducibility
    pub seed: u64,
    pub field: Field,
    pub status: SessionStatus,
    pub basket: Basket,
    /// Falling objects in spawn order
    pub objects: Vec<FallingObject>,
    pub score: u64,
    pub lives: u8,
    pub difficulty: DifficultyController,
    pub spawner: Spawner,
    /// Ticks simulated this session
    pub time_ticks: u64,
    /// Events since the last [`GameState::take_events`]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session with default configuration and the given seed
    pub fn new(seed: u64) -> Self {
        Self::from_config(&GameConfig::default(), seed)
    }

    /// Create a session from configuration
    pub fn from_config(config: &GameConfig, seed: u64) -> Self {
        let field = Field {
            width: config.field_width,
            height: config.field_height,
        };
        Self {
            seed,
            field,
            status: SessionStatus::Playing,
            basket: Basket::centered(field.width, field.height),
            objects: Vec::new(),
            score: 0,
            lives: STARTING_LIVES,
            difficulty: DifficultyController::from_config(config),
            spawner: Spawner::new(seed, config.spawn_probability),
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Start a fresh session. The spawner keeps its RNG stream so consecutive
    /// sessions differ.
    pub fn reset(&mut self) {
        self.status = SessionStatus::Playing;
        self.basket = Basket::centered(self.field.width, self.field.height);
        self.objects.clear();
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.difficulty.reset();
        self.time_ticks = 0;
        self.events.clear();
        log::info!("New session started (seed {})", self.seed);
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.status == SessionStatus::GameOver
    }

    /// Current fall speed shared by every object
    #[inline]
    pub fn fall_speed(&self) -> f32 {
        self.difficulty.fall_speed()
    }

    /// Drain the events recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

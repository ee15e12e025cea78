//! Game and server configuration
//!
//! The game reads an optional JSON file named by `CATCH_FALL_CONFIG`, then
//! applies `CATCH_FALL_*` environment overrides. The server only reads
//! `BIND_ADDRESS` and `PORT`.

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Where the high score lives between sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Persistence {
    /// Durable local file, no network dependency
    #[default]
    Local,
    /// High-score HTTP API only, no local fallback
    Remote,
}

impl Persistence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Persistence::Local => "local",
            Persistence::Remote => "remote",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "local" => Some(Persistence::Local),
            "remote" => Some(Persistence::Remote),
            _ => None,
        }
    }
}

/// Whether catches speed up the fall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyRamp {
    #[default]
    Enabled,
    /// Constant fall speed for the whole session
    Disabled,
}

impl DifficultyRamp {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyRamp::Enabled => "enabled",
            DifficultyRamp::Disabled => "disabled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "enabled" | "on" | "true" => Some(DifficultyRamp::Enabled),
            "disabled" | "off" | "false" => Some(DifficultyRamp::Disabled),
            _ => None,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    // === High score ===
    pub persistence: Persistence,
    /// High-score API URL (remote persistence)
    pub endpoint: String,
    /// High score file (local persistence)
    pub storage_path: PathBuf,
    /// Per-request timeout for the high-score API; `None` waits indefinitely
    pub request_timeout_ms: Option<u64>,

    // === Difficulty ===
    pub difficulty_ramp: DifficultyRamp,
    /// Fall speed at session start (units per tick)
    pub base_fall_speed: f32,
    pub ramp_increment: f32,
    /// Score interval between speed-ups
    pub ramp_every: u64,

    // === Playfield ===
    pub field_width: f32,
    pub field_height: f32,
    pub spawn_probability: f64,

    /// Spawner seed; random per process when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            persistence: Persistence::Local,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            storage_path: PathBuf::from("highScore.json"),
            request_timeout_ms: None,

            difficulty_ramp: DifficultyRamp::Enabled,
            base_fall_speed: BASE_FALL_SPEED,
            ramp_increment: RAMP_INCREMENT,
            ramp_every: RAMP_EVERY,

            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            spawn_probability: SPAWN_PROBABILITY,

            seed: None,
        }
    }
}

impl GameConfig {
    /// Environment variable naming an optional JSON config file
    pub const CONFIG_FILE_VAR: &'static str = "CATCH_FALL_CONFIG";

    /// Load config from the optional file plus process environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::load`] with an injectable variable lookup
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup(Self::CONFIG_FILE_VAR) {
            Some(path) => {
                let json = std::fs::read_to_string(&path)?;
                log::info!("Loaded config from {}", path);
                Self::from_json(&json)?
            }
            None => Self::default(),
        };
        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply `CATCH_FALL_*` overrides; unparseable values are logged and ignored
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("CATCH_FALL_PERSISTENCE") {
            match Persistence::from_str(&value) {
                Some(p) => self.persistence = p,
                None => log::warn!("Invalid CATCH_FALL_PERSISTENCE '{}', using default", value),
            }
        }

        if let Some(value) = lookup("CATCH_FALL_ENDPOINT") {
            self.endpoint = value;
        }

        if let Some(value) = lookup("CATCH_FALL_DIFFICULTY_RAMP") {
            match DifficultyRamp::from_str(&value) {
                Some(r) => self.difficulty_ramp = r,
                None => log::warn!("Invalid CATCH_FALL_DIFFICULTY_RAMP '{}', using default", value),
            }
        }

        if let Some(value) = lookup("CATCH_FALL_BASE_SPEED") {
            match value.parse::<f32>() {
                Ok(speed) if speed > 0.0 => self.base_fall_speed = speed,
                _ => log::warn!("Invalid CATCH_FALL_BASE_SPEED '{}', using default", value),
            }
        }

        if let Some(value) = lookup("CATCH_FALL_SEED") {
            match value.parse::<u64>() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => log::warn!("Invalid CATCH_FALL_SEED '{}', ignoring", value),
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_fall_speed.is_finite() || self.base_fall_speed <= 0.0 {
            return Err(ConfigError::invalid("baseFallSpeed", "must be positive"));
        }
        if self.ramp_increment < 0.0 {
            return Err(ConfigError::invalid("rampIncrement", "must not be negative"));
        }
        if self.ramp_every == 0 {
            return Err(ConfigError::invalid("rampEvery", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(ConfigError::invalid("spawnProbability", "must be within [0, 1]"));
        }
        if self.field_width <= BASKET_WIDTH || self.field_width <= OBJECT_SIZE {
            return Err(ConfigError::invalid(
                "fieldWidth",
                format!("must exceed basket width {BASKET_WIDTH} and object size {OBJECT_SIZE}"),
            ));
        }
        if self.field_height <= BASKET_BOTTOM_OFFSET {
            return Err(ConfigError::invalid(
                "fieldHeight",
                format!("must exceed {BASKET_BOTTOM_OFFSET}"),
            ));
        }
        if self.persistence == Persistence::Remote && self.endpoint.is_empty() {
            return Err(ConfigError::invalid("endpoint", "required for remote persistence"));
        }
        Ok(())
    }

    /// Effective ramp step (zero when the ramp is disabled)
    pub fn effective_ramp_increment(&self) -> f32 {
        match self.difficulty_ramp {
            DifficultyRamp::Enabled => self.ramp_increment,
            DifficultyRamp::Disabled => 0.0,
        }
    }
}

/// High-score server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to
    pub bind_address: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        Self::load_with(|key| std::env::var(key).ok())
    }

    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("BIND_ADDRESS") {
            if let Ok(parsed) = addr.parse() {
                config.bind_address = parsed;
            } else {
                log::warn!("Invalid BIND_ADDRESS '{}', using default", addr);
            }
        }

        if let Some(port) = lookup("PORT") {
            match port.parse::<u16>() {
                Ok(parsed) if parsed > 0 => config.port = parsed,
                Ok(_) => log::warn!("PORT must be > 0, using default"),
                Err(_) => log::warn!("Invalid PORT '{}', using default", port),
            }
        }

        config
    }
}

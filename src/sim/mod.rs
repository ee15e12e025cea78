//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, input-device or network dependencies

pub mod collision;
pub mod difficulty;
pub mod input;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::overlaps;
pub use difficulty::DifficultyController;
pub use input::InputState;
pub use spawner::Spawner;
pub use state::{Basket, FallingObject, Field, GameEvent, GameState, SessionStatus};
pub use tick::tick;

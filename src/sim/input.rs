//! Logical input flags
//!
//! An external adapter (keyboard, touch, replay) writes these; the simulation
//! only reads them once per tick.

use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::consts::BASKET_STEP;

/// Directional input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
}

impl InputState {
    pub const LEFT: Self = Self {
        move_left: true,
        move_right: false,
    };
    pub const RIGHT: Self = Self {
        move_left: false,
        move_right: true,
    };

    /// Demo/idle mode: steer toward the object closest to the ground
    pub fn autopilot(state: &GameState) -> Self {
        let Some(target) = state
            .objects
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        else {
            return Self::default();
        };

        let target_x = target.pos.x + target.size / 2.0;
        let delta = target_x - state.basket.center_x();
        // Dead zone stops the basket jittering around the target
        if delta < -BASKET_STEP {
            Self::LEFT
        } else if delta > BASKET_STEP {
            Self::RIGHT
        } else {
            Self::default()
        }
    }
}

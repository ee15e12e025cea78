//! Fall speed and the difficulty ramp

use serde::{Deserialize, Serialize};

use crate::settings::GameConfig;

/// Tracks the fall speed shared by every object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyController {
    base_speed: f32,
    /// Speed gained per milestone (0 = constant speed)
    increment: f32,
    /// Score interval between milestones
    every: u64,
    fall_speed: f32,
}

impl DifficultyController {
    pub fn new(base_speed: f32, increment: f32, every: u64) -> Self {
        Self {
            base_speed,
            increment,
            every: every.max(1),
            fall_speed: base_speed,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.base_fall_speed,
            config.effective_ramp_increment(),
            config.ramp_every,
        )
    }

    /// Called with the new score right after a catch. Speeds up when the
    /// score lands on a milestone and returns the resulting fall speed.
    pub fn advance_on_score(&mut self, score: u64) -> f32 {
        if score > 0 && score.is_multiple_of(self.every) {
            self.fall_speed += self.increment;
        }
        self.fall_speed
    }

    #[inline]
    pub fn fall_speed(&self) -> f32 {
        self.fall_speed
    }

    #[inline]
    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    pub fn reset(&mut self) {
        self.fall_speed = self.base_speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DifficultyRamp;

    #[test]
    fn test_ramp_at_every_tenth_point() {
        let mut difficulty = DifficultyController::new(1.0, 0.5, 10);
        for score in 1..=9 {
            assert_eq!(difficulty.advance_on_score(score), 1.0);
        }
        assert_eq!(difficulty.advance_on_score(10), 1.5);
        for score in 11..=19 {
            assert_eq!(difficulty.advance_on_score(score), 1.5);
        }
        assert_eq!(difficulty.advance_on_score(20), 2.0);
        assert_eq!(difficulty.advance_on_score(30), 2.5);
    }

    #[test]
    fn test_disabled_ramp_keeps_constant_speed() {
        let config = GameConfig {
            difficulty_ramp: DifficultyRamp::Disabled,
            base_fall_speed: 2.0,
            ..Default::default()
        };
        let mut difficulty = DifficultyController::from_config(&config);
        for score in 1..=50 {
            assert_eq!(difficulty.advance_on_score(score), 2.0);
        }
    }

    #[test]
    fn test_reset_returns_to_base() {
        let mut difficulty = DifficultyController::new(1.0, 0.5, 10);
        difficulty.advance_on_score(10);
        difficulty.advance_on_score(20);
        assert_eq!(difficulty.fall_speed(), 2.0);
        difficulty.reset();
        assert_eq!(difficulty.fall_speed(), difficulty.base_speed());
    }
}

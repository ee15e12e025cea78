//! Simulation tick
//!
//! Advances one session by one frame. Order matters: basket, then each object
//! (fall, catch, ground), then spawning.

use super::collision::overlaps;
use super::input::InputState;
use super::state::{GameEvent, GameState, SessionStatus};
use crate::consts::*;

/// Advance the game state by one tick. Does nothing once the session is over.
pub fn tick(state: &mut GameState, input: &InputState) {
    if state.status == SessionStatus::GameOver {
        return;
    }

    state.time_ticks += 1;

    move_basket(state, input);
    update_objects(state);

    if state.status == SessionStatus::Playing {
        if let Some(object) = state.spawner.maybe_spawn(state.field.width, OBJECT_SIZE) {
            state.events.push(GameEvent::Spawned { x: object.pos.x });
            state.objects.push(object);
        }
    }
}

fn move_basket(state: &mut GameState, input: &InputState) {
    let field_width = state.field.width;
    let basket = &mut state.basket;

    if input.move_left && basket.pos.x > 0.0 {
        basket.pos.x -= BASKET_STEP;
    }
    if input.move_right && basket.pos.x + basket.width < field_width {
        basket.pos.x += BASKET_STEP;
    }
    basket.clamp_to(field_width);
}

/// Fall, catch and ground checks. Each object is resolved at most once per
/// tick and a catch always wins over the ground check.
fn update_objects(state: &mut GameState) {
    let objects = std::mem::take(&mut state.objects);
    let mut kept = Vec::with_capacity(objects.len() + 1);
    let mut pending = objects.into_iter();

    for mut object in pending.by_ref() {
        // Read per object: a speed-up earlier in this tick already applies
        object.pos.y += state.difficulty.fall_speed();

        if overlaps(&state.basket, &object) {
            state.score += 1;
            let before = state.difficulty.fall_speed();
            let fall_speed = state.difficulty.advance_on_score(state.score);
            state.events.push(GameEvent::Caught {
                pos: object.pos,
                score: state.score,
            });
            if fall_speed > before {
                log::debug!("Fall speed up to {} at score {}", fall_speed, state.score);
                state.events.push(GameEvent::SpeedUp { fall_speed });
            }
            continue;
        }

        if object.pos.y > state.field.height {
            state.lives = state.lives.saturating_sub(1);
            state.events.push(GameEvent::Missed {
                pos: object.pos,
                lives: state.lives,
            });

            if state.lives == 0 {
                state.status = SessionStatus::GameOver;
                state.events.push(GameEvent::GameOver {
                    final_score: state.score,
                });
                log::info!(
                    "Game over: score {} after {} ticks",
                    state.score,
                    state.time_ticks
                );
                break;
            }
            continue;
        }

        kept.push(object);
    }

    // Objects after a game-over are frozen where they were
    kept.extend(pending);
    state.objects = kept;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{DifficultyRamp, GameConfig};
    use crate::sim::state::FallingObject;
    use glam::Vec2;
    use proptest::prelude::*;

    /// Session with spawning disabled so tests place objects by hand
    fn quiet_state() -> GameState {
        let config = GameConfig {
            spawn_probability: 0.0,
            ..Default::default()
        };
        GameState::from_config(&config, 12345)
    }

    fn object_at(x: f32, y: f32) -> FallingObject {
        FallingObject {
            pos: Vec2::new(x, y),
            size: OBJECT_SIZE,
        }
    }

    #[test]
    fn test_move_right_ten_ticks() {
        let mut state = quiet_state();
        assert_eq!(state.basket.pos.x, 260.0);
        for _ in 0..10 {
            tick(&mut state, &InputState::RIGHT);
        }
        assert_eq!(state.basket.pos.x, 310.0);
    }

    #[test]
    fn test_basket_stops_at_walls() {
        let mut state = quiet_state();
        for _ in 0..200 {
            tick(&mut state, &InputState::LEFT);
        }
        assert_eq!(state.basket.pos.x, 0.0);

        for _ in 0..200 {
            tick(&mut state, &InputState::RIGHT);
        }
        assert_eq!(state.basket.pos.x, FIELD_WIDTH - BASKET_WIDTH);
    }

    #[test]
    fn test_both_flags_cancel_out() {
        let mut state = quiet_state();
        let both = InputState {
            move_left: true,
            move_right: true,
        };
        tick(&mut state, &both);
        assert_eq!(state.basket.pos.x, 260.0);
    }

    #[test]
    fn test_object_falls_into_basket() {
        let mut state = quiet_state();
        state.basket.pos = Vec2::new(90.0, 380.0);
        state.objects.push(object_at(100.0, 0.0));

        for _ in 0..359 {
            tick(&mut state, &InputState::default());
        }
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.objects[0].pos.y, 359.0);
        assert_eq!(state.score, 0);

        // Bottom edge reaches the basket top at y = 360
        tick(&mut state, &InputState::default());
        assert!(state.objects.is_empty());
        assert_eq!(state.score, 1);

        for _ in 360..380 {
            tick(&mut state, &InputState::default());
        }
        assert_eq!(state.score, 1);
        assert_eq!(state.lives, STARTING_LIVES);
    }

    #[test]
    fn test_catch_wins_over_ground() {
        let mut state = quiet_state();
        state.basket.pos = Vec2::new(90.0, 380.0);
        state.objects.push(object_at(100.0, FIELD_HEIGHT));

        tick(&mut state, &InputState::default());

        assert!(state.objects.is_empty());
        assert_eq!(state.score, 1);
        assert_eq!(state.lives, STARTING_LIVES);
        let events = state.take_events();
        assert!(matches!(events[0], GameEvent::Caught { score: 1, .. }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Missed { .. })));
    }

    #[test]
    fn test_miss_costs_one_life() {
        let mut state = quiet_state();
        // Basket spans 260..340; object is well to the right
        state.objects.push(object_at(500.0, FIELD_HEIGHT));

        tick(&mut state, &InputState::default());

        assert!(state.objects.is_empty());
        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.status, SessionStatus::Playing);
        assert_eq!(
            state.take_events(),
            vec![GameEvent::Missed {
                pos: Vec2::new(500.0, FIELD_HEIGHT + 1.0),
                lives: 2
            }]
        );
    }

    #[test]
    fn test_object_at_ground_line_is_not_missed() {
        let mut state = quiet_state();
        state.objects.push(object_at(500.0, FIELD_HEIGHT - 1.0));
        tick(&mut state, &InputState::default());
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.lives, STARTING_LIVES);
    }

    #[test]
    fn test_last_life_ends_session() {
        let mut state = quiet_state();
        state.lives = 1;
        state.score = 7;
        // Two misses in one tick: only the first is counted
        state.objects.push(object_at(500.0, FIELD_HEIGHT));
        state.objects.push(object_at(520.0, FIELD_HEIGHT));

        tick(&mut state, &InputState::default());

        assert_eq!(state.status, SessionStatus::GameOver);
        assert_eq!(state.lives, 0);
        assert_eq!(state.objects.len(), 1);
        assert!(
            state
                .take_events()
                .contains(&GameEvent::GameOver { final_score: 7 })
        );

        // Frozen until reset
        let snapshot = state.objects.clone();
        tick(&mut state, &InputState::RIGHT);
        assert_eq!(state.objects, snapshot);
        assert_eq!(state.basket.pos.x, 260.0);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_tenth_catch_speeds_up_fall() {
        let mut state = quiet_state();
        state.basket.pos = Vec2::new(90.0, 380.0);
        state.score = 9;
        state.objects.push(object_at(100.0, 370.0));
        // Not yet near the basket: falls at the new speed once the first is caught
        state.objects.push(object_at(100.0, 100.0));

        tick(&mut state, &InputState::default());

        assert_eq!(state.score, 10);
        assert_eq!(state.fall_speed(), 1.5);
        assert_eq!(state.objects[0].pos.y, 101.5);
        assert!(
            state
                .take_events()
                .contains(&GameEvent::SpeedUp { fall_speed: 1.5 })
        );
    }

    #[test]
    fn test_constant_speed_when_ramp_disabled() {
        let config = GameConfig {
            spawn_probability: 0.0,
            difficulty_ramp: DifficultyRamp::Disabled,
            base_fall_speed: 2.0,
            ..Default::default()
        };
        let mut state = GameState::from_config(&config, 1);
        state.basket.pos = Vec2::new(90.0, 380.0);
        state.score = 9;
        state.objects.push(object_at(100.0, 370.0));

        tick(&mut state, &InputState::default());

        assert_eq!(state.score, 10);
        assert_eq!(state.fall_speed(), 2.0);
    }

    #[test]
    fn test_spawning_adds_objects() {
        let config = GameConfig {
            spawn_probability: 1.0,
            ..Default::default()
        };
        let mut state = GameState::from_config(&config, 3);
        tick(&mut state, &InputState::default());
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.objects[0].pos.y, 0.0);
        let events = state.take_events();
        assert!(matches!(events.as_slice(), [GameEvent::Spawned { .. }]));
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        for i in 0..2000u32 {
            let input = InputState {
                move_left: i % 7 < 3,
                move_right: i % 11 > 6,
            };
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.objects, state2.objects);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.basket, state2.basket);
    }

    proptest! {
        #[test]
        fn prop_session_invariants(
            seed in any::<u64>(),
            inputs in prop::collection::vec((any::<bool>(), any::<bool>()), 1..3000),
        ) {
            let config = GameConfig {
                spawn_probability: 0.1,
                ..Default::default()
            };
            let mut state = GameState::from_config(&config, seed);

            for (move_left, move_right) in inputs {
                let (score, lives, speed) = (state.score, state.lives, state.fall_speed());
                tick(&mut state, &InputState { move_left, move_right });

                prop_assert!(state.basket.pos.x >= 0.0);
                prop_assert!(state.basket.pos.x <= FIELD_WIDTH - BASKET_WIDTH);
                prop_assert!(state.score >= score);
                prop_assert!(state.lives <= lives);
                prop_assert!(state.lives <= STARTING_LIVES);
                prop_assert!(state.fall_speed() >= speed);
                prop_assert_eq!(state.is_game_over(), state.lives == 0);
            }
        }

        #[test]
        fn prop_ramp_matches_score(seed in any::<u64>()) {
            let config = GameConfig {
                spawn_probability: 0.05,
                ..Default::default()
            };
            let mut state = GameState::from_config(&config, seed);
            for _ in 0..5000 {
                let input = InputState::autopilot(&state);
                tick(&mut state, &input);
            }
            let milestones = (state.score / RAMP_EVERY) as f32;
            prop_assert_eq!(state.fall_speed(), BASE_FALL_SPEED + milestones * RAMP_INCREMENT);
        }
    }
}

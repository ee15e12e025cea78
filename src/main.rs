//! Catch Fall entry point
//!
//! Headless runner: plays autopilot sessions against the configured high score
//! persistence and logs the results. Rendering and keyboard adapters drive
//! [`catch_fall::Game`] the same way, with their own input.

use catch_fall::sim::{GameEvent, InputState, SessionStatus};
use catch_fall::{Game, GameConfig, HighScoreSync};

/// Safety stop for a session the autopilot never loses
const MAX_SESSION_TICKS: u64 = 500_000;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Catch Fall v{} (headless) starting...", env!("CARGO_PKG_VERSION"));

    let config = GameConfig::load()?;
    let seed = config.seed.unwrap_or_else(rand::random);
    let sessions: u32 = std::env::var("CATCH_FALL_SESSIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);

    let runtime = tokio::runtime::Runtime::new()?;
    let sync = HighScoreSync::from_config(&config)?.with_runtime(runtime.handle().clone());
    let mut game = Game::new(&config, seed, sync);

    // Not awaited: the first tick must not wait on the network
    let _ = game.start();

    for session in 1..=sessions {
        while game.status() == SessionStatus::Playing && game.state.time_ticks < MAX_SESSION_TICKS {
            game.input = InputState::autopilot(&game.state);
            for event in game.frame() {
                match event {
                    GameEvent::SpeedUp { fall_speed } => {
                        log::info!("Speed up! Fall speed now {}", fall_speed)
                    }
                    GameEvent::Missed { lives, .. } => log::info!("Missed, {} lives left", lives),
                    _ => log::trace!("{:?}", event),
                }
            }
        }

        if game.status() == SessionStatus::Playing {
            log::warn!("Session {} stopped after {} ticks", session, MAX_SESSION_TICKS);
            break;
        }

        log::info!(
            "Session {}: final score {} in {} ticks (high score {})",
            session,
            game.state.score,
            game.state.time_ticks,
            game.high_score()
        );

        // Let an in-flight submission finish before the next session or exit
        if let Some(pending) = game.take_pending_submit() {
            let _ = runtime.block_on(pending);
        }
        game.restart();
    }

    Ok(())
}

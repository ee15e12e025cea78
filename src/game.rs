//! Frame driver
//!
//! Owns a session, the current input flags and the high score sync. A host
//! (renderer loop, headless runner) calls [`Game::frame`] once per frame or
//! [`Game::advance`] with elapsed wall time.

use tokio::task::JoinHandle;

use crate::consts::*;
use crate::highscores::HighScoreSync;
use crate::settings::GameConfig;
use crate::sim::{GameEvent, GameState, InputState, SessionStatus, tick};

pub struct Game {
    pub state: GameState,
    /// Written by the input adapter, read every tick
    pub input: InputState,
    sync: HighScoreSync,
    accumulator: f32,
    /// Last high score submission still in flight
    pending_submit: Option<JoinHandle<()>>,
}

impl Game {
    pub fn new(config: &GameConfig, seed: u64, sync: HighScoreSync) -> Self {
        log::info!(
            "Starting game: seed {}, {} persistence, base speed {}, ramp {}",
            seed,
            config.persistence.as_str(),
            config.base_fall_speed,
            config.difficulty_ramp.as_str()
        );
        Self {
            state: GameState::from_config(config, seed),
            input: InputState::default(),
            sync,
            accumulator: 0.0,
            pending_submit: None,
        }
    }

    /// Kick off the startup high score fetch without waiting for it
    pub fn start(&self) -> Option<JoinHandle<()>> {
        self.sync.fetch_current_high_score()
    }

    /// Run one tick with the current input. No-op after game over.
    pub fn frame(&mut self) -> Vec<GameEvent> {
        if self.state.status != SessionStatus::Playing {
            return Vec::new();
        }

        tick(&mut self.state, &self.input);
        let events = self.state.take_events();

        for event in &events {
            if let GameEvent::GameOver { final_score } = *event {
                self.finish_session(final_score);
            }
        }
        events
    }

    /// Fixed-timestep update for hosts with a variable frame rate
    pub fn advance(&mut self, dt: f32) -> Vec<GameEvent> {
        self.accumulator += dt.min(0.1);

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= TICK_DT && substeps < MAX_SUBSTEPS {
            events.extend(self.frame());
            self.accumulator -= TICK_DT;
            substeps += 1;
        }
        events
    }

    /// Start a new session. Only allowed once the current one is over.
    pub fn restart(&mut self) -> bool {
        if self.state.status != SessionStatus::GameOver {
            return false;
        }
        self.state.reset();
        self.accumulator = 0.0;
        true
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status
    }

    /// Best known score (read every frame for display)
    pub fn high_score(&self) -> u64 {
        self.sync.high_score().get()
    }

    pub fn sync(&self) -> &HighScoreSync {
        &self.sync
    }

    /// Hand over the in-flight submission so a host can wait for it on exit
    pub fn take_pending_submit(&mut self) -> Option<JoinHandle<()>> {
        self.pending_submit.take()
    }

    fn finish_session(&mut self, final_score: u64) {
        let best = self.high_score();
        if final_score > best {
            log::info!("New personal best: {} (previous {})", final_score, best);
            self.pending_submit = self.sync.submit(final_score);
        }
    }
}

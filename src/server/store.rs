//! The canonical high score
//!
//! One volatile integer. Updates are a compare-and-set on the value itself, so
//! concurrent submissions can never lower it.

use std::sync::atomic::{AtomicU64, Ordering};

/// Result of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored value replaced
    Updated { previous: u64 },
    /// Candidate was not strictly greater; nothing changed
    NotHigher { current: u64 },
}

#[derive(Debug, Default)]
pub struct HighScoreStore {
    high_score: AtomicU64,
}

impl HighScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.high_score.load(Ordering::Acquire)
    }

    /// Replace the stored value only if `candidate` beats it
    pub fn submit(&self, candidate: u64) -> SubmitOutcome {
        match self
            .high_score
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (candidate > current).then_some(candidate)
            }) {
            Ok(previous) => SubmitOutcome::Updated { previous },
            Err(current) => SubmitOutcome::NotHigher { current },
        }
    }
}

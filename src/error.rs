//! Error types
//!
//! Nothing in the game is fatal: these errors are logged by the fire-and-forget
//! handlers in `highscores` and the worst outcome is a stale high score.

use thiserror::Error;

/// Failure talking to the high score backend
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("high score request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("high score server answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("local high score storage failed: {0}")]
    Storage(#[from] StorageError),
}

/// Failure reading or writing the local high score file
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid high score document: {0}")]
    Format(#[from] serde_json::Error),
}

/// Invalid game or server configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

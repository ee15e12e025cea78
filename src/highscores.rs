//! High score synchronization
//!
//! The game reads the best score every frame while network tasks may write it,
//! so it lives in a [`SharedHighScore`] that only ever grows. Two backends:
//! - Local: a durable file, read at startup and written on a new best
//! - Remote: the high-score HTTP API, called from fire-and-forget tasks that
//!   log failures and never block the simulation

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::error::SyncError;
use crate::persistence::LocalStore;
use crate::server::{HighScorePayload, NOT_HIGHER_MESSAGE};
use crate::settings::{GameConfig, Persistence};

/// Best known score, shared between the game loop and network tasks
#[derive(Debug, Clone, Default)]
pub struct SharedHighScore(Arc<AtomicU64>);

impl SharedHighScore {
    pub fn new(initial: u64) -> Self {
        Self(Arc::new(AtomicU64::new(initial)))
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Raise to `candidate` if it is higher. Returns whether the value changed.
    pub fn raise(&self, candidate: u64) -> bool {
        self.0.fetch_max(candidate, Ordering::AcqRel) < candidate
    }
}

/// Server verdict on a submitted score
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    Accepted,
    /// Not strictly higher than the stored value
    Rejected(String),
}

/// HTTP client for the high-score API
#[derive(Debug, Clone)]
pub struct HighScoreClient {
    client: Client,
    endpoint: String,
}

impl HighScoreClient {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, SyncError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch(&self) -> Result<u64, SyncError> {
        let response = self.client.get(&self.endpoint).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        let payload: HighScorePayload = response.json().await?;
        Ok(payload.high_score)
    }

    pub async fn submit(&self, score: u64) -> Result<SubmitResult, SyncError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&HighScorePayload { high_score: score })
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(SubmitResult::Accepted),
            StatusCode::BAD_REQUEST => {
                let body = response.text().await.unwrap_or_default();
                if body == NOT_HIGHER_MESSAGE {
                    Ok(SubmitResult::Rejected(body))
                } else {
                    // Any other 400 means the server could not read the request
                    Err(SyncError::Status { status: 400, body })
                }
            }
            _ => Err(status_error(response).await),
        }
    }
}

async fn status_error(response: reqwest::Response) -> SyncError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    SyncError::Status { status, body }
}

#[derive(Debug, Clone)]
enum Backend {
    Local(LocalStore),
    Remote(HighScoreClient),
}

/// Client-side high score synchronization
#[derive(Debug, Clone)]
pub struct HighScoreSync {
    high_score: SharedHighScore,
    backend: Backend,
    /// Runtime the remote tasks are spawned on
    runtime: Option<Handle>,
}

impl HighScoreSync {
    pub fn from_config(config: &GameConfig) -> Result<Self, SyncError> {
        Ok(match config.persistence {
            Persistence::Local => Self::local(LocalStore::new(&config.storage_path)),
            Persistence::Remote => {
                let timeout = config.request_timeout_ms.map(Duration::from_millis);
                Self::remote(HighScoreClient::new(&config.endpoint, timeout)?)
            }
        })
    }

    pub fn local(store: LocalStore) -> Self {
        Self {
            high_score: SharedHighScore::default(),
            backend: Backend::Local(store),
            runtime: None,
        }
    }

    /// Remote sync on the current tokio runtime, if there is one
    pub fn remote(client: HighScoreClient) -> Self {
        Self {
            high_score: SharedHighScore::default(),
            backend: Backend::Remote(client),
            runtime: Handle::try_current().ok(),
        }
    }

    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn high_score(&self) -> &SharedHighScore {
        &self.high_score
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.backend, Backend::Remote(_))
    }

    /// Refresh the best score from the backend. Remote fetches run in the
    /// background; the returned handle is only for callers that want to wait.
    /// Failures leave the current value untouched.
    pub fn fetch_current_high_score(&self) -> Option<JoinHandle<()>> {
        match &self.backend {
            Backend::Local(store) => {
                match load_local(store, &self.high_score) {
                    Ok(Some(score)) => log::info!("Loaded high score {}", score),
                    Ok(None) => log::info!("No high score saved, starting fresh"),
                    Err(e) => log::warn!("Failed to load high score: {}", e),
                }
                None
            }
            Backend::Remote(client) => {
                let client = client.clone();
                let high_score = self.high_score.clone();
                self.spawn(async move {
                    match client.fetch().await {
                        Ok(score) => {
                            high_score.raise(score);
                            log::info!("Fetched high score {} from {}", score, client.endpoint());
                        }
                        Err(e) => {
                            log::error!("Error fetching high score from {}: {}", client.endpoint(), e)
                        }
                    }
                })
            }
        }
    }

    /// Record a new personal best.
    ///
    /// Local: adopted and saved immediately. Remote: posted in the background
    /// and NOT adopted locally; the server is authoritative and the value shows
    /// up on the next fetch.
    pub fn submit(&self, score: u64) -> Option<JoinHandle<()>> {
        match &self.backend {
            Backend::Local(store) => {
                if let Err(e) = save_local(store, &self.high_score, score) {
                    log::error!("Failed to save high score: {}", e);
                }
                None
            }
            Backend::Remote(client) => {
                let client = client.clone();
                self.spawn(async move {
                    match client.submit(score).await {
                        Ok(SubmitResult::Accepted) => {
                            log::info!("High score {} updated successfully", score)
                        }
                        Ok(SubmitResult::Rejected(reason)) => {
                            log::warn!("High score {} rejected: {}", score, reason)
                        }
                        Err(e) => {
                            log::error!("Error updating high score at {}: {}", client.endpoint(), e)
                        }
                    }
                })
            }
        }
    }

    fn spawn<F>(&self, task: F) -> Option<JoinHandle<()>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match &self.runtime {
            Some(runtime) => Some(runtime.spawn(task)),
            None => {
                log::error!("No async runtime for high score sync, skipping request");
                None
            }
        }
    }
}

/// Raise `high_score` from the saved value, if any
fn load_local(
    store: &LocalStore,
    high_score: &SharedHighScore,
) -> Result<Option<u64>, SyncError> {
    let saved = store.load()?;
    if let Some(score) = saved {
        high_score.raise(score);
    }
    Ok(saved)
}

/// Adopt `score` if it is a new best and write it through. Returns whether it
/// was adopted.
fn save_local(
    store: &LocalStore,
    high_score: &SharedHighScore,
    score: u64,
) -> Result<bool, SyncError> {
    if !high_score.raise(score) {
        return Ok(false);
    }
    store.save(score)?;
    Ok(true)
}

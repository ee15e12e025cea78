//! High-score HTTP API
//!
//! - `GET  /api/high-scores` → `200 {"highScore": n}`
//! - `POST /api/high-scores {"highScore": n}` → `200` when `n` beats the
//!   stored value, `400` otherwise or when the body is malformed
//!
//! Requests from any origin are allowed.

pub mod store;

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use store::{HighScoreStore, SubmitOutcome};

pub const HIGH_SCORES_PATH: &str = "/api/high-scores";

pub const UPDATED_MESSAGE: &str = "High score updated";
pub const NOT_HIGHER_MESSAGE: &str = "New high score is not higher";
pub const INVALID_PAYLOAD_MESSAGE: &str = "Invalid high score payload";

/// Wire body for both GET responses and POST requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScorePayload {
    pub high_score: u64,
}

/// Build the API router around a shared store
pub fn router(store: Arc<HighScoreStore>) -> Router {
    Router::new()
        .route(HIGH_SCORES_PATH, get(get_high_score).post(post_high_score))
        .layer(CorsLayer::permissive())
        .with_state(store)
}

/// Serve the API on an already bound listener until the task is dropped
pub async fn serve(listener: TcpListener, store: Arc<HighScoreStore>) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("High score server listening on http://{}", addr);
    }
    axum::serve(listener, router(store)).await
}

async fn get_high_score(State(store): State<Arc<HighScoreStore>>) -> Json<HighScorePayload> {
    Json(HighScorePayload {
        high_score: store.current(),
    })
}

/// The body is parsed by hand so every malformed request, including a missing
/// content type, is a 400 rather than an extractor-specific status.
async fn post_high_score(
    State(store): State<Arc<HighScoreStore>>,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let payload: HighScorePayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("Rejected malformed high score submission: {}", e);
            return (StatusCode::BAD_REQUEST, INVALID_PAYLOAD_MESSAGE);
        }
    };

    match store.submit(payload.high_score) {
        SubmitOutcome::Updated { previous } => {
            log::info!("High score updated: {} -> {}", previous, payload.high_score);
            (StatusCode::OK, UPDATED_MESSAGE)
        }
        SubmitOutcome::NotHigher { current } => {
            log::debug!(
                "High score {} rejected, current is {}",
                payload.high_score,
                current
            );
            (StatusCode::BAD_REQUEST, NOT_HIGHER_MESSAGE)
        }
    }
}

/// Bind the API on an ephemeral localhost port for tests
#[cfg(test)]
pub(crate) async fn spawn_test_server() -> (String, Arc<HighScoreStore>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let store = Arc::new(HighScoreStore::new());
    tokio::spawn(serve(listener, store.clone()));
    (format!("http://{addr}{HIGH_SCORES_PATH}"), store)
}

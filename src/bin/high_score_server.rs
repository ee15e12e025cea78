//! High score server entry point
//!
//! Serves `GET/POST /api/high-scores` from an in-memory store. The score resets
//! when the process exits.

use std::sync::Arc;

use catch_fall::ServerConfig;
use catch_fall::server::{self, HighScoreStore};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Catch Fall high score server v{}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::load_or_default();
    let listener = TcpListener::bind((config.bind_address, config.port)).await?;
    server::serve(listener, Arc::new(HighScoreStore::new())).await?;

    Ok(())
}

//! Hi-Lo · Survey Answer Judging Service
//!
//! - Normalizes and exact-matches guesses against ranked survey answers
//! - Parses AI judge replies defensively (the judge itself is called by the caller)
//! - Scores HIGH (rounds 1-2) and LOW (rounds 3-4) rounds and whole games
//! - Axum HTTP + WebSocket API over the pure judging core
//!
//! Important env variables:
//!   PORT               : u16 (default 3000)
//!   HILO_CONFIG_PATH   : path to TOML config (game sizing, judge prompts, question bank)
//!   HILO_ANSWER_COUNT  : overrides [game].answer_count
//!   LOG_LEVEL          : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT         : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod config;
mod seeds;
mod state;
mod answer;
mod judgment;
mod scoring;
mod submit;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let state = Arc::new(AppState::new());
  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "hilo_judge", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "hilo_judge", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  info!(target: "hilo_judge", "Shutdown signal received");
}

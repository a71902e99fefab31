//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::logic::*;
use crate::protocol::{ClientWsMessage, ScoreTotalOut, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "hilo_judge", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "hilo_judge", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let out = reply_to_text(&txt, &state);
        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "hilo_judge", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "hilo_judge", "WebSocket disconnected");
}

/// Parse, dispatch, serialize response.
fn reply_to_text(txt: &str, state: &AppState) -> String {
  let reply_msg = match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      debug!(target: "hilo_judge", "WS received: {:?}", &incoming);
      handle_client_ws(incoming, state)
    }
    Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
  };

  serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  })
}

fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  let result = match msg {
    ClientWsMessage::Ping => Ok(ServerWsMessage::Pong),

    ClientWsMessage::MatchAnswer(req) => lookup_seed(state, &req).map(ServerWsMessage::Match),

    ClientWsMessage::ParseJudgment(req) => Ok(ServerWsMessage::Judgment { judgment: parse_judgment(&req.raw) }),

    ClientWsMessage::SubmitGuess(g) => resolve_guess(state, &g).map(|out| {
      info!(target: "judge", game_id = %g.game_id, round = g.round, source = ?out.source, score = out.result.score, "WS guess resolved");
      ServerWsMessage::GuessResult(out)
    }),

    ClientWsMessage::ScoreRound(req) => score_round(state, &req).map(ServerWsMessage::RoundScore),

    ClientWsMessage::ScoreTotal(req) => {
      score_total(&req.rounds).map(|total| ServerWsMessage::TotalScore(ScoreTotalOut { total }))
    }
  };

  result.unwrap_or_else(|e| ServerWsMessage::Error { message: e.to_string() })
}

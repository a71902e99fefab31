//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument, warn};

use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

impl IntoResponse for LogicError {
  fn into_response(self) -> Response {
    let status = match self {
      LogicError::UnknownQuestion(_) => StatusCode::NOT_FOUND,
      LogicError::MissingSeeds | LogicError::Score(_) => StatusCode::BAD_REQUEST,
    };
    warn!(target: "hilo_judge", %status, error = %self, "Request rejected");
    (status, Json(ErrorOut { error: self.to_string() })).into_response()
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_question(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<QuestionOut>, LogicError> {
  let q = state.get_question(&id).ok_or_else(|| LogicError::UnknownQuestion(id.clone()))?;
  Ok(Json(to_out(q, &state.game)))
}

#[instrument(level = "info", skip(state, body), fields(question_id = ?body.question_id, answer_len = body.answer.len()))]
pub async fn http_post_match(
  State(state): State<Arc<AppState>>,
  Json(body): Json<MatchIn>,
) -> Result<Json<MatchOut>, LogicError> {
  Ok(Json(lookup_seed(&state, &body)?))
}

#[instrument(level = "info", skip(state, body), fields(%body.question_id, answer_len = body.answer.len()))]
pub async fn http_post_judge_prompt(
  State(state): State<Arc<AppState>>,
  Json(body): Json<JudgePromptIn>,
) -> Result<Json<JudgePromptOut>, LogicError> {
  Ok(Json(judge_prompt(&state, &body.question_id, &body.answer)?))
}

#[instrument(level = "info", skip(body), fields(raw_len = body.raw.len()))]
pub async fn http_post_judge_parse(Json(body): Json<JudgeParseIn>) -> impl IntoResponse {
  Json(parse_judgment(&body.raw))
}

#[instrument(level = "info", skip(state, body), fields(%body.game_id, round = body.round, answer_len = body.answer.len()))]
pub async fn http_post_guess(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GuessIn>,
) -> Result<Json<GuessOut>, LogicError> {
  let out = resolve_guess(&state, &body)?;
  info!(target: "judge", game_id = %body.game_id, round = body.round, source = ?out.source, score = out.result.score, "HTTP guess resolved");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_score_round(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ScoreRoundIn>,
) -> Result<Json<ScoreRoundOut>, LogicError> {
  Ok(Json(score_round(&state, &body)?))
}

#[instrument(level = "info", skip(body), fields(rounds = body.rounds.len()))]
pub async fn http_post_score_total(Json(body): Json<ScoreTotalIn>) -> Result<Json<ScoreTotalOut>, LogicError> {
  Ok(Json(ScoreTotalOut { total: score_total(&body.rounds)? }))
}

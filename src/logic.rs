//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Exact-match lookup against a question's seed list (or inline seeds)
//!   - Building the judge prompt for the surrounding flow to send
//!   - Resolving a guess: exact match, then the judge reply if one was supplied
//!   - Round and game scoring
//!
//! Nothing here calls the AI judge or persists anything; the caller owns both.

use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::answer::find_exact_match;
use crate::domain::{AiJudgment, RoundResult, SeedAnswer};
use crate::judgment::parse_ai_judgment;
use crate::protocol::{
  GuessIn, GuessOut, GuessSource, JudgePromptOut, MatchIn, MatchOut, ScoreRoundIn, ScoreRoundOut,
};
use crate::scoring::{
  calculate_round_score, calculate_total_score, checked_answer_count, checked_rank, round_rule, ScoreError,
};
use crate::state::AppState;
use crate::submit::build_submit_params;
use crate::util::{fill_template, trunc_for_log};

#[derive(Debug, Error)]
pub enum LogicError {
  #[error("unknown questionId: {0}")]
  UnknownQuestion(String),

  #[error("either questionId or seeds must be provided")]
  MissingSeeds,

  #[error(transparent)]
  Score(#[from] ScoreError),
}

/// Inline seeds win over a bank lookup.
fn seeds_for<'a>(
  state: &'a AppState,
  question_id: Option<&str>,
  inline: Option<&'a [SeedAnswer]>,
) -> Result<&'a [SeedAnswer], LogicError> {
  if let Some(seeds) = inline {
    return Ok(seeds);
  }
  let id = question_id.ok_or(LogicError::MissingSeeds)?;
  state
    .get_question(id)
    .map(|q| q.answers.as_slice())
    .ok_or_else(|| LogicError::UnknownQuestion(id.to_string()))
}

#[instrument(level = "info", skip(state, req), fields(question_id = ?req.question_id, answer_len = req.answer.len()))]
pub fn lookup_seed(state: &AppState, req: &MatchIn) -> Result<MatchOut, LogicError> {
  let seeds = seeds_for(state, req.question_id.as_deref(), req.seeds.as_deref())?;
  let seed = find_exact_match(&req.answer, seeds).cloned();
  debug!(target: "judge", matched = seed.is_some(), seeds = seeds.len(), "Exact-match lookup");
  Ok(MatchOut { matched: seed.is_some(), seed })
}

/// System/user prompt pair for the AI judge, seed list rendered as `rank. answer` lines.
#[instrument(level = "info", skip(state, answer), fields(%question_id, answer_len = answer.len()))]
pub fn judge_prompt(state: &AppState, question_id: &str, answer: &str) -> Result<JudgePromptOut, LogicError> {
  let q = state
    .get_question(question_id)
    .ok_or_else(|| LogicError::UnknownQuestion(question_id.to_string()))?;

  let mut ranked: Vec<&SeedAnswer> = q.answers.iter().collect();
  ranked.sort_by_key(|s| s.rank);
  let lines = ranked
    .iter()
    .map(|s| format!("{}. {}", s.rank, s.answer))
    .collect::<Vec<_>>()
    .join("\n");

  let user = fill_template(
    &state.prompts.judge_user_template,
    &[("prompt", &q.prompt), ("answers", &lines), ("answer", answer)],
  );
  Ok(JudgePromptOut { system: state.prompts.judge_system.clone(), user })
}

#[instrument(level = "info", skip(raw), fields(raw_len = raw.len()))]
pub fn parse_judgment(raw: &str) -> AiJudgment {
  let judgment = parse_ai_judgment(raw);
  debug!(target: "judge", raw = %trunc_for_log(raw, 200), valid = judgment.valid, rank = ?judgment.rank, reason = ?judgment.reason, "Judge reply parsed");
  judgment
}

/// Resolve one guess through the exact-match fast path and, failing that, the
/// judge reply the caller already obtained. The submit payload always carries
/// the literal answer.
#[instrument(
  level = "info",
  skip(state, g),
  fields(game_id = %g.game_id, round = g.round, answer_len = g.answer.len(), has_judge_reply = g.judge_reply.is_some())
)]
pub fn resolve_guess(state: &AppState, g: &GuessIn) -> Result<GuessOut, LogicError> {
  round_rule(i64::from(g.round))?;
  let seeds = seeds_for(state, g.question_id.as_deref(), g.seeds.as_deref())?;
  let answer_count = checked_answer_count(g.answer_count.unwrap_or(state.game.answer_count))?;
  let submit = build_submit_params(&g.game_id, g.round, &g.answer);

  if let Some(hit) = find_exact_match(&g.answer, seeds) {
    let result = RoundResult::scored(g.round, Some(hit.rank), answer_count)?;
    info!(target: "judge", rank = hit.rank, score = result.score, "Exact match");
    return Ok(GuessOut {
      source: GuessSource::ExactMatch,
      matched_to: Some(hit.answer.clone()),
      result,
      judgment: None,
      submit,
    });
  }

  let Some(reply) = g.judge_reply.as_deref() else {
    let result = RoundResult::scored(g.round, None, answer_count)?;
    info!(target: "judge", score = result.score, "No exact match; judge reply required");
    return Ok(GuessOut { source: GuessSource::NeedsJudge, matched_to: None, result, judgment: None, submit });
  };

  let judgment = parse_judgment(reply);
  let rank = judgment.clamped_rank(state.game.rank_ceiling);
  let result = RoundResult::scored(g.round, rank, answer_count)?;
  let source = if rank.is_some() { GuessSource::AiJudge } else { GuessSource::Miss };
  info!(target: "judge", ?source, rank = ?rank, score = result.score, "Judge verdict applied");

  Ok(GuessOut {
    source,
    matched_to: judgment.matched_to.clone().filter(|_| rank.is_some()),
    result,
    judgment: Some(judgment),
    submit,
  })
}

#[instrument(level = "info", skip(state))]
pub fn score_round(state: &AppState, req: &ScoreRoundIn) -> Result<ScoreRoundOut, LogicError> {
  let rule = round_rule(req.round)?;
  let rank = req.rank.map(checked_rank).transpose()?;
  let answer_count = checked_answer_count(req.answer_count.unwrap_or(state.game.answer_count))?;
  let score = calculate_round_score(req.round, rank, answer_count)?;
  Ok(ScoreRoundOut { score, direction: rule.direction, multiplier: rule.multiplier })
}

#[instrument(level = "info", skip(rounds), fields(rounds = rounds.len()))]
pub fn score_total(rounds: &[RoundResult]) -> Result<i64, LogicError> {
  let total = calculate_total_score(rounds)?;
  debug!(target: "judge", total, "Game total");
  Ok(total)
}

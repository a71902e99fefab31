//! Rank clamping and round/game scoring.
//!
//! Rounds 1-2 are HIGH rounds (popular answers win), rounds 3-4 are LOW rounds
//! (obscure answers win). Each round carries a multiplier equal to its number.
//! HIGH scores are floored at zero; LOW scores are never capped, so an answer
//! ranked past `answer_count` still pays out in a LOW round.

use thiserror::Error;

use crate::domain::{Direction, RoundResult};

pub const DEFAULT_RANK_CEILING: i64 = 500;
pub const DEFAULT_ANSWER_COUNT: i64 = 400;

#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
  #[error("invalid round {0}: expected 1-4")]
  InvalidRound(i64),

  #[error("invalid rank {0}: expected a positive integer")]
  InvalidRank(i64),

  #[error("invalid rank {0}: ranks must be whole numbers")]
  NonIntegerRank(f64),

  #[error("invalid rank {0}: out of range")]
  RankOutOfRange(f64),

  #[error("invalid answer count {0}: expected a positive integer")]
  InvalidAnswerCount(i64),

  #[error("score overflow")]
  Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRule {
  pub round: u8,
  pub direction: Direction,
  pub multiplier: i64,
}

pub const ROUND_RULES: [RoundRule; 4] = [
  RoundRule { round: 1, direction: Direction::High, multiplier: 1 },
  RoundRule { round: 2, direction: Direction::High, multiplier: 2 },
  RoundRule { round: 3, direction: Direction::Low, multiplier: 3 },
  RoundRule { round: 4, direction: Direction::Low, multiplier: 4 },
];

/// Direction and multiplier for a round number.
pub fn round_rule(round: i64) -> Result<RoundRule, ScoreError> {
  ROUND_RULES
    .iter()
    .find(|r| i64::from(r.round) == round)
    .copied()
    .ok_or(ScoreError::InvalidRound(round))
}

/// Round half away from zero, then clamp into `[1, max]`.
pub fn clamp_rank(raw: f64, max: i64) -> i64 {
  // `as` saturates; NaN maps to 0 and ends up at the floor.
  let rounded = raw.round() as i64;
  rounded.clamp(1, max.max(1))
}

/// Convert a wire-level rank into an integer, rejecting fractions and values
/// that do not fit in an `i64`.
pub fn checked_rank(raw: f64) -> Result<i64, ScoreError> {
  if !raw.is_finite() || raw.fract() != 0.0 {
    return Err(ScoreError::NonIntegerRank(raw));
  }
  // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
  if raw < i64::MIN as f64 || raw >= i64::MAX as f64 {
    return Err(ScoreError::RankOutOfRange(raw));
  }
  Ok(raw as i64)
}

/// Seed list size used for HIGH scoring; must be at least 1.
pub fn checked_answer_count(answer_count: i64) -> Result<i64, ScoreError> {
  if answer_count < 1 {
    return Err(ScoreError::InvalidAnswerCount(answer_count));
  }
  Ok(answer_count)
}

/// Points for one round. `None` rank is a miss and scores zero.
pub fn calculate_round_score(round: i64, rank: Option<i64>, answer_count: i64) -> Result<i64, ScoreError> {
  let rule = round_rule(round)?;
  let Some(rank) = rank else { return Ok(0) };
  if rank < 1 {
    return Err(ScoreError::InvalidRank(rank));
  }

  let score = match rule.direction {
    Direction::High => {
      let base = answer_count
        .checked_sub(rank)
        .and_then(|d| d.checked_add(1))
        .ok_or(ScoreError::Overflow)?;
      if base <= 0 { 0 } else { base.checked_mul(rule.multiplier).ok_or(ScoreError::Overflow)? }
    }
    Direction::Low => rank.checked_mul(rule.multiplier).ok_or(ScoreError::Overflow)?,
  };
  Ok(score)
}

/// Sum of `score` across the given rounds. Duplicates are summed as given.
pub fn calculate_total_score(rounds: &[RoundResult]) -> Result<i64, ScoreError> {
  rounds
    .iter()
    .try_fold(0i64, |acc, r| acc.checked_add(r.score))
    .ok_or(ScoreError::Overflow)
}

impl RoundResult {
  /// Score a round and package the result.
  pub fn scored(round: u8, rank: Option<i64>, answer_count: i64) -> Result<Self, ScoreError> {
    let score = calculate_round_score(i64::from(round), rank, answer_count)?;
    Ok(Self { round, rank, on_list: rank.is_some(), score })
  }
}

//! Domain models: seed answers, questions, judge verdicts, round results and the
//! persistence payload for a submitted guess.

use serde::{Deserialize, Serialize};

/// One pre-ranked survey response. Rank 1 is the most popular answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedAnswer {
  pub answer: String,
  pub rank: i64,
}

/// A survey prompt together with its ranked answers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
  pub id: String,
  pub prompt: String,
  pub answers: Vec<SeedAnswer>,
}

/// Which end of the ranking a round rewards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
  /// Most popular wins.
  High,
  /// Least popular wins.
  Low,
}

/// Flattened verdict of the AI judge after defensive coercion.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AiJudgment {
  pub valid: bool,
  pub rank: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub matched_to: Option<String>,
  pub reason: Option<String>,
}

/// Score of one completed round. `on_list` is true iff a rank was resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
  pub round: u8,
  pub rank: Option<i64>,
  pub on_list: bool,
  pub score: i64,
}

/// Payload for the remote procedure that records a guess.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmitParams {
  pub p_game_id: String,
  pub p_round_number: u8,
  pub p_answer: String,
}

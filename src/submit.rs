//! Persistence payload for a guess.

use crate::domain::SubmitParams;

/// The recorded answer is always exactly what the player typed, hit or miss.
pub fn build_submit_params(game_id: &str, round_number: u8, answer: &str) -> SubmitParams {
  SubmitParams {
    p_game_id: game_id.to_owned(),
    p_round_number: round_number,
    p_answer: answer.to_owned(),
  }
}

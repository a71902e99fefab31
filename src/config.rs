//! Loading service configuration (game sizing, judge prompts, question bank) from TOML.
//!
//! See `HiloConfig` and `Prompts` for expected schema.

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::SeedAnswer;
use crate::scoring::{DEFAULT_ANSWER_COUNT, DEFAULT_RANK_CEILING};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct HiloConfig {
  #[serde(default)]
  pub game: GameConfig,
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub questions: Vec<QuestionCfg>,
}

/// Game sizing. `answer_count` is the seed list size scored against when a
/// request does not say otherwise; `rank_ceiling` bounds judge-assigned ranks.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GameConfig {
  pub answer_count: i64,
  pub rank_ceiling: i64,
}

impl Default for GameConfig {
  fn default() -> Self {
    Self { answer_count: DEFAULT_ANSWER_COUNT, rank_ceiling: DEFAULT_RANK_CEILING }
  }
}

/// Question entry accepted in TOML configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct QuestionCfg {
  pub id: String,
  pub prompt: String,
  #[serde(default)]
  pub answers: Vec<SeedAnswer>,
}

/// Prompts handed to the surrounding flow for the AI judge call.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub judge_system: String,
  pub judge_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      judge_system: "You judge answers for a survey guessing game. Reply ONLY with one compact JSON object.".into(),
      judge_user_template: "Survey question: {prompt}\nRanked answers (rank. answer):\n{answers}\n\nPlayer answer: {answer}\n\nDecide whether the player answer means the same thing as one of the ranked answers (synonym, plural, spelling variant). Reject profanity and off-topic text.\nReturn JSON {\"valid\": boolean, \"rank\": number|null, \"matched_to\": string, \"reason\": string}.".into(),
    }
  }
}

/// Attempt to load `HiloConfig` from HILO_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_config_from_env() -> Option<HiloConfig> {
  let path = std::env::var("HILO_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "hilo_judge", %path, questions = cfg.questions.len(), "Loaded config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "hilo_judge", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "hilo_judge", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

pub fn parse_config(s: &str) -> Result<HiloConfig, toml::de::Error> {
  toml::from_str::<HiloConfig>(s)
}

/// HILO_ANSWER_COUNT overrides the configured answer count when it is a positive integer.
pub fn apply_env_overrides(game: &mut GameConfig) {
  let Ok(raw) = std::env::var("HILO_ANSWER_COUNT") else { return };
  match raw.parse::<i64>() {
    Ok(n) if n > 0 => game.answer_count = n,
    _ => warn!(target: "hilo_judge", value = %raw, "Ignoring invalid HILO_ANSWER_COUNT"),
  }
}

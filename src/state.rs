//! Application state: the read-only question bank, game sizing and judge prompts.
//!
//! Everything here is built once at startup and never mutated, so handlers
//! share it behind a plain `Arc` without locks.

use std::collections::{HashMap, HashSet};

use tracing::{error, info, instrument, warn};

use crate::answer::normalize_answer;
use crate::config::{apply_env_overrides, load_config_from_env, GameConfig, HiloConfig, Prompts, QuestionCfg};
use crate::domain::{Question, SeedAnswer};
use crate::seeds::seed_questions;

#[derive(Clone, Debug)]
pub struct AppState {
  pub questions: HashMap<String, Question>,
  pub game: GameConfig,
  pub prompts: Prompts,
}

impl AppState {
  /// Build state from env: load config, apply overrides, index the question bank.
  #[instrument(level = "info", skip_all)]
  pub fn new() -> Self {
    let mut state = Self::from_config(load_config_from_env().unwrap_or_default());
    apply_env_overrides(&mut state.game);
    info!(target: "hilo_judge", answer_count = state.game.answer_count, rank_ceiling = state.game.rank_ceiling, "Game sizing");
    state
  }

  pub fn from_config(cfg: HiloConfig) -> Self {
    let mut questions = HashMap::<String, Question>::new();

    for qc in &cfg.questions {
      let q = sanitize_question(qc);
      if q.answers.is_empty() {
        error!(target: "hilo_judge", id = %q.id, "Skipping bank question: no usable answers.");
        continue;
      }
      questions.insert(q.id.clone(), q);
    }

    // Built-in questions never overwrite configured ids.
    for q in seed_questions() {
      questions.entry(q.id.clone()).or_insert(q);
    }

    for q in questions.values() {
      info!(target: "hilo_judge", id = %q.id, answers = q.answers.len(), "Question loaded");
    }

    Self { questions, game: cfg.game, prompts: cfg.prompts }
  }

  /// Read-only access to a question by id.
  pub fn get_question(&self, id: &str) -> Option<&Question> {
    self.questions.get(id)
  }
}

/// Drop blank or unranked entries and report duplicates by normalized text.
/// Duplicates are kept; exact matching resolves to the first one.
fn sanitize_question(qc: &QuestionCfg) -> Question {
  let mut seen = HashSet::<String>::new();
  let mut answers = Vec::<SeedAnswer>::with_capacity(qc.answers.len());

  for a in &qc.answers {
    let key = normalize_answer(&a.answer);
    if key.is_empty() || a.rank < 1 {
      error!(target: "hilo_judge", id = %qc.id, answer = %a.answer, rank = a.rank, "Skipping seed answer: blank text or rank < 1.");
      continue;
    }
    if !seen.insert(key) {
      warn!(target: "hilo_judge", id = %qc.id, answer = %a.answer, rank = a.rank, "Duplicate seed answer; first entry wins.");
    }
    answers.push(a.clone());
  }

  Question { id: qc.id.clone(), prompt: qc.prompt.clone(), answers }
}

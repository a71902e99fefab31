//! Answer normalization and the exact-match fast path against a seed list.
//!
//! Exact matching is case- and whitespace-insensitive but otherwise literal.
//! Anything fuzzier (synonyms, typos, plurals) is left to the AI judge.

use crate::domain::SeedAnswer;

/// Canonical form used for every answer comparison:
/// trimmed, lower-cased, internal whitespace runs collapsed to one space.
pub fn normalize_answer(text: &str) -> String {
  text
    .split_whitespace()
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}

/// First seed entry whose normalized text equals the normalized `answer`.
pub fn find_exact_match<'a>(answer: &str, seeds: &'a [SeedAnswer]) -> Option<&'a SeedAnswer> {
  let needle = normalize_answer(answer);
  seeds.iter().find(|s| normalize_answer(&s.answer) == needle)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn seed(answer: &str, rank: i64) -> SeedAnswer {
    SeedAnswer { answer: answer.into(), rank }
  }

  fn seed_list() -> Vec<SeedAnswer> {
    vec![seed("saves", 1), seed("Helps", 2), seed("Olive Oil", 3), seed("rescues", 4)]
  }

  #[test]
  fn normalize_trims_lowercases_and_collapses() {
    assert_eq!(normalize_answer("  Think  "), "think");
    assert_eq!(normalize_answer("olive   oil"), "olive oil");
    assert_eq!(normalize_answer(" OLIVE \t\n OIL "), "olive oil");
    assert_eq!(normalize_answer(""), "");
    assert_eq!(normalize_answer("   "), "");
  }

  #[test]
  fn normalize_is_idempotent() {
    for s in ["  Think  ", "olive   oil", "MiXeD Case\tText", "", "ÉCOLE  Ü"] {
      let once = normalize_answer(s);
      assert_eq!(normalize_answer(&once), once, "input={s:?}");
    }
  }

  #[test]
  fn normalize_does_not_fold_diacritics() {
    assert_eq!(normalize_answer("Café"), "café");
    assert_ne!(normalize_answer("café"), normalize_answer("cafe"));
  }

  #[test]
  fn exact_match_returns_seed_entry() {
    let seeds = seed_list();
    assert_eq!(find_exact_match("saves", &seeds), Some(&seed("saves", 1)));
  }

  #[test]
  fn exact_match_is_case_insensitive_both_ways() {
    let seeds = seed_list();
    assert_eq!(find_exact_match("SAVES", &seeds).map(|s| s.rank), Some(1));
    assert_eq!(find_exact_match("helps", &seeds).map(|s| s.rank), Some(2));
    assert_eq!(find_exact_match("  olive    OIL ", &seeds).map(|s| s.rank), Some(3));
  }

  #[test]
  fn exact_match_misses_absent_and_near_answers() {
    let seeds = seed_list();
    assert!(find_exact_match("think", &seeds).is_none());
    assert!(find_exact_match("save", &seeds).is_none());
    assert!(find_exact_match("", &seeds).is_none());
    assert!(find_exact_match("saves", &[]).is_none());
  }

  #[test]
  fn exact_match_prefers_first_duplicate() {
    let seeds = vec![seed("Saves", 7), seed("saves", 1)];
    assert_eq!(find_exact_match("saves", &seeds).map(|s| s.rank), Some(7));
  }
}

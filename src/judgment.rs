//! Parsing of the AI judge's reply.
//!
//! The judge is asked for a JSON object `{valid, rank, matched_to?, reason}` but
//! nothing about its output is trusted: it may be fenced, prose, or carry the
//! wrong field types. Parsing is total and never fails; anything that is not a
//! JSON object becomes the fixed "parse error" miss.
//!
//! Field coercion:
//!
//! | field        | accepted as                         | otherwise        |
//! |--------------|-------------------------------------|------------------|
//! | `valid`      | truthiness (`1`, `true`, `"yes"`)   | `false`          |
//! | `rank`       | any JSON number                     | `None`           |
//! | `matched_to` | string                              | omitted          |
//! | `reason`     | string                              | `None`           |

use serde_json::{Map, Value};

use crate::domain::AiJudgment;
use crate::scoring::clamp_rank;

pub const PARSE_ERROR_REASON: &str = "parse error";

/// Coerced fields shared by both parsed outcomes.
#[derive(Debug, Clone, PartialEq)]
struct Fields {
  rank: Option<f64>,
  matched_to: Option<String>,
  reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
enum Verdict {
  Valid(Fields),
  Invalid(Fields),
  Unparseable,
}

impl From<Verdict> for AiJudgment {
  fn from(v: Verdict) -> Self {
    match v {
      Verdict::Valid(f) => AiJudgment { valid: true, rank: f.rank, matched_to: f.matched_to, reason: f.reason },
      Verdict::Invalid(f) => AiJudgment { valid: false, rank: f.rank, matched_to: f.matched_to, reason: f.reason },
      Verdict::Unparseable => AiJudgment {
        valid: false,
        rank: None,
        matched_to: None,
        reason: Some(PARSE_ERROR_REASON.into()),
      },
    }
  }
}

impl AiJudgment {
  /// Rank usable for scoring: present only for a valid verdict, clamped into `[1, ceiling]`.
  pub fn clamped_rank(&self, ceiling: i64) -> Option<i64> {
    if !self.valid {
      return None;
    }
    self.rank.map(|r| clamp_rank(r, ceiling))
  }
}

/// Parse a raw judge reply into a flattened, defensively-coerced judgment.
pub fn parse_ai_judgment(raw: &str) -> AiJudgment {
  classify(raw).into()
}

fn classify(raw: &str) -> Verdict {
  let body = strip_fence(raw);
  let obj = match serde_json::from_str::<Value>(body) {
    Ok(Value::Object(obj)) => obj,
    _ => return Verdict::Unparseable,
  };

  let fields = Fields {
    rank: coerce_rank(obj.get("rank")),
    matched_to: string_field(&obj, "matched_to"),
    reason: string_field(&obj, "reason"),
  };
  if truthy(obj.get("valid")) { Verdict::Valid(fields) } else { Verdict::Invalid(fields) }
}

/// Remove an enclosing ``` fence and its optional language label.
fn strip_fence(raw: &str) -> &str {
  let text = raw.trim();
  let Some(rest) = text.strip_prefix("```") else { return text };

  let body = match rest.split_once('\n') {
    Some((label, body)) if label.trim().chars().all(|c| c.is_ascii_alphanumeric()) => body,
    _ => rest,
  };
  let body = body.trim_end();
  body.strip_suffix("```").unwrap_or(body).trim()
}

fn truthy(v: Option<&Value>) -> bool {
  match v {
    None | Some(Value::Null) => false,
    Some(Value::Bool(b)) => *b,
    Some(Value::Number(n)) => n.as_f64().map_or(false, |x| x != 0.0 && !x.is_nan()),
    Some(Value::String(s)) => !s.is_empty(),
    Some(Value::Array(_)) | Some(Value::Object(_)) => true,
  }
}

fn coerce_rank(v: Option<&Value>) -> Option<f64> {
  match v {
    Some(Value::Number(n)) => n.as_f64().filter(|x| x.is_finite()),
    _ => None,
  }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
  obj.get(key).and_then(Value::as_str).map(str::to_owned)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse_error() -> AiJudgment {
    AiJudgment { valid: false, rank: None, matched_to: None, reason: Some("parse error".into()) }
  }

  #[test]
  fn parses_well_formed_valid_reply() {
    let j = parse_ai_judgment(r#"{"valid": true, "rank": 42, "matched_to": "helps", "reason": "synonym of helps"}"#);
    assert_eq!(
      j,
      AiJudgment {
        valid: true,
        rank: Some(42.0),
        matched_to: Some("helps".into()),
        reason: Some("synonym of helps".into()),
      }
    );
  }

  #[test]
  fn parses_rejection_with_null_rank() {
    let j = parse_ai_judgment(r#"{"valid": false, "rank": null, "reason": "profanity"}"#);
    assert!(!j.valid);
    assert_eq!(j.rank, None);
    assert_eq!(j.matched_to, None);
    assert_eq!(j.reason.as_deref(), Some("profanity"));
  }

  #[test]
  fn strips_json_fence() {
    let j = parse_ai_judgment("```json\n{\"valid\": true, \"rank\": 5, \"reason\": \"exact match\"}\n```");
    assert!(j.valid);
    assert_eq!(j.rank, Some(5.0));
    assert_eq!(j.reason.as_deref(), Some("exact match"));
  }

  #[test]
  fn strips_bare_and_inline_fences() {
    let j = parse_ai_judgment("```\n{\"valid\": true, \"rank\": 7, \"reason\": \"ok\"}\n```");
    assert_eq!(j.rank, Some(7.0));
    let j = parse_ai_judgment("  ```{\"valid\": 1, \"rank\": 8, \"reason\": \"ok\"}```  ");
    assert!(j.valid);
    assert_eq!(j.rank, Some(8.0));
  }

  #[test]
  fn prose_and_empty_input_fall_back_to_parse_error() {
    assert_eq!(parse_ai_judgment("I think this answer is valid!"), parse_error());
    assert_eq!(parse_ai_judgment(""), parse_error());
    assert_eq!(parse_ai_judgment("```json\n```"), parse_error());
    assert_eq!(parse_ai_judgment(r#"{"valid": true, "rank": 3"#), parse_error());
  }

  #[test]
  fn non_object_roots_fall_back_to_parse_error() {
    assert_eq!(parse_ai_judgment("[1, 2, 3]"), parse_error());
    assert_eq!(parse_ai_judgment("42"), parse_error());
    assert_eq!(parse_ai_judgment("\"valid\""), parse_error());
    assert_eq!(parse_ai_judgment("null"), parse_error());
  }

  #[test]
  fn non_numeric_rank_becomes_none() {
    let j = parse_ai_judgment(r#"{"valid": true, "rank": "five", "reason": "bad rank type"}"#);
    assert!(j.valid);
    assert_eq!(j.rank, None);
    let j = parse_ai_judgment(r#"{"valid": true, "rank": "5", "reason": "quoted"}"#);
    assert_eq!(j.rank, None);
    let j = parse_ai_judgment(r#"{"valid": true, "rank": [5], "reason": "array"}"#);
    assert_eq!(j.rank, None);
  }

  #[test]
  fn fractional_rank_passes_through_untouched() {
    let j = parse_ai_judgment(r#"{"valid": true, "rank": 42.7, "reason": "close"}"#);
    assert_eq!(j.rank, Some(42.7));
  }

  #[test]
  fn valid_is_coerced_by_truthiness() {
    assert!(parse_ai_judgment(r#"{"valid": 1, "rank": 3, "reason": "x"}"#).valid);
    assert!(!parse_ai_judgment(r#"{"valid": 0, "rank": 3, "reason": "x"}"#).valid);
    assert!(!parse_ai_judgment(r#"{"valid": null, "rank": 3, "reason": "x"}"#).valid);
    assert!(!parse_ai_judgment(r#"{"rank": 3, "reason": "x"}"#).valid);
    assert!(!parse_ai_judgment(r#"{"valid": "", "rank": 3}"#).valid);
    assert!(parse_ai_judgment(r#"{"valid": -2.5, "rank": 3}"#).valid);
  }

  #[test]
  fn matched_to_is_dropped_unless_string() {
    let j = parse_ai_judgment(r#"{"valid": true, "rank": 1, "matched_to": 12, "reason": "x"}"#);
    assert_eq!(j.matched_to, None);
    let j = parse_ai_judgment(r#"{"valid": true, "rank": 1, "reason": "x"}"#);
    assert_eq!(j.matched_to, None);
  }

  #[test]
  fn missing_reason_gets_no_default() {
    let j = parse_ai_judgment(r#"{"valid": true, "rank": 9}"#);
    assert!(j.valid);
    assert_eq!(j.rank, Some(9.0));
    assert_eq!(j.reason, None);
  }

  #[test]
  fn clamped_rank_requires_valid_verdict() {
    let j = parse_ai_judgment(r#"{"valid": true, "rank": 999.4, "reason": "obscure"}"#);
    assert_eq!(j.clamped_rank(500), Some(500));
    let j = parse_ai_judgment(r#"{"valid": true, "rank": 0, "reason": "odd"}"#);
    assert_eq!(j.clamped_rank(500), Some(1));
    let j = parse_ai_judgment(r#"{"valid": false, "rank": 12, "reason": "off topic"}"#);
    assert_eq!(j.clamped_rank(500), None);
    let j = parse_ai_judgment(r#"{"valid": true, "rank": null, "reason": "unranked"}"#);
    assert_eq!(j.clamped_rank(500), None);
  }
}

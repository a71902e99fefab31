//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values in a
/// single pass, so inserted values are never rescanned for placeholders.
/// Unknown `{...}` spans are copied through unchanged.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = String::with_capacity(tpl.len());
  let mut rest = tpl;
  while let Some(open) = rest.find('{') {
    out.push_str(&rest[..open]);
    let tail = &rest[open + 1..];
    let value = tail
      .find('}')
      .and_then(|close| pairs.iter().find(|(k, _)| *k == &tail[..close]).map(|(_, v)| (close, *v)));
    match value {
      Some((close, v)) => {
        out.push_str(v);
        rest = &tail[close + 1..];
      }
      None => {
        out.push('{');
        rest = tail;
      }
    }
  }
  out.push_str(rest);
  out
}

/// Log-safe truncation for judge replies and other large strings.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut cut = max;
  while !s.is_char_boundary(cut) { cut -= 1; }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fill_template_replaces_every_key() {
    let out = fill_template("Q: {prompt}\nA: {answer} ({answer})", &[("prompt", "Name a fruit"), ("answer", "kiwi")]);
    assert_eq!(out, "Q: Name a fruit\nA: kiwi (kiwi)");
  }

  #[test]
  fn fill_template_does_not_rescan_inserted_values() {
    let out = fill_template(
      "Q: {prompt}\nList:\n{answers}\nA: {answer}",
      &[("prompt", "Say {answer}"), ("answers", "1. {prompt}"), ("answer", "{answers}")],
    );
    assert_eq!(out, "Q: Say {answer}\nList:\n1. {prompt}\nA: {answers}");
  }

  #[test]
  fn fill_template_keeps_unknown_and_unbalanced_braces() {
    assert_eq!(fill_template("{\"valid\": {x}} {", &[("x", "1")]), "{\"valid\": 1} {");
    assert_eq!(fill_template("{nope} {x", &[("x", "1")]), "{nope} {x");
  }

  #[test]
  fn trunc_respects_char_boundaries() {
    assert_eq!(trunc_for_log("short", 10), "short");
    let out = trunc_for_log("héllo world", 2);
    assert!(out.starts_with('h'));
    assert!(out.ends_with("(12 bytes total)"));
  }
}

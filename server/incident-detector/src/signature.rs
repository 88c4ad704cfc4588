//! Signature matching against log messages.
//!
//! A signature is a plain substring; case folding depends on its mode.

use crate::types::{LogEvent, MatchMode, Signature};

/// Message contains the signature pattern?
pub fn matches(signature: &Signature, message: &str) -> bool {
  if signature.pattern.is_empty() {
    return false;
  }
  match signature.mode {
    MatchMode::CaseSensitive => message.contains(&signature.pattern),
    MatchMode::CaseInsensitive => message
      .to_lowercase()
      .contains(&signature.pattern.to_lowercase()),
  }
}

/// Number of events whose message carries the signature.
pub fn count_matches(signature: &Signature, events: &[LogEvent]) -> usize {
  events
    .iter()
    .filter(|e| matches(signature, &e.message))
    .count()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn events(msgs: &[&str]) -> Vec<LogEvent> {
    msgs.iter().map(|m| LogEvent::new(*m, 0)).collect()
  }

  #[test]
  fn case_sensitive_rejects_capitalised_variant() {
    let sig = Signature::case_sensitive("could not connect");
    assert!(matches(&sig, "ERROR db.py:45 ... could not connect to server"));
    assert!(!matches(&sig, "Could not connect to server"));
  }

  #[test]
  fn case_insensitive_accepts_mixed_case() {
    let sig = Signature::case_insensitive("health check");
    assert!(matches(&sig, "Health Check failed"));
    assert!(matches(&sig, "INFO Task stopped due to failed ELB health check"));
    assert!(!matches(&sig, "healthcheck passed"));
  }

  #[test]
  fn empty_pattern_never_matches() {
    let sig = Signature::case_sensitive("");
    assert!(!matches(&sig, "anything"));
  }

  #[test]
  fn count_over_events() {
    let sig = Signature::case_sensitive("Maximum connections");
    let evs = events(&[
      "WARN: Maximum connections exceeded for database mydb",
      "LOG: checkpoint complete",
      "FATAL: Maximum connections reached",
    ]);
    assert_eq!(count_matches(&sig, &evs), 2);
    assert_eq!(count_matches(&sig, &[]), 0);
  }
}

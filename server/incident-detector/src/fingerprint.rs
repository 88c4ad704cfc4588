//! Stable incident identifiers.

use crate::types::TimeWindow;
use crate::window;

/// Compute a stable incident id from the raised flags and the window start hour.
///
/// Runs that see the same evidence within the same hour share an id, so repeated
/// invocations can be deduplicated downstream. Flags must already be sorted.
pub fn incident_id(flags: &[String], window: &TimeWindow) -> String {
  let mut hasher = blake3::Hasher::new();
  for flag in flags {
    hasher.update(flag.as_bytes());
    hasher.update(b"|");
  }
  hasher.update(window::start_hour_bucket(window).as_bytes());
  let hex = hasher.finalize().to_hex();
  format!("inc-{}", &hex[..16])
}

#[cfg(test)]
mod tests {
  use super::*;

  fn flags(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
  }

  fn window(start_ms: i64) -> TimeWindow {
    TimeWindow {
      start_ms,
      end_ms: start_ms + 1,
    }
  }

  #[test]
  fn same_input_same_id() {
    let f = flags(&["db_capacity_error", "db_client_error", "ecs_health_error"]);
    assert_eq!(incident_id(&f, &window(0)), incident_id(&f, &window(0)));
  }

  #[test]
  fn same_hour_same_id() {
    let f = flags(&["db_client_error"]);
    assert_eq!(incident_id(&f, &window(0)), incident_id(&f, &window(59 * 60 * 1000)));
  }

  #[test]
  fn different_hour_different_id() {
    let f = flags(&["db_client_error"]);
    assert_ne!(incident_id(&f, &window(0)), incident_id(&f, &window(60 * 60 * 1000)));
  }

  #[test]
  fn id_shape() {
    let id = incident_id(&flags(&["a"]), &window(0));
    assert!(id.starts_with("inc-"));
    assert_eq!(id.len(), 20);
    assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
  }
}

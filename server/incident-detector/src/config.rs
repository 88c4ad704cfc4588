//! Detector configuration with sane defaults.

use crate::error::DetectorError;
use crate::types::{Signature, SourceKind, SourceSpec};

pub const LOOKBACK_ENV: &str = "DETECTOR_LOOKBACK_HOURS";
pub const LOOKAHEAD_ENV: &str = "DETECTOR_LOOKAHEAD_HOURS";
/// Largest accepted window offset: ten years.
pub const MAX_OFFSET_HOURS: u32 = 24 * 366 * 10;

/// Source table plus query window offsets.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
  pub sources: Vec<SourceSpec>,
  /// Hours before "now" the query window starts.
  pub lookback_hours: u32,
  /// Hours after "now" the query window ends. Absorbs producer clock skew.
  pub lookahead_hours: u32,
}

impl Default for DetectorConfig {
  fn default() -> Self {
    Self {
      sources: default_sources(),
      lookback_hours: 12,
      lookahead_hours: 6,
    }
  }
}

impl DetectorConfig {
  /// Defaults overlaid with `DETECTOR_LOOKBACK_HOURS` / `DETECTOR_LOOKAHEAD_HOURS`.
  pub fn from_env() -> Result<Self, DetectorError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Self, DetectorError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut config = Self::default();
    if let Some(v) = lookup(LOOKBACK_ENV) {
      config.lookback_hours = parse_hours(LOOKBACK_ENV, &v)?;
    }
    if let Some(v) = lookup(LOOKAHEAD_ENV) {
      config.lookahead_hours = parse_hours(LOOKAHEAD_ENV, &v)?;
    }
    Ok(config)
  }

  pub fn source(&self, kind: SourceKind) -> Option<&SourceSpec> {
    self.sources.iter().find(|s| s.kind == kind)
  }
}

fn parse_hours(field: &str, raw: &str) -> Result<u32, DetectorError> {
  let hours = raw
    .trim()
    .parse::<u32>()
    .map_err(|_| DetectorError::config(field, "expected a non-negative integer"))?;
  if hours > MAX_OFFSET_HOURS {
    return Err(DetectorError::config(
      field,
      &format!("must be at most {} hours", MAX_OFFSET_HOURS),
    ));
  }
  Ok(hours)
}

/// The fixed app / ECS / RDS table.
pub fn default_sources() -> Vec<SourceSpec> {
  vec![
    SourceSpec {
      kind: SourceKind::App,
      log_group: "/ecs/my-python-service".into(),
      log_stream: "app-container-1".into(),
      signature: Signature::case_sensitive("could not connect"),
      seed_message:
        "ERROR db.py:45 psycopg2.OperationalError: could not connect to server: Connection timed out"
          .into(),
    },
    SourceSpec {
      kind: SourceKind::Ecs,
      log_group: "/aws/ecs/containerinsights/my-cluster/performance".into(),
      log_stream: "ecs-agent".into(),
      signature: Signature::case_insensitive("health check"),
      seed_message: "INFO Task stopped due to failed ELB health check".into(),
    },
    SourceSpec {
      kind: SourceKind::Rds,
      log_group: "/aws/rds/instance/mydb/postgresql".into(),
      log_stream: "postgresql.log".into(),
      signature: Signature::case_sensitive("Maximum connections"),
      seed_message: "WARN: Maximum connections exceeded for database mydb".into(),
    },
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::MatchMode;
  use std::collections::HashMap;

  #[test]
  fn defaults_cover_every_source_once() {
    let config = DetectorConfig::default();
    assert_eq!(config.sources.len(), 3);
    for kind in SourceKind::ALL {
      assert!(config.source(kind).is_some(), "missing {}", kind);
    }
    assert_eq!(config.lookback_hours, 12);
    assert_eq!(config.lookahead_hours, 6);
  }

  #[test]
  fn only_ecs_matches_case_insensitively() {
    let config = DetectorConfig::default();
    let ecs = config.source(SourceKind::Ecs).unwrap();
    assert_eq!(ecs.signature.mode, MatchMode::CaseInsensitive);
    assert_eq!(
      config.source(SourceKind::App).unwrap().signature.mode,
      MatchMode::CaseSensitive
    );
    assert_eq!(
      config.source(SourceKind::Rds).unwrap().signature.mode,
      MatchMode::CaseSensitive
    );
  }

  #[test]
  fn env_overrides_window_offsets() {
    let vars: HashMap<&str, &str> = [(LOOKBACK_ENV, "24"), (LOOKAHEAD_ENV, " 2 ")].into();
    let config = DetectorConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
    assert_eq!(config.lookback_hours, 24);
    assert_eq!(config.lookahead_hours, 2);
  }

  #[test]
  fn out_of_range_offsets_are_rejected() {
    for key in [LOOKBACK_ENV, LOOKAHEAD_ENV] {
      let err = DetectorConfig::from_lookup(|k| (k == key).then(|| "4294967295".to_string()))
        .unwrap_err();
      assert!(err.to_string().contains(key), "{}", err);
      assert!(err.to_string().contains("at most"), "{}", err);
    }
    let max = MAX_OFFSET_HOURS.to_string();
    let config = DetectorConfig::from_lookup(|_| Some(max.clone())).unwrap();
    assert_eq!(config.lookback_hours, MAX_OFFSET_HOURS);
    assert_eq!(config.lookahead_hours, MAX_OFFSET_HOURS);
  }

  #[test]
  fn bad_env_value_is_rejected() {
    let err = DetectorConfig::from_lookup(|k| (k == LOOKAHEAD_ENV).then(|| "-1".to_string()))
      .unwrap_err();
    assert!(err.to_string().contains(LOOKAHEAD_ENV));
  }
}

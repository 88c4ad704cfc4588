//! Core types for the incident detector (JSON contracts + internal models).

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Log sources
// ---------------------------------------------------------------------------

/// The three log sources the detector correlates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
  App,
  Ecs,
  Rds,
}

impl SourceKind {
  pub const ALL: [SourceKind; 3] = [SourceKind::App, SourceKind::Ecs, SourceKind::Rds];

  /// Evidence flag raised when this source's signature matches.
  pub fn flag(self) -> &'static str {
    match self {
      Self::App => "db_client_error",
      Self::Ecs => "ecs_health_error",
      Self::Rds => "db_capacity_error",
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::App => "app",
      Self::Ecs => "ecs",
      Self::Rds => "rds",
    }
  }
}

impl fmt::Display for SourceKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
  CaseSensitive,
  CaseInsensitive,
}

/// A fixed substring marking a known failure mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
  pub pattern: String,
  pub mode: MatchMode,
}

impl Signature {
  pub fn case_sensitive(pattern: impl Into<String>) -> Self {
    Self {
      pattern: pattern.into(),
      mode: MatchMode::CaseSensitive,
    }
  }

  pub fn case_insensitive(pattern: impl Into<String>) -> Self {
    Self {
      pattern: pattern.into(),
      mode: MatchMode::CaseInsensitive,
    }
  }
}

/// One row of the source table: where to read, what to look for, what to seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
  pub kind: SourceKind,
  pub log_group: String,
  pub log_stream: String,
  pub signature: Signature,
  pub seed_message: String,
}

// ---------------------------------------------------------------------------
// Events + query window
// ---------------------------------------------------------------------------

/// A single log event as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
  pub message: String,
  /// Epoch milliseconds.
  pub timestamp: i64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub log_stream: Option<String>,
}

impl LogEvent {
  pub fn new(message: impl Into<String>, timestamp: i64) -> Self {
    Self {
      message: message.into(),
      timestamp,
      log_stream: None,
    }
  }
}

/// Inclusive query window in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
  pub start_ms: i64,
  pub end_ms: i64,
}

impl TimeWindow {
  pub fn contains(&self, ts: i64) -> bool {
    ts >= self.start_ms && ts <= self.end_ms
  }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

pub const KNOWN_INCIDENT: &str = "RDS max connections exceeded → app timeouts → ECS restarts";
pub const NO_INCIDENT: &str = "no incident detected";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
  KnownIncident,
  NoIncident,
}

impl Verdict {
  pub fn description(self) -> &'static str {
    match self {
      Self::KnownIncident => KNOWN_INCIDENT,
      Self::NoIncident => NO_INCIDENT,
    }
  }

  pub fn is_incident(self) -> bool {
    matches!(self, Self::KnownIncident)
  }
}

impl fmt::Display for Verdict {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.description())
  }
}

// ---------------------------------------------------------------------------
// Output types (JSON contract — what we emit)
// ---------------------------------------------------------------------------

/// What one source contributed to a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceEvidence {
  pub source: SourceKind,
  pub log_group: String,
  pub event_count: usize,
  pub matched_count: usize,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sample: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub fetch_error: Option<String>,
}

impl SourceEvidence {
  pub fn flagged(&self) -> bool {
    self.matched_count > 0
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub incident_id: Option<String>,
  pub window: TimeWindow,
  pub sources: Vec<SourceEvidence>,
  pub flags: Vec<String>,
  pub verdict: Verdict,
  pub summary: String,
}

/// Lambda response. The verdict travels through the log, not this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerOutput {
  pub status: String,
}

impl HandlerOutput {
  pub fn ok() -> Self {
    Self {
      status: "ok".to_string(),
    }
  }
}

// ---------------------------------------------------------------------------
// CLI stream wrappers
// ---------------------------------------------------------------------------

/// Offline input: messages per source, read from stdin by `detect-offline`.
/// A missing key means that source returned nothing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfflineInput {
  #[serde(default)]
  pub app: Vec<String>,
  #[serde(default)]
  pub ecs: Vec<String>,
  #[serde(default)]
  pub rds: Vec<String>,
}

impl OfflineInput {
  pub fn messages(&self, kind: SourceKind) -> &[String] {
    match kind {
      SourceKind::App => &self.app,
      SourceKind::Ecs => &self.ecs,
      SourceKind::Rds => &self.rds,
    }
  }
}

/// Structured error output for unreadable input.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
    }
  }
}

//! Structured error types for the incident detector.

use thiserror::Error;

/// Failures reported by a log backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
  #[error("already exists: {0}")]
  AlreadyExists(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error("request failed: {0}")]
  Request(String),
}

impl BackendError {
  pub fn is_already_exists(&self) -> bool {
    matches!(self, Self::AlreadyExists(_))
  }

  pub fn request(msg: impl Into<String>) -> Self {
    Self::Request(msg.into())
  }
}

#[derive(Debug, Error)]
pub enum DetectorError {
  #[error("config: {field}: {reason}")]
  Config { field: String, reason: String },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("io: {0}")]
  Io(#[from] std::io::Error),
}

impl DetectorError {
  pub fn config(field: &str, reason: &str) -> Self {
    Self::Config {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }
}

//! Seeder errors. "Already exists" never surfaces here; ensure-steps absorb it.

use incident_detector::{BackendError, SourceKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("create log group {group}: {source}")]
    CreateGroup { group: String, source: BackendError },

    #[error("create log stream {group}/{stream}: {source}")]
    CreateStream {
        group: String,
        stream: String,
        source: BackendError,
    },

    #[error("put log event {group}/{stream}: {source}")]
    Put {
        group: String,
        stream: String,
        source: BackendError,
    },

    #[error("timeline names {0}, which has no configured source")]
    UnknownSource(SourceKind),

    #[error("config: {field}: {reason}")]
    Config { field: String, reason: String },
}

impl SeedError {
    pub fn config(field: &str, reason: &str) -> Self {
        Self::Config {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

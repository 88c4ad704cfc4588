//! Log Incident Detector — deterministic, rule-based root-cause inference.
//!
//! Fetches recent events from the app, ECS container insights and RDS log groups,
//! matches each against one fixed signature, and reports the known incident
//! ("RDS max connections exceeded → app timeouts → ECS restarts") only when all
//! three signatures co-occur.
//!
//! Fetch failures are never fatal; they count as absent evidence.

pub mod backend;
pub mod config;
pub mod detector;
pub mod error;
pub mod fingerprint;
pub mod handler;
pub mod logging;
pub mod normalize;
pub mod signature;
pub mod types;
pub mod window;

pub use backend::{CloudWatchBackend, LogBackend, MemoryBackend};
pub use config::DetectorConfig;
pub use detector::Detector;
pub use error::{BackendError, DetectorError};
pub use types::{DetectionReport, HandlerOutput, LogEvent, SourceKind, SourceSpec, TimeWindow, Verdict};

//! Log backend abstraction.
//!
//! Production code talks to CloudWatch Logs through [`CloudWatchBackend`]; tests
//! and the offline binary use [`MemoryBackend`]. Both the detector and the seeder
//! only see the [`LogBackend`] trait, so the client is always injected.

mod cloudwatch;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BackendError;
use crate::types::{LogEvent, TimeWindow};

pub use cloudwatch::CloudWatchBackend;
pub use memory::{MemoryBackend, PutRecord};

#[async_trait]
pub trait LogBackend: Send + Sync {
  /// All events in `log_group` whose timestamp falls inside `window`.
  async fn filter_log_events(
    &self,
    log_group: &str,
    window: TimeWindow,
  ) -> Result<Vec<LogEvent>, BackendError>;

  async fn create_log_group(&self, log_group: &str) -> Result<(), BackendError>;

  async fn create_log_stream(&self, log_group: &str, log_stream: &str) -> Result<(), BackendError>;

  /// Append one event. Returns the next sequence token, if the backend issues one.
  async fn put_log_event(
    &self,
    log_group: &str,
    log_stream: &str,
    event: &LogEvent,
    sequence_token: Option<&str>,
  ) -> Result<Option<String>, BackendError>;
}

#[async_trait]
impl<T: LogBackend + ?Sized> LogBackend for Arc<T> {
  async fn filter_log_events(
    &self,
    log_group: &str,
    window: TimeWindow,
  ) -> Result<Vec<LogEvent>, BackendError> {
    (**self).filter_log_events(log_group, window).await
  }

  async fn create_log_group(&self, log_group: &str) -> Result<(), BackendError> {
    (**self).create_log_group(log_group).await
  }

  async fn create_log_stream(&self, log_group: &str, log_stream: &str) -> Result<(), BackendError> {
    (**self).create_log_stream(log_group, log_stream).await
  }

  async fn put_log_event(
    &self,
    log_group: &str,
    log_stream: &str,
    event: &LogEvent,
    sequence_token: Option<&str>,
  ) -> Result<Option<String>, BackendError> {
    (**self)
      .put_log_event(log_group, log_stream, event, sequence_token)
      .await
  }
}

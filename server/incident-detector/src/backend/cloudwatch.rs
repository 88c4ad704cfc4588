//! CloudWatch Logs backend over `aws-sdk-cloudwatchlogs`.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_cloudwatchlogs::config::Region;
use aws_sdk_cloudwatchlogs::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cloudwatchlogs::types::InputLogEvent;
use aws_sdk_cloudwatchlogs::Client;

use super::LogBackend;
use crate::error::BackendError;
use crate::normalize;
use crate::types::{LogEvent, TimeWindow};

/// Upper bound on `FilterLogEvents` pages read per group in one call.
const MAX_PAGES: usize = 100;

#[derive(Debug, Clone)]
pub struct CloudWatchBackend {
  client: Client,
}

impl CloudWatchBackend {
  pub fn new(client: Client) -> Self {
    Self { client }
  }

  /// Client from the default credential/region provider chain.
  pub async fn from_env() -> Self {
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    Self::new(Client::new(&config))
  }

  /// Client pinned to `region`; credentials still come from the default chain.
  pub async fn for_region(region: impl Into<String>) -> Self {
    let config = aws_config::defaults(BehaviorVersion::latest())
      .region(Region::new(region.into()))
      .load()
      .await;
    Self::new(Client::new(&config))
  }
}

/// Map SDK failures onto backend errors by service error code.
fn classify<E>(err: SdkError<E>, resource: &str) -> BackendError
where
  E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
  match err.code() {
    Some("ResourceAlreadyExistsException") => BackendError::AlreadyExists(resource.to_string()),
    Some("ResourceNotFoundException") => BackendError::NotFound(resource.to_string()),
    Some("InvalidParameterException") => {
      BackendError::InvalidInput(format!("{}: {}", resource, DisplayErrorContext(&err)))
    }
    _ => BackendError::request(format!("{}: {}", resource, DisplayErrorContext(&err))),
  }
}

#[async_trait]
impl LogBackend for CloudWatchBackend {
  async fn filter_log_events(
    &self,
    log_group: &str,
    window: TimeWindow,
  ) -> Result<Vec<LogEvent>, BackendError> {
    let mut events = Vec::new();
    let mut next_token: Option<String> = None;

    for _ in 0..MAX_PAGES {
      let out = self
        .client
        .filter_log_events()
        .log_group_name(log_group)
        .start_time(window.start_ms)
        .end_time(window.end_ms)
        .set_next_token(next_token.take())
        .send()
        .await
        .map_err(|e| classify(e, log_group))?;

      events.extend(out.events().iter().filter_map(normalize::from_filtered));

      match out.next_token() {
        Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
        _ => return Ok(events),
      }
    }

    tracing::warn!(log_group, pages = MAX_PAGES, "page limit reached; results truncated");
    Ok(events)
  }

  async fn create_log_group(&self, log_group: &str) -> Result<(), BackendError> {
    self
      .client
      .create_log_group()
      .log_group_name(log_group)
      .send()
      .await
      .map_err(|e| classify(e, log_group))?;
    Ok(())
  }

  async fn create_log_stream(&self, log_group: &str, log_stream: &str) -> Result<(), BackendError> {
    self
      .client
      .create_log_stream()
      .log_group_name(log_group)
      .log_stream_name(log_stream)
      .send()
      .await
      .map_err(|e| classify(e, &format!("{}/{}", log_group, log_stream)))?;
    Ok(())
  }

  async fn put_log_event(
    &self,
    log_group: &str,
    log_stream: &str,
    event: &LogEvent,
    sequence_token: Option<&str>,
  ) -> Result<Option<String>, BackendError> {
    let input = InputLogEvent::builder()
      .message(event.message.as_str())
      .timestamp(event.timestamp)
      .build()
      .map_err(|e| BackendError::InvalidInput(e.to_string()))?;

    let out = self
      .client
      .put_log_events()
      .log_group_name(log_group)
      .log_stream_name(log_stream)
      .log_events(input)
      .set_sequence_token(sequence_token.map(str::to_string))
      .send()
      .await
      .map_err(|e| classify(e, &format!("{}/{}", log_group, log_stream)))?;

    Ok(out.next_sequence_token().map(str::to_string))
  }
}

//! Normalize backend records and offline input into canonical LogEvents.

use aws_sdk_cloudwatchlogs::types::FilteredLogEvent;

use crate::backend::MemoryBackend;
use crate::config::DetectorConfig;
use crate::types::{LogEvent, OfflineInput, TimeWindow};

/// Convert a CloudWatch event. Events without a message carry no evidence and are dropped.
pub fn from_filtered(raw: &FilteredLogEvent) -> Option<LogEvent> {
  let message = raw.message()?;
  Some(LogEvent {
    message: clean_message(message),
    timestamp: raw.timestamp().unwrap_or_default(),
    log_stream: raw.log_stream_name().map(str::to_string),
  })
}

/// Strip the trailing line terminator agents append to each record.
pub fn clean_message(message: &str) -> String {
  message.trim_end_matches(['\r', '\n']).to_string()
}

/// Load offline input into a memory backend laid out like the configured sources.
///
/// Every message is stamped at the window start so it is always in range.
pub fn offline_backend(input: &OfflineInput, config: &DetectorConfig, window: &TimeWindow) -> MemoryBackend {
  let backend = MemoryBackend::new();
  for source in &config.sources {
    backend.insert(
      &source.log_group,
      &source.log_stream,
      input
        .messages(source.kind)
        .iter()
        .map(|m| LogEvent::new(clean_message(m), window.start_ms)),
    );
  }
  backend
}

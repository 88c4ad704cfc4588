//! In-memory log backend with failure injection.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::LogBackend;
use crate::error::BackendError;
use crate::types::{LogEvent, TimeWindow};

/// One recorded `put_log_event` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutRecord {
  pub log_group: String,
  pub log_stream: String,
  pub message: String,
  pub sequence_token: Option<String>,
}

#[derive(Debug, Default)]
struct State {
  /// group -> stream -> events
  groups: BTreeMap<String, BTreeMap<String, Vec<LogEvent>>>,
  failures: HashMap<String, BackendError>,
  puts: Vec<PutRecord>,
  next_token: u64,
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
  state: Mutex<State>,
}

impl MemoryBackend {
  pub fn new() -> Self {
    Self::default()
  }

  fn lock(&self) -> MutexGuard<'_, State> {
    self.state.lock().unwrap_or_else(|e| e.into_inner())
  }

  /// Store events directly, creating the group and stream as needed.
  pub fn insert(&self, log_group: &str, log_stream: &str, events: impl IntoIterator<Item = LogEvent>) {
    let mut state = self.lock();
    state
      .groups
      .entry(log_group.to_string())
      .or_default()
      .entry(log_stream.to_string())
      .or_default()
      .extend(events);
  }

  /// Make every call touching `log_group` fail with `err`.
  pub fn fail_group(&self, log_group: &str, err: BackendError) {
    self.lock().failures.insert(log_group.to_string(), err);
  }

  pub fn has_group(&self, log_group: &str) -> bool {
    self.lock().groups.contains_key(log_group)
  }

  pub fn has_stream(&self, log_group: &str, log_stream: &str) -> bool {
    self
      .lock()
      .groups
      .get(log_group)
      .is_some_and(|streams| streams.contains_key(log_stream))
  }

  pub fn events(&self, log_group: &str) -> Vec<LogEvent> {
    self
      .lock()
      .groups
      .get(log_group)
      .map(|streams| streams.values().flatten().cloned().collect())
      .unwrap_or_default()
  }

  pub fn puts(&self) -> Vec<PutRecord> {
    self.lock().puts.clone()
  }

  fn check_failure(state: &State, log_group: &str) -> Result<(), BackendError> {
    match state.failures.get(log_group) {
      Some(err) => Err(err.clone()),
      None => Ok(()),
    }
  }
}

#[async_trait]
impl LogBackend for MemoryBackend {
  async fn filter_log_events(
    &self,
    log_group: &str,
    window: TimeWindow,
  ) -> Result<Vec<LogEvent>, BackendError> {
    let state = self.lock();
    Self::check_failure(&state, log_group)?;
    let streams = state
      .groups
      .get(log_group)
      .ok_or_else(|| BackendError::NotFound(log_group.to_string()))?;

    let mut events: Vec<LogEvent> = streams
      .iter()
      .flat_map(|(stream, events)| {
        events
          .iter()
          .filter(|e| window.contains(e.timestamp))
          .map(move |e| LogEvent {
            log_stream: Some(stream.clone()),
            ..e.clone()
          })
      })
      .collect();
    events.sort_by_key(|e| e.timestamp);
    Ok(events)
  }

  async fn create_log_group(&self, log_group: &str) -> Result<(), BackendError> {
    let mut state = self.lock();
    Self::check_failure(&state, log_group)?;
    if state.groups.contains_key(log_group) {
      return Err(BackendError::AlreadyExists(log_group.to_string()));
    }
    state.groups.insert(log_group.to_string(), BTreeMap::new());
    Ok(())
  }

  async fn create_log_stream(&self, log_group: &str, log_stream: &str) -> Result<(), BackendError> {
    let mut state = self.lock();
    Self::check_failure(&state, log_group)?;
    let streams = state
      .groups
      .get_mut(log_group)
      .ok_or_else(|| BackendError::NotFound(log_group.to_string()))?;
    if streams.contains_key(log_stream) {
      return Err(BackendError::AlreadyExists(format!("{}/{}", log_group, log_stream)));
    }
    streams.insert(log_stream.to_string(), Vec::new());
    Ok(())
  }

  async fn put_log_event(
    &self,
    log_group: &str,
    log_stream: &str,
    event: &LogEvent,
    sequence_token: Option<&str>,
  ) -> Result<Option<String>, BackendError> {
    let mut state = self.lock();
    Self::check_failure(&state, log_group)?;
    let stream = state
      .groups
      .get_mut(log_group)
      .and_then(|streams| streams.get_mut(log_stream))
      .ok_or_else(|| BackendError::NotFound(format!("{}/{}", log_group, log_stream)))?;
    stream.push(event.clone());

    state.puts.push(PutRecord {
      log_group: log_group.to_string(),
      log_stream: log_stream.to_string(),
      message: event.message.clone(),
      sequence_token: sequence_token.map(str::to_string),
    });
    state.next_token += 1;
    Ok(Some(format!("seq-{:08}", state.next_token)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn window(start_ms: i64, end_ms: i64) -> TimeWindow {
    TimeWindow { start_ms, end_ms }
  }

  #[tokio::test]
  async fn filter_respects_window_and_orders_by_time() {
    let backend = MemoryBackend::new();
    backend.insert(
      "/g",
      "s1",
      vec![LogEvent::new("late", 300), LogEvent::new("early", 100)],
    );
    backend.insert("/g", "s2", vec![LogEvent::new("outside", 900)]);

    let events = backend.filter_log_events("/g", window(0, 500)).await.unwrap();
    let messages: Vec<&str> = events.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["early", "late"]);
    assert_eq!(events[0].log_stream.as_deref(), Some("s1"));
  }

  #[tokio::test]
  async fn filter_missing_group_is_not_found() {
    let backend = MemoryBackend::new();
    let err = backend.filter_log_events("/nope", window(0, 1)).await.unwrap_err();
    assert_eq!(err, BackendError::NotFound("/nope".into()));
  }

  #[tokio::test]
  async fn create_twice_reports_already_exists() {
    let backend = MemoryBackend::new();
    backend.create_log_group("/g").await.unwrap();
    assert!(backend.create_log_group("/g").await.unwrap_err().is_already_exists());

    backend.create_log_stream("/g", "s").await.unwrap();
    assert!(backend
      .create_log_stream("/g", "s")
      .await
      .unwrap_err()
      .is_already_exists());
  }

  #[tokio::test]
  async fn put_requires_stream_and_issues_tokens() {
    let backend = MemoryBackend::new();
    let event = LogEvent::new("hello", 1);
    assert!(backend.put_log_event("/g", "s", &event, None).await.is_err());

    backend.create_log_group("/g").await.unwrap();
    backend.create_log_stream("/g", "s").await.unwrap();
    let t1 = backend.put_log_event("/g", "s", &event, None).await.unwrap();
    let t2 = backend
      .put_log_event("/g", "s", &event, t1.as_deref())
      .await
      .unwrap();
    assert_ne!(t1, t2);

    let puts = backend.puts();
    assert_eq!(puts.len(), 2);
    assert_eq!(puts[1].sequence_token, t1);
    assert_eq!(backend.events("/g").len(), 2);
  }

  #[tokio::test]
  async fn injected_failure_wins() {
    let backend = MemoryBackend::new();
    backend.insert("/g", "s", vec![LogEvent::new("x", 1)]);
    backend.fail_group("/g", BackendError::request("throttled"));
    let err = backend.filter_log_events("/g", window(0, 10)).await.unwrap_err();
    assert_eq!(err, BackendError::request("throttled"));
  }
}

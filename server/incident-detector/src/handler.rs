//! Lambda handler: one detection pass per invocation.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;

use crate::backend::LogBackend;
use crate::detector::Detector;
use crate::types::HandlerOutput;

/// Run the detector and acknowledge. The trigger payload is not inspected and the
/// verdict is reported through the log only, so this always returns `{"status":"ok"}`.
pub async fn handle<B: LogBackend>(
  detector: &Detector<B>,
  event: LambdaEvent<Value>,
) -> Result<HandlerOutput, Error> {
  tracing::debug!(request_id = %event.context.request_id, "invocation");
  let report = detector.detect_incident().await;
  match serde_json::to_string(&report) {
    Ok(json) => tracing::debug!(report = %json, "detection report"),
    Err(e) => tracing::warn!(error = %e, "report serialization failed"),
  }
  Ok(HandlerOutput::ok())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::backend::MemoryBackend;
  use crate::error::BackendError;
  use lambda_runtime::Context;
  use serde_json::json;
  use std::io;
  use std::sync::{Arc, Mutex};

  #[derive(Clone, Default)]
  struct SharedBuf(Arc<Mutex<Vec<u8>>>);

  impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
      self.0.lock().unwrap().extend_from_slice(buf);
      Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  #[tokio::test]
  async fn report_summary_logged_once_at_info() {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
      .with_max_level(tracing::Level::INFO)
      .with_ansi(false)
      .with_writer(move || writer.clone())
      .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let detector = Detector::with_defaults(MemoryBackend::new());
    let event = LambdaEvent::new(json!({}), Context::default());
    handle(&detector, event).await.unwrap();

    let logged = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    assert_eq!(logged.matches("No major incident detected").count(), 1, "{}", logged);
    assert!(!logged.contains("detection report"), "{}", logged);
  }

  #[tokio::test]
  async fn always_returns_ok_status() {
    let backend = MemoryBackend::new();
    backend.fail_group("/ecs/my-python-service", BackendError::request("boom"));
    let detector = Detector::with_defaults(backend);

    let event = LambdaEvent::new(json!({"detail-type": "Scheduled Event"}), Context::default());
    let out = handle(&detector, event).await.unwrap();
    assert_eq!(serde_json::to_value(&out).unwrap(), json!({"status": "ok"}));
  }
}

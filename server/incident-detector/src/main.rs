//! Lambda entrypoint (`bootstrap`).
//!
//! The CloudWatch Logs client is built once per cold start and injected into the
//! detector; every invocation runs one detection pass.

use incident_detector::{handler, logging, CloudWatchBackend, Detector, DetectorConfig};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
  logging::init(true);

  let config = DetectorConfig::from_env()?;
  let backend = CloudWatchBackend::from_env().await;
  let detector = Detector::new(config, backend);

  lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
    handler::handle(&detector, event)
  }))
  .await
}

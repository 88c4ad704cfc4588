//! Offline entrypoint: read one JSON object from stdin, write one report line to stdout.
//!
//! Input: `{"app": [..], "ecs": [..], "rds": [..]}`, message lists per source.
//! Output: a DetectionReport, or an ErrorOutput when the input is not valid JSON.

use chrono::Utc;
use incident_detector::types::{ErrorOutput, OfflineInput};
use incident_detector::{logging, normalize, window, Detector, DetectorConfig, DetectorError};
use std::io::{self, Read, Write};

#[tokio::main]
async fn main() {
  logging::init(false);
  if let Err(e) = run_binary().await {
    let _ = writeln!(io::stderr(), "detect-offline error: {}", e);
    std::process::exit(1);
  }
}

async fn run_binary() -> Result<(), DetectorError> {
  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;

  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());

  let input: OfflineInput = match serde_json::from_str(raw.trim()) {
    Ok(v) => v,
    Err(e) => {
      let err = ErrorOutput::new(DetectorError::from(e).to_string());
      serde_json::to_writer(&mut out, &err)?;
      writeln!(out)?;
      out.flush()?;
      return Ok(());
    }
  };

  let config = DetectorConfig::from_env()?;
  let now = Utc::now();
  let backend = normalize::offline_backend(&input, &config, &window::for_config(now, &config));
  let detector = Detector::new(config, backend);
  let report = detector.detect_incident_at(now).await;

  serde_json::to_writer(&mut out, &report)?;
  writeln!(out)?;
  out.flush()?;
  Ok(())
}

//! Core detector: fetches evidence per source and derives the verdict.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::backend::LogBackend;
use crate::config::DetectorConfig;
use crate::error::BackendError;
use crate::fingerprint;
use crate::signature;
use crate::types::*;
use crate::window;

/// Outcome of fetching one source.
pub type FetchResult = Result<Vec<LogEvent>, BackendError>;

/// The incident detector. Holds an injected log backend; no state across runs.
pub struct Detector<B> {
  config: DetectorConfig,
  backend: B,
}

impl<B: LogBackend> Detector<B> {
  pub fn new(config: DetectorConfig, backend: B) -> Self {
    Self { config, backend }
  }

  pub fn with_defaults(backend: B) -> Self {
    Self::new(DetectorConfig::default(), backend)
  }

  /// Fetch all events of `log_group` inside `window`.
  ///
  /// Never fails: a backend error is logged and yields an empty sequence.
  pub async fn fetch_events(&self, log_group: &str, window: TimeWindow) -> Vec<LogEvent> {
    self.try_fetch(log_group, window).await.unwrap_or_default()
  }

  async fn try_fetch(&self, log_group: &str, window: TimeWindow) -> FetchResult {
    match self.backend.filter_log_events(log_group, window).await {
      Ok(events) => {
        tracing::info!(log_group, count = events.len(), "retrieved events");
        Ok(events)
      }
      Err(e) => {
        tracing::warn!(log_group, error = %e, "error reading log group; treating as no evidence");
        Err(e)
      }
    }
  }

  /// Run one detection pass over `[now - lookback, now + lookahead]`.
  pub async fn detect_incident(&self) -> DetectionReport {
    self.detect_incident_at(Utc::now()).await
  }

  pub async fn detect_incident_at(&self, now: DateTime<Utc>) -> DetectionReport {
    let window = window::for_config(now, &self.config);

    // One result per table row, in row order; only the union of flags matters.
    let mut fetched: Vec<FetchResult> = Vec::with_capacity(self.config.sources.len());
    for source in &self.config.sources {
      fetched.push(self.try_fetch(&source.log_group, window).await);
    }

    let report = evaluate(&self.config, window, &fetched);
    log_report(&report);
    report
  }
}

/// Derive a report from fetch results aligned with `config.sources` by row.
/// Rows past the end of `fetched` count as empty.
pub fn evaluate(
  config: &DetectorConfig,
  window: TimeWindow,
  fetched: &[FetchResult],
) -> DetectionReport {
  let mut raised: BTreeSet<SourceKind> = BTreeSet::new();

  let sources: Vec<SourceEvidence> = config
    .sources
    .iter()
    .enumerate()
    .map(|(row, spec)| {
      let (events, fetch_error) = match fetched.get(row) {
        Some(Ok(events)) => (events.as_slice(), None),
        Some(Err(e)) => (&[][..], Some(e.to_string())),
        None => (&[][..], None),
      };

      let matched_count = signature::count_matches(&spec.signature, events);
      if matched_count > 0 {
        raised.insert(spec.kind);
      }

      SourceEvidence {
        source: spec.kind,
        log_group: spec.log_group.clone(),
        event_count: events.len(),
        matched_count,
        sample: events.first().map(|e| e.message.clone()),
        fetch_error,
      }
    })
    .collect();

  let verdict = verdict_for(&raised);

  let mut flags: Vec<String> = raised.iter().map(|k| k.flag().to_string()).collect();
  flags.sort();

  let incident_id = verdict
    .is_incident()
    .then(|| fingerprint::incident_id(&flags, &window));

  let summary = match verdict {
    Verdict::KnownIncident => format!("RCA: {}", verdict.description()),
    Verdict::NoIncident => "No major incident detected".to_string(),
  };

  DetectionReport {
    incident_id,
    window,
    sources,
    flags,
    verdict,
    summary,
  }
}

/// Known incident iff the raised set is exactly {app, ecs, rds}.
pub fn verdict_for(raised: &BTreeSet<SourceKind>) -> Verdict {
  let required: BTreeSet<SourceKind> = SourceKind::ALL.into_iter().collect();
  if *raised == required {
    Verdict::KnownIncident
  } else {
    Verdict::NoIncident
  }
}

fn log_report(report: &DetectionReport) {
  for source in &report.sources {
    tracing::info!(
      source = %source.source,
      log_group = %source.log_group,
      events = source.event_count,
      matched = source.matched_count,
      "found {} {} logs",
      source.event_count,
      source.source
    );
    if let Some(sample) = &source.sample {
      tracing::info!(source = %source.source, "sample {} log: {}", source.source, sample);
    }
  }

  match &report.incident_id {
    Some(id) => tracing::warn!(incident_id = %id, flags = ?report.flags, "{}", report.summary),
    None => tracing::info!(flags = ?report.flags, "{}", report.summary),
  }
}

//! Idempotent provisioning plus the scripted incident timeline.

use std::collections::HashMap;

use chrono::Utc;
use incident_detector::config::default_sources;
use incident_detector::{LogBackend, LogEvent, SourceKind, SourceSpec};
use serde::Serialize;

use crate::config::SeederConfig;
use crate::error::SeedError;

/// One message written by [`Seeder::seed_incident`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeededEvent {
    pub source: SourceKind,
    pub log_group: String,
    pub log_stream: String,
    pub message: String,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_sequence_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub region: String,
    pub events: Vec<SeededEvent>,
}

pub struct Seeder<B> {
    config: SeederConfig,
    sources: Vec<SourceSpec>,
    backend: B,
}

impl<B: LogBackend> Seeder<B> {
    pub fn new(config: SeederConfig, sources: Vec<SourceSpec>, backend: B) -> Self {
        Self {
            config,
            sources,
            backend,
        }
    }

    /// Seeder over the detector's own source table.
    pub fn with_default_sources(config: SeederConfig, backend: B) -> Self {
        Self::new(config, default_sources(), backend)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn ensure_log_group(&self, group: &str) -> Result<(), SeedError> {
        match self.backend.create_log_group(group).await {
            Ok(()) => {
                tracing::info!(group, "created log group");
                Ok(())
            }
            Err(e) if e.is_already_exists() => Ok(()),
            Err(source) => Err(SeedError::CreateGroup {
                group: group.to_string(),
                source,
            }),
        }
    }

    pub async fn ensure_log_stream(&self, group: &str, stream: &str) -> Result<(), SeedError> {
        match self.backend.create_log_stream(group, stream).await {
            Ok(()) => {
                tracing::info!(group, stream, "created log stream");
                Ok(())
            }
            Err(e) if e.is_already_exists() => Ok(()),
            Err(source) => Err(SeedError::CreateStream {
                group: group.to_string(),
                stream: stream.to_string(),
                source,
            }),
        }
    }

    /// Append `message` stamped with the current time; returns the next sequence token.
    pub async fn put_log_event(
        &self,
        group: &str,
        stream: &str,
        message: &str,
        sequence_token: Option<&str>,
    ) -> Result<(i64, Option<String>), SeedError> {
        let event = LogEvent::new(message, Utc::now().timestamp_millis());
        let next = self
            .backend
            .put_log_event(group, stream, &event, sequence_token)
            .await
            .map_err(|source| SeedError::Put {
                group: group.to_string(),
                stream: stream.to_string(),
                source,
            })?;
        Ok((event.timestamp, next))
    }

    /// Ensure every group/stream, then write the timeline in order.
    pub async fn seed_incident(&self) -> Result<SeedReport, SeedError> {
        // Validate the timeline before touching the backend.
        let steps: Vec<&SourceSpec> = self
            .config
            .timeline
            .iter()
            .map(|kind| {
                self.sources
                    .iter()
                    .find(|s| s.kind == *kind)
                    .ok_or(SeedError::UnknownSource(*kind))
            })
            .collect::<Result<_, _>>()?;

        for source in &self.sources {
            self.ensure_log_group(&source.log_group).await?;
            self.ensure_log_stream(&source.log_group, &source.log_stream)
                .await?;
        }

        tracing::info!(steps = steps.len(), "injecting mock incident logs");

        let mut tokens: HashMap<SourceKind, String> = HashMap::new();
        let mut events = Vec::with_capacity(steps.len());

        for (i, source) in steps.into_iter().enumerate() {
            if i > 0 && !self.config.delay.is_zero() {
                tokio::time::sleep(self.config.delay).await;
            }

            let (timestamp, next) = self
                .put_log_event(
                    &source.log_group,
                    &source.log_stream,
                    &source.seed_message,
                    tokens.get(&source.kind).map(String::as_str),
                )
                .await?;
            tracing::info!(source = %source.kind, group = %source.log_group, "wrote: {}", source.seed_message);

            if let Some(token) = &next {
                tokens.insert(source.kind, token.clone());
            }
            events.push(SeededEvent {
                source: source.kind,
                log_group: source.log_group.clone(),
                log_stream: source.log_stream.clone(),
                message: source.seed_message.clone(),
                timestamp,
                next_sequence_token: next,
            });
        }

        Ok(SeedReport {
            region: self.config.region.clone(),
            events,
        })
    }
}

//! Seeder configuration.

use std::time::Duration;

use incident_detector::SourceKind;

use crate::error::SeedError;

pub const REGION_ENV: &str = "LOG_SEEDER_REGION";
pub const DELAY_ENV: &str = "LOG_SEEDER_DELAY_MS";

#[derive(Debug, Clone)]
pub struct SeederConfig {
    pub region: String,
    /// Pause between consecutive writes.
    pub delay: Duration,
    /// Write order; one message per entry.
    pub timeline: Vec<SourceKind>,
}

impl Default for SeederConfig {
    fn default() -> Self {
        Self {
            region: "ap-south-1".to_string(),
            delay: Duration::from_secs(1),
            timeline: vec![SourceKind::Rds, SourceKind::App, SourceKind::Ecs],
        }
    }
}

impl SeederConfig {
    pub fn from_env() -> Result<Self, SeedError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SeedError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(region) = lookup(REGION_ENV) {
            let region = region.trim();
            if region.is_empty() {
                return Err(SeedError::config(REGION_ENV, "must not be empty"));
            }
            config.region = region.to_string();
        }
        if let Some(ms) = lookup(DELAY_ENV) {
            let ms: u64 = ms
                .trim()
                .parse()
                .map_err(|_| SeedError::config(DELAY_ENV, "expected milliseconds"))?;
            config.delay = Duration::from_millis(ms);
        }
        Ok(config)
    }
}

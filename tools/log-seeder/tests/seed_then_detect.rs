//! Seeded data must drive the detector to the known incident.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use incident_detector::{Detector, MemoryBackend, Verdict};
use log_seeder::{Seeder, SeederConfig};

#[tokio::test]
async fn seeded_backend_yields_known_incident() {
    let config = SeederConfig {
        delay: Duration::ZERO,
        ..SeederConfig::default()
    };
    let backend = Arc::new(MemoryBackend::new());
    let seeder = Seeder::with_default_sources(config, Arc::clone(&backend));
    seeder.seed_incident().await.unwrap();

    let detector = Detector::with_defaults(backend);
    let report = detector.detect_incident_at(Utc::now()).await;
    assert_eq!(report.verdict, Verdict::KnownIncident);
    assert_eq!(report.flags.len(), 3);
}

#[tokio::test]
async fn seeding_twice_is_safe() {
    let config = SeederConfig {
        delay: Duration::ZERO,
        ..SeederConfig::default()
    };
    let seeder = Seeder::with_default_sources(config, MemoryBackend::new());
    seeder.seed_incident().await.unwrap();
    let second = seeder.seed_incident().await.unwrap();
    assert_eq!(second.events.len(), 3);
    assert_eq!(seeder.backend().puts().len(), 6);
}

//! log-seeder: write a scripted incident timeline into CloudWatch Logs.
//!
//! Ensures each source's log group and stream exist, then appends one message per
//! source in causal order (RDS connection exhaustion, app connection failure, ECS
//! health-check failure) with a fixed delay between writes. The detector should
//! report the known incident over the seeded data.

pub mod config;
pub mod error;
pub mod seeder;

pub use config::SeederConfig;
pub use error::SeedError;
pub use seeder::{SeedReport, SeededEvent, Seeder};

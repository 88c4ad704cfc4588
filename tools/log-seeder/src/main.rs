//! log-seeder: push the mock RDS -> app -> ECS incident into CloudWatch Logs.
//!
//! Usage:
//!   log-seeder                    # seed the configured region (default ap-south-1)
//!   log-seeder --region <name>    # override the region
//!   log-seeder --json             # print the seed report as one JSON line
//!
//! Environment: LOG_SEEDER_REGION, LOG_SEEDER_DELAY_MS, RUST_LOG.

use std::env;
use std::process;

use incident_detector::{logging, CloudWatchBackend};
use log_seeder::{Seeder, SeederConfig};

fn usage() -> ! {
    eprintln!("Usage: log-seeder [--region <name>] [--json]");
    process::exit(2);
}

#[tokio::main]
async fn main() {
    logging::init(false);

    let args: Vec<String> = env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");

    let mut config = SeederConfig::from_env().unwrap_or_else(|e| {
        eprintln!("log-seeder: {}", e);
        process::exit(2);
    });

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--region" => match iter.next() {
                Some(region) => config.region = region.clone(),
                None => usage(),
            },
            "--json" => {}
            _ => usage(),
        }
    }

    let backend = CloudWatchBackend::for_region(config.region.clone()).await;
    let seeder = Seeder::with_default_sources(config, backend);

    let report = match seeder.seed_incident().await {
        Ok(r) => r,
        Err(e) => {
            eprintln!("log-seeder: {}", e);
            process::exit(1);
        }
    };

    if json {
        match serde_json::to_string(&report) {
            Ok(line) => println!("{}", line),
            Err(e) => {
                eprintln!("log-seeder: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!(
            "Mock logs pushed to CloudWatch ({} events, region {})",
            report.events.len(),
            report.region
        );
    }
}

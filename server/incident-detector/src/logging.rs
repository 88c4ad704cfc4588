//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// On Lambda, CloudWatch stamps each line itself, so timestamps and ANSI colours
/// are turned off.
pub fn init(lambda: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
  let result = if lambda {
    builder.with_ansi(false).without_time().try_init()
  } else {
    builder.with_writer(std::io::stderr).try_init()
  };
  if let Err(e) = result {
    eprintln!("tracing init skipped: {}", e);
  }
}

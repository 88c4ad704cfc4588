//! Query window arithmetic.

use chrono::{DateTime, Duration, Utc};

use crate::config::DetectorConfig;
use crate::types::TimeWindow;

/// Window `[now - lookback, now + lookahead]` in epoch milliseconds.
///
/// Edges that fall outside chrono's representable range saturate at its bounds.
pub fn around(now: DateTime<Utc>, lookback_hours: u32, lookahead_hours: u32) -> TimeWindow {
  let start = now
    .checked_sub_signed(Duration::hours(i64::from(lookback_hours)))
    .unwrap_or(DateTime::<Utc>::MIN_UTC);
  let end = now
    .checked_add_signed(Duration::hours(i64::from(lookahead_hours)))
    .unwrap_or(DateTime::<Utc>::MAX_UTC);
  TimeWindow {
    start_ms: start.timestamp_millis(),
    end_ms: end.timestamp_millis(),
  }
}

pub fn for_config(now: DateTime<Utc>, config: &DetectorConfig) -> TimeWindow {
  around(now, config.lookback_hours, config.lookahead_hours)
}

/// Hour bucket of the window start: "YYYY-MM-DDTHH".
pub fn start_hour_bucket(window: &TimeWindow) -> String {
  match DateTime::<Utc>::from_timestamp_millis(window.start_ms) {
    Some(ts) => ts.format("%Y-%m-%dT%H").to_string(),
    None => window.start_ms.to_string(),
  }
}

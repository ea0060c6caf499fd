//! Append-only history of per-run appearance counts.

use chrono::{DateTime, Utc};
use keyvis_core::HistoryPoint;

/// Minute-resolution timepoint layout used by every history sample.
const TIMEPOINT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Append one sample for the current run, stamped with the current UTC time.
///
/// Prior entries are carried forward unmodified — never reordered or
/// deduplicated. A sample landing in the same minute as the last entry is
/// still appended as a new entry. History length is unbounded.
#[must_use]
pub fn append_sample(prior: Vec<HistoryPoint>, appearances: i64) -> Vec<HistoryPoint> {
    append_sample_at(prior, appearances, Utc::now())
}

/// Append one sample with an explicit capture time.
#[must_use]
pub fn append_sample_at(
    prior: Vec<HistoryPoint>,
    appearances: i64,
    at: DateTime<Utc>,
) -> Vec<HistoryPoint> {
    let mut history = prior;
    history.push(HistoryPoint {
        timepoint: at.format(TIMEPOINT_FORMAT).to_string(),
        appearances,
    });
    history
}

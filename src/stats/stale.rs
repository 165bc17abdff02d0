use super::{describe, record_timestamp, CREATED_AT};
use crate::error::{RepoStatError, Result};
use crate::model::ResultSet;
use chrono::{DateTime, Duration, Utc};

/// Count open records created at least `threshold_days` before `now`.
///
/// The reporting window plays no part here. A single unreadable record
/// fails the whole count, so callers never mistake a failure for zero.
pub fn count_stale(records: &ResultSet, threshold_days: i64, now: DateTime<Utc>) -> Result<usize> {
    let cutoff = now - Duration::days(threshold_days);
    let mut stale = 0;

    for record in &records.records {
        let created = record_timestamp(record, CREATED_AT)?;
        let state = record
            .get("state")
            .and_then(|v| v.as_str())
            .ok_or_else(|| RepoStatError::MalformedRecord(format!("missing 'state' in {}", describe(record))))?;
        if created <= cutoff && state == "open" {
            stale += 1;
        }
    }

    Ok(stale)
}

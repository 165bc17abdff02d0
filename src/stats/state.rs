use super::{describe, within, CREATED_AT};
use crate::error_log::ErrorLog;
use crate::model::{DateRange, ResultSet, StateCount};

/// Count open and closed records created inside `range`.
///
/// Records with an absent or unrecognised `state` count towards neither
/// bucket and are written to `error_log`.
pub fn count_states(records: &ResultSet, range: &DateRange, error_log: &dyn ErrorLog) -> StateCount {
    let mut count = StateCount::default();

    for record in within(&records.records, range, CREATED_AT, error_log) {
        match record.get("state").and_then(|v| v.as_str()) {
            Some("open") => count.open += 1,
            Some("closed") => count.closed += 1,
            Some(other) => error_log.record(&format!("Unexpected state '{other}' in {}", describe(record))),
            None => error_log.record(&format!("Missing state in {}", describe(record))),
        }
    }

    count
}

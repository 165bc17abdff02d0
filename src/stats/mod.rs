pub mod authors;
pub mod stale;
pub mod state;

pub use authors::{top_authors, AuthorsOutcome};
pub use stale::count_stale;
pub use state::count_states;

use crate::error::{RepoStatError, Result};
use crate::error_log::ErrorLog;
use crate::model::{DateRange, Record};
use crate::util::parse_timestamp;
use chrono::{DateTime, Utc};

/// JSON pointer to a commit's author date.
pub const COMMIT_DATE: &str = "/commit/author/date";
/// JSON pointer to a pull request's or issue's creation date.
pub const CREATED_AT: &str = "/created_at";

/// Read and parse the timestamp at `pointer`.
pub fn record_timestamp(record: &Record, pointer: &str) -> Result<DateTime<Utc>> {
    let raw = record
        .pointer(pointer)
        .and_then(|v| v.as_str())
        .ok_or_else(|| RepoStatError::MalformedRecord(format!("missing '{pointer}' in {}", describe(record))))?;
    parse_timestamp(raw)
}

/// Records whose timestamp at `pointer` lies inside `range`.
///
/// Records without a readable timestamp are skipped and written to `error_log`.
pub fn within<'a>(
    records: &'a [Record],
    range: &'a DateRange,
    pointer: &'a str,
    error_log: &'a dyn ErrorLog,
) -> impl Iterator<Item = &'a Record> + 'a {
    records.iter().filter(move |record| match record_timestamp(record, pointer) {
        Ok(ts) => range.contains(&ts),
        Err(e) => {
            error_log.record(&e.to_string());
            false
        }
    })
}

/// Short identification of a record for diagnostics.
pub(crate) fn describe(record: &Record) -> String {
    for key in ["html_url", "url", "sha"] {
        if let Some(id) = record.get(key).and_then(|v| v.as_str()) {
            return id.to_string();
        }
    }
    if let Some(number) = record.get("number").and_then(|v| v.as_u64()) {
        return format!("#{number}");
    }
    "record without identifier".to_string()
}

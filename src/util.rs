use crate::error::{RepoStatError, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// The only timestamp shape accepted on the command line and in API records.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse a `YYYY-MM-DDTHH:MM:SSZ` timestamp.
///
/// chrono tolerates unpadded fields, so the shape is checked byte by byte
/// before handing the string over.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    if !has_timestamp_shape(input) {
        return Err(RepoStatError::InvalidDate(format!(
            "'{input}' does not match YYYY-MM-DDTHH:MM:SSZ"
        )));
    }

    let naive = NaiveDateTime::parse_from_str(input, TIMESTAMP_FORMAT)
        .map_err(|e| RepoStatError::InvalidDate(format!("'{input}': {e}")))?;
    Ok(Utc.from_utc_datetime(&naive))
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

fn has_timestamp_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    if bytes.len() != 20 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        10 => *b == b'T',
        13 | 16 => *b == b':',
        19 => *b == b'Z',
        _ => b.is_ascii_digit(),
    })
}

use super::{describe, within, COMMIT_DATE};
use crate::error_log::ErrorLog;
use crate::model::{AuthorCount, DateRange, ResultSet};
use std::collections::HashMap;

const LOG_TARGET: &str = "stats";
const NOT_FOUND: &str = "Not Found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorsOutcome {
    /// Authors by descending commit count.
    Ranked(Vec<AuthorCount>),
    /// The API reported the repository or branch as missing.
    NotFound,
    /// The API answered with some other error message; already logged.
    ApiError(String),
}

/// Rank commit authors inside `range`, keeping the `top_count` most active.
///
/// Authors with equal counts stay in the order they first appear in the
/// result set.
pub fn top_authors(
    commits: &ResultSet,
    range: &DateRange,
    top_count: usize,
    error_log: &dyn ErrorLog,
) -> AuthorsOutcome {
    match commits.message.as_deref() {
        Some(NOT_FOUND) => return AuthorsOutcome::NotFound,
        Some(message) => {
            error_log.record(message);
            return AuthorsOutcome::ApiError(message.to_string());
        }
        None => {}
    }

    let mut tally: Vec<AuthorCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for commit in within(&commits.records, range, COMMIT_DATE, error_log) {
        let Some(login) = commit.pointer("/author/login").and_then(|v| v.as_str()) else {
            error_log.record(&format!("Commit without author login: {}", describe(commit)));
            continue;
        };
        match index.get(login) {
            Some(&i) => tally[i].commits += 1,
            None => {
                index.insert(login.to_string(), tally.len());
                tally.push(AuthorCount::new(login, 1));
            }
        }
    }

    tally.sort_by(|a, b| b.commits.cmp(&a.commits));
    log::debug!(target: LOG_TARGET, "{} distinct authors in range", tally.len());
    tally.truncate(top_count);
    AuthorsOutcome::Ranked(tally)
}

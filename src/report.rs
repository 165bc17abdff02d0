//! Fetches the three resource kinds in a fixed order and prints their
//! statistics as soon as each one is available.

use crate::error::Result;
use crate::error_log::ErrorLog;
use crate::github::{fetch_resource, GitHubRepo, Transport};
use crate::model::{
    AuthorCount, Credential, DateRange, ResourceKind, ResultSet, StateCount, STALE_ISSUE_DAYS, STALE_PULL_DAYS,
};
use crate::stats::{count_stale, count_states, top_authors, AuthorsOutcome};
use chrono::Utc;
use console::style;

const LOG_TARGET: &str = "report";

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub repo: GitHubRepo,
    pub range: DateRange,
    pub branch: String,
    pub top_count: usize,
}

pub fn run<T: Transport + ?Sized>(
    transport: &T,
    error_log: &dyn ErrorLog,
    credential: &Credential,
    options: &ReportOptions,
) -> Result<()> {
    let fetch = |kind| fetch_resource(transport, error_log, &options.repo, kind, &options.branch, credential);

    let commits = fetch(ResourceKind::Commits)?;
    let outcome = top_authors(&commits, &options.range, options.top_count, error_log);
    if let AuthorsOutcome::ApiError(message) = &outcome {
        log::warn!(target: LOG_TARGET, "Commits request returned '{message}'");
    }
    print!("{}", render_outcome(&outcome));

    let pulls = fetch(ResourceKind::Pulls)?;
    print_kind(&pulls, "pulls", STALE_PULL_DAYS, options, error_log);

    let issues = fetch(ResourceKind::Issues)?;
    print_kind(&issues, "issues", STALE_ISSUE_DAYS, options, error_log);

    Ok(())
}

fn print_kind(
    records: &ResultSet,
    label: &str,
    stale_days: i64,
    options: &ReportOptions,
    error_log: &dyn ErrorLog,
) {
    let count = count_states(records, &options.range, error_log);
    print!("{}", render_state_count(label, &count));

    let stale = match count_stale(records, stale_days, Utc::now()) {
        Ok(n) => Some(n),
        Err(e) => {
            error_log.record(&format!("Counting old {label} failed: {e:?}"));
            None
        }
    };
    println!("{}", render_stale(label, stale));
}

/// The authors section of the report. An API error prints nothing; it is
/// already in the error log.
pub fn render_outcome(outcome: &AuthorsOutcome) -> String {
    match outcome {
        AuthorsOutcome::Ranked(authors) => render_authors(authors),
        AuthorsOutcome::NotFound => "Authors not found\n".to_string(),
        AuthorsOutcome::ApiError(_) => String::new(),
    }
}

pub fn render_authors(authors: &[AuthorCount]) -> String {
    let mut out = format!(
        "{:^20}|{:>5}\n{}\n",
        style("Login").bold(),
        style("Commits").bold(),
        "_".repeat(30)
    );
    for author in authors {
        out.push_str(&format!("{:^20}|{:>5}\n", author.login, author.commits));
    }
    out
}

pub fn render_state_count(label: &str, count: &StateCount) -> String {
    count
        .entries()
        .iter()
        .map(|(state, n)| format!("Count {label} in state \"{state}\": {n}\n"))
        .collect()
}

pub fn render_stale(label: &str, stale: Option<usize>) -> String {
    match stale {
        Some(n) => format!("Count of old {label}: {n}"),
        None => format!("Count of old {label}: {}", style("unknown").yellow()),
    }
}

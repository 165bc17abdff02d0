use crate::credentials;
use crate::error::RepoStatError;
use crate::error_log::ErrorLog;
use crate::github::{GitHubRepo, HttpTransport, DEFAULT_API_URL};
use crate::model::{DateRange, DEFAULT_BRANCH, DEFAULT_DATE_BEGIN, DEFAULT_DATE_END, DEFAULT_TOP_AUTHORS};
use crate::report::{self, ReportOptions};
use crate::util::parse_timestamp;
use anyhow::{Context, Result};
use clap::Parser;

pub const API_URL_ENV: &str = "GITHUB_API_URL";

const LOG_TARGET: &str = "cli";

#[derive(Parser, Debug)]
#[command(name = "repostat")]
#[command(about = "Commit, pull request and issue statistics for a GitHub repository")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "URL of the GitHub repository")]
    pub url: String,

    #[arg(long = "date_begin", default_value = DEFAULT_DATE_BEGIN, help = "Start of the period (YYYY-MM-DDTHH:MM:SSZ)")]
    pub date_begin: String,

    #[arg(long = "date_end", default_value = DEFAULT_DATE_END, help = "End of the period (YYYY-MM-DDTHH:MM:SSZ)")]
    pub date_end: String,

    #[arg(long, default_value = DEFAULT_BRANCH, help = "Branch to analyze")]
    pub branch: String,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self, error_log: &dyn ErrorLog) -> Result<()> {
        let range = DateRange::new(parse_timestamp(&self.date_begin)?, parse_timestamp(&self.date_end)?);

        let api_base = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let repo = match GitHubRepo::from_url(&self.url, &api_base) {
            Ok(repo) => repo,
            Err(e) => {
                error_log.record(&e.to_string());
                return Err(e.into());
            }
        };
        log::info!(target: LOG_TARGET, "Reporting on {}/{} ({})", repo.owner, repo.name, self.branch);

        let credential = credentials::resolve()?;
        let transport = HttpTransport::new().context("Failed to build HTTP client")?;

        let options = ReportOptions {
            repo,
            range,
            branch: self.branch,
            top_count: DEFAULT_TOP_AUTHORS,
        };
        report::run(&transport, error_log, &credential, &options)?;
        Ok(())
    }
}

/// Last-resort handling for an error that ended the run.
///
/// Failures already written to the error log at their source only get a
/// short message; everything else is logged here with its full chain.
pub fn report_failure(err: &anyhow::Error, error_log: &dyn ErrorLog) {
    // Fatal messages go to stderr; stdout carries only the report.
    match err.downcast_ref::<RepoStatError>() {
        Some(e @ RepoStatError::InvalidUrl(_)) => eprintln!("{e} See error.log"),
        Some(RepoStatError::FetchFailed { .. }) => eprintln!("Getting data by URL failed. See error.log"),
        _ => {
            error_log.record(&format!("{err:?}"));
            eprintln!("An error has occurred. Details in the log file error.log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_log::MemoryErrorLog;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["repostat", "--url", "https://github.com/a/b"]).unwrap();
        assert_eq!(cli.date_begin, "1970-01-01T00:00:00Z");
        assert_eq!(cli.date_end, "3000-12-31T23:59:59Z");
        assert_eq!(cli.branch, "master");
    }

    #[test]
    fn underscore_flags() {
        let cli = Cli::try_parse_from([
            "repostat",
            "--url=https://github.com/a/b",
            "--date_begin=2020-05-25T00:00:00Z",
            "--date_end=2020-06-29T23:59:59Z",
            "--branch=main",
        ])
        .unwrap();
        assert_eq!(cli.date_begin, "2020-05-25T00:00:00Z");
        assert_eq!(cli.date_end, "2020-06-29T23:59:59Z");
        assert_eq!(cli.branch, "main");
    }

    #[test]
    fn url_is_required() {
        assert!(Cli::try_parse_from(["repostat"]).is_err());
    }

    #[test]
    fn malformed_url_is_logged_before_any_prompt() {
        let cli = Cli::try_parse_from(["repostat", "--url", "nonsense"]).unwrap();
        let log = MemoryErrorLog::new();

        let err = cli.execute(&log).unwrap_err();

        assert!(matches!(err.downcast_ref::<RepoStatError>(), Some(RepoStatError::InvalidUrl(_))));
        assert_eq!(log.entries(), vec!["Incorrect URL of repo nonsense.".to_string()]);
    }

    #[test]
    fn malformed_date_fails() {
        let cli = Cli::try_parse_from(["repostat", "--url", "https://github.com/a/b", "--date_begin", "2020-01-01"])
            .unwrap();
        let log = MemoryErrorLog::new();

        let err = cli.execute(&log).unwrap_err();

        assert!(matches!(err.downcast_ref::<RepoStatError>(), Some(RepoStatError::InvalidDate(_))));
    }

    #[test]
    fn unexpected_errors_are_logged_by_the_handler() {
        let log = MemoryErrorLog::new();
        report_failure(&anyhow::anyhow!("socket closed"), &log);
        assert_eq!(log.len(), 1);
        assert!(log.entries()[0].contains("socket closed"));

        let already_logged = MemoryErrorLog::new();
        report_failure(
            &RepoStatError::FetchFailed { url: "u".to_string(), status: 404 }.into(),
            &already_logged,
        );
        assert!(already_logged.is_empty());
    }
}

use super::client::Transport;
use super::repo::GitHubRepo;
use crate::error::{RepoStatError, Result};
use crate::error_log::ErrorLog;
use crate::model::{Credential, ResourceKind, ResultSet};
use indicatif::{ProgressBar, ProgressStyle};

const LOG_TARGET: &str = "github";

/// Fetch every page of one resource kind for `repo`.
pub fn fetch_resource<T: Transport + ?Sized>(
    transport: &T,
    error_log: &dyn ErrorLog,
    repo: &GitHubRepo,
    kind: ResourceKind,
    branch: &str,
    credential: &Credential,
) -> Result<ResultSet> {
    fetch_all(transport, error_log, &repo.endpoint(kind), kind, branch, credential, true)
}

/// Request `url` and follow `rel="next"` links until they run out.
///
/// A non-success status on any page is written to the error log and aborts
/// the fetch; nothing fetched so far is returned.
pub fn fetch_all<T: Transport + ?Sized>(
    transport: &T,
    error_log: &dyn ErrorLog,
    url: &str,
    kind: ResourceKind,
    branch: &str,
    credential: &Credential,
    show_progress: bool,
) -> Result<ResultSet> {
    let query = kind.query(branch);

    let pb = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut result = ResultSet::default();
    let mut next = Some(url.to_string());
    let mut pages = 0usize;

    while let Some(current) = next.take() {
        pb.set_message(format!("Fetching {kind}, page {}...", pages + 1));
        let page = transport.get(&current, &query, credential)?;

        if !page.is_success() {
            pb.finish_and_clear();
            error_log.record(&format!("{}: {}", page.url, page.status));
            log::warn!(target: LOG_TARGET, "GET {} returned {}", page.url, page.status);
            return Err(RepoStatError::FetchFailed {
                url: page.url,
                status: page.status,
            });
        }

        let body: serde_json::Value = serde_json::from_str(&page.body)?;
        result.extend_page(body);
        pages += 1;
        log::debug!(
            target: LOG_TARGET,
            "Fetched page {pages} of {kind}, {} records so far",
            result.len()
        );

        next = page.next;
    }

    pb.finish_and_clear();
    log::info!(target: LOG_TARGET, "Fetched {} {kind} in {pages} page(s)", result.len());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_log::MemoryErrorLog;
    use crate::github::client::Page;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Serves canned pages keyed by URL and records every request.
    struct ScriptedTransport {
        pages: HashMap<String, Page>,
        requests: RefCell<Vec<(String, Vec<(String, String)>)>>,
    }

    impl ScriptedTransport {
        fn new(pages: Vec<Page>) -> Self {
            Self {
                pages: pages.into_iter().map(|p| (p.url.clone(), p)).collect(),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for ScriptedTransport {
        fn get(&self, url: &str, query: &[(&str, String)], _credential: &Credential) -> Result<Page> {
            self.requests.borrow_mut().push((
                url.to_string(),
                query.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect(),
            ));
            Ok(self.pages.get(url).cloned().unwrap_or(Page {
                url: url.to_string(),
                status: 404,
                body: r#"{"message":"Not Found"}"#.to_string(),
                next: None,
            }))
        }
    }

    fn records(page: usize, count: usize) -> Vec<Value> {
        (0..count).map(|i| json!({"page": page, "index": i})).collect()
    }

    fn page(url: &str, body: Vec<Value>, next: Option<&str>) -> Page {
        Page {
            url: url.to_string(),
            status: 200,
            body: Value::Array(body).to_string(),
            next: next.map(str::to_string),
        }
    }

    fn credential() -> Credential {
        Credential::new("octocat", "token")
    }

    #[test]
    fn concatenates_pages_in_order() {
        let transport = ScriptedTransport::new(vec![
            page("https://api/repos/a/b/pulls", records(1, 10), Some("https://api/p2")),
            page("https://api/p2", records(2, 10), Some("https://api/p3")),
            page("https://api/p3", records(3, 4), None),
        ]);
        let log = MemoryErrorLog::new();

        let result = fetch_all(
            &transport,
            &log,
            "https://api/repos/a/b/pulls",
            ResourceKind::Pulls,
            "main",
            &credential(),
            false,
        )
        .unwrap();

        assert_eq!(result.len(), 24);
        let order: Vec<(u64, u64)> = result
            .records
            .iter()
            .map(|r| (r["page"].as_u64().unwrap(), r["index"].as_u64().unwrap()))
            .collect();
        let mut expected: Vec<(u64, u64)> = Vec::new();
        for (p, n) in [(1, 10), (2, 10), (3, 4)] {
            for i in 0..n {
                expected.push((p, i));
            }
        }
        assert_eq!(order, expected);
        assert!(log.is_empty());
    }

    #[test]
    fn every_page_gets_the_same_query() {
        let transport = ScriptedTransport::new(vec![
            page("https://api/c", records(1, 1), Some("https://api/c2")),
            page("https://api/c2", records(2, 1), None),
        ]);
        let log = MemoryErrorLog::new();

        fetch_all(&transport, &log, "https://api/c", ResourceKind::Commits, "dev", &credential(), false).unwrap();

        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 2);
        let expected = vec![
            ("state".to_string(), "all".to_string()),
            ("sha".to_string(), "dev".to_string()),
        ];
        assert_eq!(requests[0].1, expected);
        assert_eq!(requests[1].1, expected);
    }

    #[test]
    fn failed_status_is_logged_and_fatal() {
        let transport = ScriptedTransport::new(vec![]);
        let log = MemoryErrorLog::new();

        let err = fetch_all(
            &transport,
            &log,
            "https://api/repos/a/b/issues",
            ResourceKind::Issues,
            "master",
            &credential(),
            false,
        )
        .unwrap_err();

        assert!(matches!(err, RepoStatError::FetchFailed { status: 404, .. }));
        assert_eq!(log.entries(), vec!["https://api/repos/a/b/issues: 404".to_string()]);
    }

    #[test]
    fn failure_on_later_page_discards_everything() {
        let transport = ScriptedTransport::new(vec![page(
            "https://api/i",
            records(1, 3),
            Some("https://api/missing"),
        )]);
        let log = MemoryErrorLog::new();

        let result = fetch_all(&transport, &log, "https://api/i", ResourceKind::Issues, "master", &credential(), false);

        assert!(matches!(result, Err(RepoStatError::FetchFailed { .. })));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn error_object_is_kept_as_message() {
        let transport = ScriptedTransport::new(vec![Page {
            url: "https://api/c".to_string(),
            status: 200,
            body: r#"{"message":"Git Repository is empty."}"#.to_string(),
            next: None,
        }]);
        let log = MemoryErrorLog::new();

        let result =
            fetch_all(&transport, &log, "https://api/c", ResourceKind::Commits, "master", &credential(), false).unwrap();

        assert!(result.is_empty());
        assert_eq!(result.message.as_deref(), Some("Git Repository is empty."));
    }
}

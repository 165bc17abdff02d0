use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;

/// A single commit, pull request or issue as returned by the API.
pub type Record = Value;

pub const DEFAULT_DATE_BEGIN: &str = "1970-01-01T00:00:00Z";
pub const DEFAULT_DATE_END: &str = "3000-12-31T23:59:59Z";
pub const DEFAULT_BRANCH: &str = "master";
pub const DEFAULT_TOP_AUTHORS: usize = 30;
pub const STALE_PULL_DAYS: i64 = 30;
pub const STALE_ISSUE_DAYS: i64 = 14;

#[derive(Clone)]
pub struct Credential {
    pub login: String,
    pub secret: String,
}

impl Credential {
    pub fn new(login: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("login", &self.login)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Inclusive creation-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(begin: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { begin, end }
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        &self.begin <= timestamp && timestamp <= &self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Commits,
    Pulls,
    Issues,
}

impl ResourceKind {
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::Commits => "commits",
            ResourceKind::Pulls => "pulls",
            ResourceKind::Issues => "issues",
        }
    }

    /// Query parameters sent with every page of this resource.
    pub fn query(self, branch: &str) -> Vec<(&'static str, String)> {
        match self {
            ResourceKind::Commits => vec![("state", "all".to_string()), ("sha", branch.to_string())],
            ResourceKind::Pulls => vec![("state", "all".to_string()), ("base", branch.to_string())],
            ResourceKind::Issues => vec![("state", "all".to_string())],
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// All pages of one resource kind, in server order.
///
/// When the API answers with an error object instead of a list, `message`
/// holds its `message` field and `records` stays empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub records: Vec<Record>,
    pub message: Option<String>,
}

impl ResultSet {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records, message: None }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a decoded page body.
    pub fn extend_page(&mut self, body: Value) {
        match body {
            Value::Array(items) => self.records.extend(items),
            Value::Object(map) => {
                let message = map
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| Value::Object(map.clone()).to_string());
                self.message = Some(message);
            }
            other => self.records.push(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorCount {
    pub login: String,
    pub commits: usize,
}

impl AuthorCount {
    pub fn new(login: impl Into<String>, commits: usize) -> Self {
        Self {
            login: login.into(),
            commits,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateCount {
    pub open: usize,
    pub closed: usize,
}

impl StateCount {
    pub fn total(&self) -> usize {
        self.open + self.closed
    }

    pub fn entries(&self) -> [(&'static str, usize); 2] {
        [("open", self.open), ("closed", self.closed)]
    }
}

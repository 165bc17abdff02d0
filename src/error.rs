use thiserror::Error;

pub type Result<T> = std::result::Result<T, RepoStatError>;

#[derive(Error, Debug)]
pub enum RepoStatError {
    #[error("Incorrect URL of repo {0}.")]
    InvalidUrl(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("{url}: {status}")]
    FetchFailed { url: String, status: u16 },
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

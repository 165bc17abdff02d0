use crate::error::Result;
use crate::model::Credential;
use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap};
use url::Url;

const LOG_TARGET: &str = "github";
const USER_AGENT: &str = concat!("repostat/", env!("CARGO_PKG_VERSION"));

/// One HTTP response, reduced to what pagination needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Final request URL, query string included.
    pub url: String,
    pub status: u16,
    pub body: String,
    /// Target of the `rel="next"` link, if any.
    pub next: Option<String>,
}

impl Page {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Transport {
    fn get(&self, url: &str, query: &[(&str, String)], credential: &Credential) -> Result<Page>;
}

/// Blocking `reqwest` transport with basic authentication.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(&str, String)], credential: &Credential) -> Result<Page> {
        let target = with_query(url, query)?;
        log::debug!(target: LOG_TARGET, "GET {target}");

        let resp = self
            .client
            .get(target)
            .basic_auth(&credential.login, Some(&credential.secret))
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()?;

        let url = resp.url().to_string();
        let status = resp.status().as_u16();
        let next = parse_link_next(resp.headers());
        let body = resp.text()?;

        Ok(Page { url, status, body, next })
    }
}

/// Add `query` to `url`, skipping keys the URL already carries.
pub fn with_query(url: &str, query: &[(&str, String)]) -> Result<Url> {
    let mut parsed = Url::parse(url)?;
    let existing: Vec<String> = parsed.query_pairs().map(|(k, _)| k.into_owned()).collect();
    let missing: Vec<&(&str, String)> = query
        .iter()
        .filter(|(k, _)| !existing.iter().any(|e| e.as_str() == *k))
        .collect();
    if !missing.is_empty() {
        let mut pairs = parsed.query_pairs_mut();
        for (k, v) in missing {
            pairs.append_pair(k, v);
        }
    }
    Ok(parsed)
}

/// Parse the `Link` header and return the `rel="next"` target.
pub fn parse_link_next(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(header::LINK)?.to_str().ok()?;
    parse_link_value(link)
}

fn parse_link_value(link: &str) -> Option<String> {
    link.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|param| {
            let param = param.trim();
            param == "rel=\"next\"" || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}

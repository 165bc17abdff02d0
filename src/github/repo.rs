use crate::error::{RepoStatError, Result};
use crate::model::ResourceKind;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// A repository addressed through the REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubRepo {
    pub owner: String,
    pub name: String,
    api_base: String,
}

impl GitHubRepo {
    /// Build from a web URL such as `https://github.com/owner/name`.
    ///
    /// The last two path segments name the repository; a trailing `.git` is
    /// dropped. Input without a scheme is read as `https`.
    pub fn from_url(input: &str, api_base: &str) -> Result<Self> {
        let invalid = || RepoStatError::InvalidUrl(input.to_string());

        let trimmed = input.trim();
        let url = match Url::parse(trimmed) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse(&format!("https://{trimmed}")).map_err(|_| invalid())?
            }
            Err(_) => return Err(invalid()),
        };
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid());
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();
        let [.., owner, name] = segments.as_slice() else {
            return Err(invalid());
        };
        let name = name.strip_suffix(".git").unwrap_or(*name);
        if name.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            owner: (*owner).to_string(),
            name: name.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_url(&self) -> String {
        format!("{}/repos/{}/{}", self.api_base, self.owner, self.name)
    }

    pub fn endpoint(&self, kind: ResourceKind) -> String {
        format!("{}/{}", self.api_url(), kind.path())
    }
}

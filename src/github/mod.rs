mod error;
pub mod pagination;
pub mod types;

pub use error::{GitHubError, classify};
pub use pagination::{PageLimits, fetch_all_pages};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::Client;
use tracing::{debug, warn};

use types::{RepositoryRecord, UserProfile};

pub const API_BASE: &str = "https://api.github.com";

/// Characters to percent-encode when a user id becomes a single URL path segment.
const SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'@')
    .add(b'[')
    .add(b']')
    .add(b';')
    .add(b'=');

fn encode_segment(s: &str) -> String {
    utf8_percent_encode(s, SEGMENT_ENCODE_SET).to_string()
}

/// Bearer token supplied for a single invocation. Held in memory only.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for blank tokens so callers fall back to unauthenticated access.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() { None } else { Some(Self(token)) }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Source of user profiles and repository pages.
/// Implemented by `GitHubClient` for production; mock implementations used in tests.
#[allow(async_fn_in_trait)]
pub trait RepoSource {
    async fn user_profile(
        &self,
        user: &str,
        credential: Option<&Credential>,
    ) -> Result<UserProfile, GitHubError>;

    async fn repo_page(
        &self,
        user: &str,
        page: u32,
        per_page: u32,
        credential: Option<&Credential>,
    ) -> Result<Vec<RepositoryRecord>, GitHubError>;
}

/// HTTP client for the GitHub REST API v3.
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: String,
}

impl GitHubClient {
    /// Point the client at a GitHub Enterprise instance or a test server.
    pub fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, path: &str, credential: Option<&Credential>) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let mut req = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", crate::USER_AGENT)
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(Credential(token)) = credential {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        req
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        credential: Option<&Credential>,
    ) -> Result<T, GitHubError> {
        let response = self.request(path, credential).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), path, "GitHub request failed");
            return Err(classify(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status"),
            ));
        }
        debug!(status = status.as_u16(), path, "GitHub request ok");
        Ok(response.json().await?)
    }
}

impl RepoSource for GitHubClient {
    async fn user_profile(
        &self,
        user: &str,
        credential: Option<&Credential>,
    ) -> Result<UserProfile, GitHubError> {
        let user = encode_segment(user);
        self.get_json(&format!("/users/{user}"), credential).await
    }

    async fn repo_page(
        &self,
        user: &str,
        page: u32,
        per_page: u32,
        credential: Option<&Credential>,
    ) -> Result<Vec<RepositoryRecord>, GitHubError> {
        let user = encode_segment(user);
        self.get_json(
            &format!("/users/{user}/repos?per_page={per_page}&sort=updated&page={page}"),
            credential,
        )
        .await
    }
}

use serde::{Deserialize, Serialize};

/// One item from `GET /users/{user}/repos`.
///
/// Counts are optional on the wire; use [`stars`](Self::stars) and
/// [`forks`](Self::forks), which read a missing or null count as 0.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct RepositoryRecord {
    pub name: String,
    pub language: Option<String>,
    pub stargazers_count: Option<u64>,
    pub forks_count: Option<u64>,
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: String,
}

impl RepositoryRecord {
    pub fn stars(&self) -> u64 {
        self.stargazers_count.unwrap_or(0)
    }

    pub fn forks(&self) -> u64 {
        self.forks_count.unwrap_or(0)
    }
}

/// Profile from `GET /users/{user}`. Passed through to presentation untouched.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub public_gists: u64,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub blog: Option<String>,
    pub company: Option<String>,
    pub html_url: Option<String>,
    pub avatar_url: Option<String>,
}

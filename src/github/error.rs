/// Errors returned by GitHub API requests.
///
/// Every non-2xx response is mapped through [`classify`], so the profile lookup
/// and each repository page report failures the same way.
#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    #[error("User not found. Check the username and try again.")]
    NotFound,

    #[error(
        "GitHub API rate limit exceeded. Wait a while, or set GITHUB_TOKEN for higher limits."
    )]
    RateLimited,

    #[error("The supplied GitHub token is invalid.")]
    Unauthorized,

    #[error("GitHub API error: {code} {text}")]
    Unclassified { code: u16, text: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Map a failed response's status line to an error kind.
pub fn classify(code: u16, text: &str) -> GitHubError {
    match code {
        404 => GitHubError::NotFound,
        403 => GitHubError::RateLimited,
        401 => GitHubError::Unauthorized,
        _ => GitHubError::Unclassified {
            code,
            text: text.trim().to_string(),
        },
    }
}
